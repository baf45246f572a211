// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Minimal headless entry point for the `corvid` agent runtime.
//!
//! Full CLI surfaces (argument parsing, TUI, CI runner) are explicitly out
//! of scope for this runtime (see `spec.md` Non-goals); this binary only
//! wires the library crates together so the workspace produces a runnable
//! artifact, the way `sven`'s `src/main.rs` wires its frontends onto
//! `sven-core`.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{mpsc, Mutex};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use corvid_config::AgentMode;
use corvid_core::{Agent, AgentEvent, AgentRuntimeContext};
use corvid_tools::{
    events::ToolEvent, AskQuestionTool, EditFileTool, GlobTool, GrepTool, LoadSkillTool,
    ReadFileTool, ShellTool, TodoWriteTool, ToolRegistry, UpdateMemoryTool, WriteTool,
};

fn init_logging() {
    let filter = EnvFilter::try_from_env("CORVID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_registry(config: &corvid_config::Config, todo_tx: mpsc::Sender<ToolEvent>) -> ToolRegistry {
    let todos = Arc::new(Mutex::new(Vec::new()));

    let mut reg = ToolRegistry::new();
    reg.register(ReadFileTool);
    reg.register(GlobTool);
    reg.register(GrepTool);
    reg.register(AskQuestionTool::new_headless());
    reg.register(LoadSkillTool::new(Arc::from(Vec::new())));
    reg.register(UpdateMemoryTool {
        memory_file: config.tools.memory.memory_file.clone(),
    });
    reg.register(TodoWriteTool::new(todos, todo_tx));
    reg.register(WriteTool);
    reg.register(EditFileTool);
    reg.register(ShellTool { timeout_secs: config.tools.timeout_secs });
    reg
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Arc::new(corvid_config::load(None).context("loading configuration")?);
    let agent_config = Arc::new(config.agent.clone());
    let model = corvid_model::from_config(&config.model).context("constructing model provider")?;

    let (todo_tx, todo_rx) = mpsc::channel::<ToolEvent>(64);
    let tools = Arc::new(build_registry(&config, todo_tx));
    let mode_lock = Arc::new(Mutex::new(AgentMode::Agent));

    let mut agent = Agent::new(
        Arc::from(model),
        tools,
        agent_config,
        AgentRuntimeContext::default(),
        mode_lock,
        todo_rx,
        128_000,
    );

    let prompt = std::env::args().nth(1).unwrap_or_else(|| {
        "Describe what this runtime does in one sentence.".to_string()
    });

    let (tx, mut rx) = mpsc::channel::<AgentEvent>(256);
    let drain = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let AgentEvent::TextDelta(delta) = event {
                print!("{delta}");
            }
        }
    });

    agent.submit(&prompt, tx).await?;
    drain.await.ok();
    println!();

    Ok(())
}
