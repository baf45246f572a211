// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Model transport boundary.
//!
//! This crate defines the [`ModelProvider`] trait the agent loop streams
//! completions through, the wire-independent [`CompletionRequest`] /
//! [`ResponseEvent`] types it exchanges, and a [`MockProvider`] /
//! [`ScriptedMockProvider`] pair for running the rest of the system without a
//! live API. Concrete network drivers (OpenAI, Anthropic, ...) are outside
//! this crate's scope — see `DESIGN.md` at the workspace root — so
//! [`from_config`] only ever resolves to a mock provider. A production
//! deployment supplies its own [`ModelProvider`] implementation and
//! constructs it directly rather than going through `from_config`.

pub mod catalog;
mod mock;
mod provider;
pub mod sanitize;
mod types;

pub use catalog::{InputModality, ModelCatalogEntry};
pub use mock::{MockProvider, ScriptedMockProvider};
pub use provider::{ModelProvider, ResponseStream};
pub use types::{
    CompletionRequest, ContentPart, FunctionCall, Message, MessageContent, ResponseEvent, Role,
    ToolContentPart, ToolResultContent, ToolSchema, Usage,
};

use corvid_config::ModelConfig;

/// Construct a [`ModelProvider`] from a resolved [`ModelConfig`].
///
/// Only `provider: "mock"` is supported here. When `mock_responses_file` is
/// set, the provider replays scripted turns from that YAML file; otherwise
/// it falls back to [`MockProvider`]'s deterministic echo behaviour.
///
/// Any other provider identifier is rejected — wiring up a live network
/// driver is the embedding application's responsibility, not this crate's.
pub fn from_config(cfg: &ModelConfig) -> anyhow::Result<Box<dyn ModelProvider>> {
    match cfg.provider.as_str() {
        "mock" => {
            if let Some(path) = &cfg.mock_responses_file {
                let provider = ScriptedMockProvider::from_yaml_file(std::path::Path::new(path))?;
                Ok(Box::new(provider))
            } else {
                Ok(Box::new(MockProvider))
            }
        }
        other => Err(anyhow::anyhow!(
            "unknown model provider '{other}': this build only constructs the 'mock' provider \
             from config; supply a ModelProvider implementation directly for live backends"
        )),
    }
}
