// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
pub mod builtin;
pub mod events;
pub mod freshness;
pub mod policy;
pub mod registry;
pub mod tool;

pub use events::{TodoItem, ToolEvent};
pub use freshness::{FreshnessGuard, NoopFreshnessGuard};
pub use policy::{ApprovalPolicy, ToolPolicy};
pub use registry::{ToolRegistry, ToolSchema};
pub use tool::{OutputCategory, Tool, ToolCall, ToolOutput, ToolOutputPart};

pub use builtin::ask_question::{AskQuestionTool, Question, QuestionRequest};
pub use builtin::edit_file::EditFileTool;
pub use builtin::glob::GlobTool;
pub use builtin::grep::GrepTool;
pub use builtin::load_skill::LoadSkillTool;
pub use builtin::read_file::ReadFileTool;
pub use builtin::shell::ShellTool;
pub use builtin::todo_write::TodoWriteTool;
pub use builtin::update_memory::UpdateMemoryTool;
pub use builtin::write::WriteTool;
