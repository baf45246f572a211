// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Small static table of known model metadata (context window, max output
//! tokens, input modalities). The session/runtime asks providers for this
//! via [`crate::ModelProvider`]'s default methods; providers that don't know
//! their own model fall back to this table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputModality {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalogEntry {
    pub provider: String,
    pub model: String,
    pub context_window: u32,
    pub max_output_tokens: u32,
    pub input_modalities: Vec<InputModality>,
}

fn entry(
    provider: &str,
    model: &str,
    context_window: u32,
    max_output_tokens: u32,
    vision: bool,
) -> ModelCatalogEntry {
    let mut modalities = vec![InputModality::Text];
    if vision {
        modalities.push(InputModality::Image);
    }
    ModelCatalogEntry {
        provider: provider.into(),
        model: model.into(),
        context_window,
        max_output_tokens,
        input_modalities: modalities,
    }
}

/// A small, hand-maintained table covering the handful of models exercised
/// in tests and default configs. Unknown models simply miss this table;
/// callers treat that as "use conservative defaults", not an error.
pub fn static_catalog() -> Vec<ModelCatalogEntry> {
    vec![
        entry("mock", "mock-model", 128_000, 8_192, true),
        entry("mock", "scripted-mock-model", 128_000, 8_192, true),
    ]
}

pub fn lookup(provider: &str, model: &str) -> Option<ModelCatalogEntry> {
    static_catalog()
        .into_iter()
        .find(|e| e.provider == provider && e.model == model)
}

pub fn lookup_by_model_name(model: &str) -> Option<ModelCatalogEntry> {
    static_catalog().into_iter().find(|e| e.model == model)
}
