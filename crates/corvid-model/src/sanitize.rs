// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Request sanitization applied right before a [`CompletionRequest`] is sent.

use crate::{
    catalog::InputModality, ContentPart, Message, MessageContent, ToolContentPart,
    ToolResultContent,
};

/// Replace image parts with a text placeholder when the target model does
/// not declare [`InputModality::Image`] support.
///
/// Providers reject image content outright rather than silently ignoring
/// it, so this must run before every `complete()` call whenever the model
/// (or model override) may have changed since the previous turn.
pub fn strip_images_if_unsupported(
    messages: Vec<Message>,
    modalities: &[InputModality],
) -> Vec<Message> {
    if modalities.contains(&InputModality::Image) {
        return messages;
    }

    messages
        .into_iter()
        .map(|m| {
            let content = match m.content {
                MessageContent::ContentParts(parts) => {
                    let texts: Vec<ContentPart> = parts
                        .into_iter()
                        .map(|p| match p {
                            ContentPart::Text { .. } => p,
                            ContentPart::Image { .. } => {
                                ContentPart::text("[image omitted: model does not support images]")
                            }
                        })
                        .collect();
                    MessageContent::ContentParts(texts)
                }
                MessageContent::ToolResult { tool_call_id, content: ToolResultContent::Parts(parts) } => {
                    let texts: Vec<ToolContentPart> = parts
                        .into_iter()
                        .map(|p| match p {
                            ToolContentPart::Text { .. } => p,
                            ToolContentPart::Image { .. } => ToolContentPart::Text {
                                text: "[image omitted: model does not support images]".into(),
                            },
                        })
                        .collect();
                    MessageContent::ToolResult { tool_call_id, content: ToolResultContent::Parts(texts) }
                }
                other => other,
            };
            Message { role: m.role, content }
        })
        .collect()
}
