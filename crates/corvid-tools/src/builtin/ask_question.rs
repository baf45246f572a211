// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::policy::ApprovalPolicy;
use crate::tool::{Tool, ToolCall, ToolOutput};

/// How long the tool waits for an answer before giving up.
const QUESTION_TIMEOUT: Duration = Duration::from_secs(300);

/// A single structured question with optional multiple-choice options.
#[derive(Debug, Clone)]
pub struct Question {
    pub question: String,
    pub header: Option<String>,
    pub options: Vec<String>,
    pub allow_custom: bool,
}

/// Sent to the external surface when the agent asks a question; the answer
/// is submitted back through `answer_tx`, keyed by `id`.
pub struct QuestionRequest {
    pub id: String,
    pub questions: Vec<Question>,
    pub answer_tx: oneshot::Sender<String>,
}

/// Ask the user one or more questions and await the answer, with a bounded
/// wait. When a `question_tx` channel is configured, the request is routed
/// externally (e.g. to a terminal UI) and the tool awaits the answer future
/// keyed by the generated question id, timing out after [`QUESTION_TIMEOUT`].
/// Without a channel, the tool falls back to a line-oriented stdin prompt in
/// interactive sessions, and returns an error in headless/CI sessions.
pub struct AskQuestionTool {
    question_tx: Option<mpsc::Sender<QuestionRequest>>,
    /// Force headless mode regardless of TTY detection. Used in tests and CI.
    force_headless: bool,
}

impl AskQuestionTool {
    pub fn new() -> Self {
        Self {
            question_tx: None,
            force_headless: false,
        }
    }

    /// Create an instance that routes questions externally via `tx`.
    pub fn new_routed(tx: mpsc::Sender<QuestionRequest>) -> Self {
        Self {
            question_tx: Some(tx),
            force_headless: false,
        }
    }

    /// Create an instance that always behaves as headless (non-interactive).
    pub fn new_headless() -> Self {
        Self {
            question_tx: None,
            force_headless: true,
        }
    }
}

impl Default for AskQuestionTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for AskQuestionTool {
    fn name(&self) -> &str {
        "question"
    }

    fn description(&self) -> &str {
        "Ask the user one or more questions and wait for their answer. \
         Each question may carry multiple-choice options; if allow_custom is not \
         false, the user may answer with free text instead. \
         Unavailable in headless/CI/piped mode — returns an error there. \
         Times out after 300 seconds if nobody answers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string", "description": "The question to ask" },
                            "header": { "type": "string", "description": "Optional short label shown above the question" },
                            "options": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "Optional list of choices"
                            },
                            "allow_custom": {
                                "type": "boolean",
                                "description": "Whether a free-text answer is accepted alongside options (default true)",
                                "default": true
                            }
                        },
                        "required": ["question"],
                        "additionalProperties": false
                    },
                    "description": "List of 1-3 questions",
                    "minItems": 1,
                    "maxItems": 3
                }
            },
            "required": ["questions"],
            "additionalProperties": false
        })
    }

    fn default_policy(&self) -> ApprovalPolicy {
        ApprovalPolicy::Auto
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let questions_json = match call.args.get("questions").and_then(|v| v.as_array()) {
            Some(arr) => arr,
            None => return ToolOutput::err(&call.id, "missing 'questions' array"),
        };

        let mut questions: Vec<Question> = Vec::new();
        for (i, q_val) in questions_json.iter().enumerate() {
            let q_obj = match q_val.as_object() {
                Some(o) => o,
                None => {
                    return ToolOutput::err(&call.id, format!("question {} is not an object", i + 1))
                }
            };

            let question = match q_obj.get("question").and_then(|v| v.as_str()) {
                Some(p) => p.to_string(),
                None => {
                    return ToolOutput::err(&call.id, format!("question {} missing 'question'", i + 1))
                }
            };

            let header = q_obj
                .get("header")
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let options: Vec<String> = q_obj
                .get("options")
                .and_then(|v| v.as_array())
                .map(|opts| {
                    opts.iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();

            let allow_custom = q_obj
                .get("allow_custom")
                .and_then(|v| v.as_bool())
                .unwrap_or(true);

            questions.push(Question {
                question,
                header,
                options,
                allow_custom,
            });
        }

        if questions.is_empty() {
            return ToolOutput::err(&call.id, "questions array must not be empty");
        }
        if questions.len() > 3 {
            return ToolOutput::err(&call.id, "at most 3 questions may be asked at a time");
        }

        debug!(count = questions.len(), id = %call.id, "question tool");

        // ── Routed (e.g. TUI / event-bus) mode ─────────────────────────────────
        if let Some(tx) = &self.question_tx {
            let (answer_tx, answer_rx) = oneshot::channel();
            let req = QuestionRequest {
                id: call.id.clone(),
                questions,
                answer_tx,
            };
            if tx.send(req).await.is_err() {
                return ToolOutput::err(&call.id, "question channel closed unexpectedly");
            }
            return match tokio::time::timeout(QUESTION_TIMEOUT, answer_rx).await {
                Ok(Ok(answer)) => ToolOutput::ok(&call.id, answer),
                Ok(Err(_)) => ToolOutput::err(&call.id, "question was cancelled by the user"),
                Err(_) => ToolOutput::err(
                    &call.id,
                    format!("question timed out after {}s with no answer", QUESTION_TIMEOUT.as_secs()),
                ),
            };
        }

        // ── Plain terminal / headless mode ──────────────────────────────────────
        if self.force_headless || !stdin_is_tty() {
            let question_list = questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let opts = q
                        .options
                        .iter()
                        .enumerate()
                        .map(|(j, opt)| format!("    {}. {}", j + 1, opt))
                        .collect::<Vec<_>>()
                        .join("\n");
                    format!("  {}. {}\n{}", i + 1, q.question, opts)
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            return ToolOutput::err(
                &call.id,
                format!(
                    "question is unavailable in non-interactive (headless/CI/piped) mode.\n\
                     The following questions could not be answered:\n{question_list}\n\
                     Proceed with your best judgement and state your assumptions clearly."
                ),
            );
        }

        eprintln!();
        eprintln!("╔══ Questions from agent ══════════════════════════╗");
        for (i, q) in questions.iter().enumerate() {
            if let Some(h) = &q.header {
                eprintln!("  [{h}]");
            }
            eprintln!("  {}. {}", i + 1, q.question);
            for (j, opt) in q.options.iter().enumerate() {
                eprintln!("     {}. {}", j + 1, opt);
            }
            if q.allow_custom {
                eprintln!("     (or type a free-text answer)");
            }
        }
        eprintln!("╚══════════════════════════════════════════════════╝");

        let mut answers: Vec<String> = Vec::new();
        for (i, q) in questions.iter().enumerate() {
            eprint!("  Answer {}: ", i + 1);
            let input = read_stdin_line().await;
            let answer = parse_stdin_answer(&input, &q.options);
            answers.push(format!("Q: {}\nA: {}", q.question, answer));
        }
        eprintln!();

        ToolOutput::ok(&call.id, answers.join("\n\n"))
    }
}

/// Returns true only when stdin is connected to an interactive terminal.
/// Uses `libc::isatty` on Unix; always false on other platforms.
fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        // SAFETY: isatty is async-signal-safe and only reads an fd number.
        unsafe { libc::isatty(std::io::stdin().as_raw_fd()) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

async fn read_stdin_line() -> String {
    use tokio::io::AsyncBufReadExt;
    let stdin = tokio::io::stdin();
    let mut reader = tokio::io::BufReader::new(stdin);
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(_) => line
            .trim_end_matches('\n')
            .trim_end_matches('\r')
            .to_string(),
        Err(_) => String::new(),
    }
}

/// Parse stdin input for a question: either a 1-based option index, or free text.
fn parse_stdin_answer(input: &str, options: &[String]) -> String {
    let input = input.trim();
    if input.is_empty() {
        return "(no answer provided)".to_string();
    }
    if let Ok(n) = input.parse::<usize>() {
        if n >= 1 && n <= options.len() {
            return options[n - 1].clone();
        }
    }
    input.to_string()
}
