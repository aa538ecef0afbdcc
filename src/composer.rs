//! Reply composer state machine.
//!
//! All mutable view state lives in [`Composer`] and changes only through
//! [`Composer::update`]. Side effects (the HTTP call, the clipboard write)
//! are handed back to the caller as [`Effect`]s, and their outcomes come
//! back in as actions.

use crate::clipboard::ClipboardError;
use crate::service::{GenerateRequest, ServiceError, Tone};

pub const EMPTY_CONTENT_MESSAGE: &str = "Please enter the original email content.";
pub const GENERATED_MESSAGE: &str = "Email reply generated successfully!";
pub const COPIED_MESSAGE: &str = "Reply copied to clipboard!";

/// User-visible feedback line
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(msg) | Status::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Last attempt stopped at the empty-content guard
    Rejected,
    Loading,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_loading(self) -> bool {
        self == Phase::Loading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetEmailContent(String),
    SetTone(Tone),
    Generate,
    GenerateFinished(Result<String, ServiceError>),
    Copy,
    CopyFinished(Result<(), ClipboardError>),
}

/// Work the caller must perform, feeding the outcome back as an action
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendRequest(GenerateRequest),
    WriteClipboard(String),
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    email_content: String,
    tone: Tone,
    generated_reply: String,
    status: Option<Status>,
    phase: Phase,
}

impl Composer {
    pub fn new(tone: Tone) -> Self {
        Self {
            tone,
            ..Self::default()
        }
    }

    pub fn email_content(&self) -> &str {
        &self.email_content
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn generated_reply(&self) -> &str {
        &self.generated_reply
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn has_reply(&self) -> bool {
        !self.generated_reply.is_empty()
    }

    /// Length of the draft in characters, not bytes
    pub fn content_len(&self) -> usize {
        self.email_content.chars().count()
    }

    /// Whether the generate control should look enabled
    pub fn can_generate(&self) -> bool {
        !self.is_loading() && !self.email_content.trim().is_empty()
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SetEmailContent(text) => {
                if !self.is_loading() {
                    self.email_content = text;
                }
                None
            }
            Action::SetTone(tone) => {
                if !self.is_loading() {
                    self.tone = tone;
                }
                None
            }
            Action::Generate => self.generate(),
            Action::GenerateFinished(outcome) => {
                self.finish_generate(outcome);
                None
            }
            Action::Copy => {
                if self.generated_reply.is_empty() {
                    None
                } else {
                    Some(Effect::WriteClipboard(self.generated_reply.clone()))
                }
            }
            Action::CopyFinished(Ok(())) => {
                self.status = Some(Status::Info(COPIED_MESSAGE.to_string()));
                None
            }
            Action::CopyFinished(Err(e)) => {
                self.status = Some(Status::Error(format!(
                    "Failed to copy to clipboard: {}",
                    e
                )));
                None
            }
        }
    }

    fn generate(&mut self) -> Option<Effect> {
        if self.is_loading() {
            return None;
        }

        self.status = None;
        self.generated_reply.clear();

        if self.email_content.trim().is_empty() {
            self.status = Some(Status::Info(EMPTY_CONTENT_MESSAGE.to_string()));
            self.phase = Phase::Rejected;
            return None;
        }

        self.phase = Phase::Loading;
        Some(Effect::SendRequest(GenerateRequest {
            email_content: self.email_content.clone(),
            tone: self.tone,
        }))
    }

    fn finish_generate(&mut self, outcome: Result<String, ServiceError>) {
        // Only the outstanding request may resolve the attempt
        if !self.is_loading() {
            return;
        }

        match outcome {
            Ok(reply) => {
                self.generated_reply = reply;
                self.status = Some(Status::Info(GENERATED_MESSAGE.to_string()));
                self.phase = Phase::Succeeded;
            }
            Err(e) => {
                self.status = Some(Status::Error(format!(
                    "Error: {}. Make sure your backend is running.",
                    e.to_string().trim_end_matches('.')
                )));
                self.phase = Phase::Failed;
            }
        }
    }
}
