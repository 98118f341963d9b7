use echoform_protocol::MAX_ENTRY_LEN;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::composer::action::ComposerAction;

/// Snapshot of mutable state relevant for guard decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuardContext {
    pub entry_blank: bool,
    pub entry_len: usize,
    pub submission_in_flight: bool,
    pub question_available: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InputGuard {
    /// Upper bound on entry length, in characters.
    pub max_entry_len: usize,
}

impl Default for InputGuard {
    fn default() -> Self {
        Self {
            max_entry_len: MAX_ENTRY_LEN,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum GuardError {
    #[error("cannot submit an empty entry")]
    EmptySubmission,
    #[error("entry exceeds {limit} characters")]
    EntryTooLong { limit: usize },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no clarifying question is available")]
    NoClarifyingQuestion,
}

impl InputGuard {
    pub fn validate(&self, action: ComposerAction, ctx: GuardContext) -> Result<(), GuardError> {
        match action {
            ComposerAction::Submit => {
                if ctx.submission_in_flight {
                    return Err(GuardError::SubmissionInFlight);
                }
                if ctx.entry_blank {
                    return Err(GuardError::EmptySubmission);
                }
                if ctx.entry_len > self.max_entry_len {
                    return Err(GuardError::EntryTooLong {
                        limit: self.max_entry_len,
                    });
                }
            }
            ComposerAction::GenerateQuery => {
                if !ctx.question_available {
                    return Err(GuardError::NoClarifyingQuestion);
                }
            }
            ComposerAction::Cancel | ComposerAction::DismissEntropy => {}
        }
        Ok(())
    }
}
