use std::sync::Arc;

use echoform_protocol::EntropyStatus;
use echoform_protocol::EntryContext;
use echoform_protocol::EntrySubmission;
use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::api::InferenceBackend;
use crate::composer::action::ComposerAction;
use crate::composer::event::ComposerEvent;
use crate::composer::guard::GuardContext;
use crate::composer::guard::GuardError;
use crate::composer::guard::InputGuard;
use crate::sync::RefreshNudge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionApplied {
    NoChange,
    StateChanged,
}

/// What the operator is composing. `Clarification` means the entry answers
/// the pending clarifying question and is tagged accordingly on submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposerMode {
    #[default]
    Normal,
    Clarification,
}

/// The composer kernel. Owned by the view and mutated only through
/// [`EntryComposer::handle_action`] (plus the free-text setter), so every
/// mode change goes through the guard and the transition table below.
pub struct EntryComposer {
    backend: Arc<dyn InferenceBackend>,
    refresh: RefreshNudge,
    guard: InputGuard,
    mode: ComposerMode,
    entry_text: String,
    clarifying_question: Option<String>,
    last_entropy: Option<EntropyStatus>,
    dismissed_message: Option<String>,
    submission_in_flight: bool,
    events: Vec<ComposerEvent>,
}

impl EntryComposer {
    pub fn new(backend: Arc<dyn InferenceBackend>, refresh: RefreshNudge) -> Self {
        Self {
            backend,
            refresh,
            guard: InputGuard::default(),
            mode: ComposerMode::Normal,
            entry_text: String::new(),
            clarifying_question: None,
            last_entropy: None,
            dismissed_message: None,
            submission_in_flight: false,
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> ComposerMode {
        self.mode
    }

    pub fn entry_text(&self) -> &str {
        &self.entry_text
    }

    pub fn set_entry_text(&mut self, value: impl Into<String>) {
        self.entry_text = value.into();
    }

    pub fn clarifying_question(&self) -> Option<&str> {
        self.clarifying_question.as_deref()
    }

    pub fn is_submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    /// Record the entropy verdict carried by the latest snapshot.
    pub fn observe_entropy(&mut self, entropy: Option<&EntropyStatus>) {
        self.last_entropy = entropy.cloned();
    }

    /// The clarifying question the operator may adopt, if the backend
    /// reports uncertainty and the prompt has not been dismissed.
    pub fn entropy_prompt(&self) -> Option<&str> {
        let question = self.last_entropy.as_ref()?.clarifying_question()?;
        if self.dismissed_message.as_deref() == Some(question) {
            return None;
        }
        Some(question)
    }

    pub fn take_events(&mut self) -> Vec<ComposerEvent> {
        std::mem::take(&mut self.events)
    }

    fn guard_context(&self) -> GuardContext {
        GuardContext {
            entry_blank: self.entry_text.trim().is_empty(),
            entry_len: self.entry_text.chars().count(),
            submission_in_flight: self.submission_in_flight,
            question_available: self.entropy_prompt().is_some(),
        }
    }

    pub async fn handle_action(
        &mut self,
        action: ComposerAction,
    ) -> Result<ActionApplied, GuardError> {
        self.guard.validate(action, self.guard_context())?;
        let applied = match action {
            ComposerAction::GenerateQuery => self.generate_query(),
            ComposerAction::Submit => self.submit().await,
            ComposerAction::Cancel => self.cancel(),
            ComposerAction::DismissEntropy => self.dismiss_entropy(),
        };
        Ok(applied)
    }

    fn generate_query(&mut self) -> ActionApplied {
        let Some(question) = self.entropy_prompt().map(str::to_string) else {
            return ActionApplied::NoChange;
        };
        self.clarifying_question = Some(question.clone());
        self.entry_text = question.clone();
        self.mode = ComposerMode::Clarification;
        // Adopting the question also puts the prompt away.
        self.dismissed_message = Some(question.clone());
        self.events.push(ComposerEvent::QueryGenerated { question });
        ActionApplied::StateChanged
    }

    async fn submit(&mut self) -> ActionApplied {
        let context = match self.mode {
            ComposerMode::Normal => EntryContext::Normal,
            ComposerMode::Clarification => EntryContext::Clarification,
        };
        let submission = EntrySubmission {
            content: self.entry_text.clone(),
            context,
        };
        self.submission_in_flight = true;
        let result = self.backend.submit_entry(&submission).await;
        self.submission_in_flight = false;
        match result {
            Ok(()) => {
                self.entry_text.clear();
                if self.mode == ComposerMode::Clarification {
                    self.clarifying_question = None;
                    self.mode = ComposerMode::Normal;
                }
                self.events.push(ComposerEvent::Submitted { context });
                // Show the effect without waiting for the next tick.
                self.refresh.request();
                ActionApplied::StateChanged
            }
            Err(err) => {
                warn!("entry submission failed: {err}");
                self.events.push(ComposerEvent::SubmissionFailed {
                    message: err.to_string(),
                });
                ActionApplied::NoChange
            }
        }
    }

    fn cancel(&mut self) -> ActionApplied {
        let changed = !self.entry_text.is_empty() || self.mode != ComposerMode::Normal;
        // The clarifying question banner is left in place on cancel.
        self.entry_text.clear();
        self.mode = ComposerMode::Normal;
        if changed {
            ActionApplied::StateChanged
        } else {
            ActionApplied::NoChange
        }
    }

    fn dismiss_entropy(&mut self) -> ActionApplied {
        let Some(message) = self.entropy_prompt().map(str::to_string) else {
            return ActionApplied::NoChange;
        };
        self.dismissed_message = Some(message);
        self.events.push(ComposerEvent::EntropyDismissed);
        ActionApplied::StateChanged
    }
}
