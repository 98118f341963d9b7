//! Wire-facing data model for the Echoform inference backend.
//!
//! These types mirror the JSON payloads exchanged with the backend's four
//! endpoints. They carry no behavior beyond decoding defaults: anything the
//! backend may omit (`signals`, `drift_status`) decodes to an explicit empty
//! value so downstream consumers never see an "undefined" field.

use serde::Deserialize;
use serde::Serialize;

/// Maximum accepted length for operator entry text, in characters.
pub const MAX_ENTRY_LEN: usize = 500;

/// An atomic behavioral observation attached to a hypothesis.
///
/// The client only ever counts these; the fields are decoded so the record
/// round-trips, not because the core interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub axis: String,
    #[serde(default)]
    pub direction: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub decay_factor: f64,
}

/// A candidate explanation of the identity model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: i64,
    pub label: String,
    /// Current confidence in `[0, 1]`.
    pub confidence_score: f64,
    /// Instability measure in `[0, 1)`; absent while the backend lacks
    /// enough history to compute one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Observations backing this hypothesis. Absent on the wire decodes to
    /// an empty list.
    #[serde(default)]
    pub signals: Vec<Signal>,
}

impl Hypothesis {
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }
}

/// Backend ambiguity verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyState {
    Stable,
    Uncertainty,
}

/// Result of `GET /entropy-check`. When `status` is
/// [`EntropyState::Uncertainty`], `message` doubles as the candidate
/// clarifying question shown to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyStatus {
    pub status: EntropyState,
    pub message: String,
}

impl EntropyStatus {
    /// The clarifying question carried by an uncertainty verdict, if any.
    pub fn clarifying_question(&self) -> Option<&str> {
        match self.status {
            EntropyState::Uncertainty if !self.message.is_empty() => Some(&self.message),
            _ => None,
        }
    }
}

/// Tag distinguishing a fresh observation from an answer to a clarifying
/// question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryContext {
    #[default]
    Normal,
    Clarification,
}

/// Body of `POST /entry`. Constructed at submission time, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySubmission {
    pub content: String,
    pub context: EntryContext,
}

/// Envelope of `GET /dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardPage {
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    /// Human-readable drift summary; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_status: Option<String>,
}

/// Envelope of `GET /inference-logs`. Entries are opaque display strings,
/// most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsPage {
    #[serde(default)]
    pub logs: Vec<String>,
}
