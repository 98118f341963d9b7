use echoform_protocol::EntryContext;
use serde::Deserialize;
use serde::Serialize;

/// Observable composer outcomes, drained via
/// [`super::EntryComposer::take_events`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ComposerEvent {
    QueryGenerated { question: String },
    Submitted { context: EntryContext },
    SubmissionFailed { message: String },
    EntropyDismissed,
}
