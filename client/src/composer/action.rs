use serde::Deserialize;
use serde::Serialize;

/// Operator intents accepted by the composer. Free-text edits go through
/// [`super::EntryComposer::set_entry_text`]; everything that can change the
/// interaction mode is an explicit action so the transition table stays in
/// one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComposerAction {
    /// Adopt the pending clarifying question as the entry being composed.
    GenerateQuery,
    /// Send the composed entry to the backend.
    Submit,
    /// Abandon the current composition and return to the baseline.
    Cancel,
    /// Hide the current entropy prompt without composing an answer.
    DismissEntropy,
}
