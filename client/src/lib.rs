//! Client-side core for the Echoform probabilistic identity engine.
//!
//! The backend is an external collaborator reached through four HTTP
//! operations; this crate owns everything on the near side of that wire:
//! the recurring snapshot sync loop ([`sync`]), the volatility → stability
//! classification ([`stability`]), the entry/clarification composer
//! ([`composer`]), and the CSV export of the visualized data ([`export`]).
//! Presentation is out of scope; UI layers consume the snapshot,
//! classification, and composer events to render.

pub mod api;
pub mod composer;
pub mod config;
pub mod export;
pub mod stability;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::HttpBackend;
pub use api::InferenceBackend;
pub use api::TransportError;
pub use composer::ActionApplied;
pub use composer::ComposerAction;
pub use composer::ComposerEvent;
pub use composer::ComposerMode;
pub use composer::EntryComposer;
pub use composer::GuardError;
pub use composer::InputGuard;
pub use config::ClientConfig;
pub use export::ExportArtifact;
pub use export::export_csv;
pub use stability::Stability;
pub use stability::StabilitySeverity;
pub use sync::RefreshNudge;
pub use sync::Snapshot;
pub use sync::SnapshotStats;
pub use sync::SyncHandle;
pub use sync::SyncService;
