//! # Levelsmith Validation
//!
//! Judges an assembled [`Level`](levelsmith_shared::Level) three ways:
//!
//! - **validate**: every structural and navigability issue, in one pass
//! - **is_playable**: a cheap accept/reject subset
//! - **evaluate_quality**: a [0, 1] score from five sub-scores
//!
//! Findings are never errors. A level with twenty problems produces a
//! [`ValidationResult`](levelsmith_shared::ValidationResult) with twenty
//! issues and the caller decides what to do with it.
//!
//! ## Reachability
//!
//! Playability only asks whether a large enough connected region exists.
//! It does not check that the Player can reach the Exit;
//! [`ConnectivityMap::same_component`] is available for callers that want
//! that stronger guarantee.

#![deny(unsafe_code)]

pub mod connectivity;
pub mod error;
pub mod instrumented;
pub mod quality;
pub mod settings;
pub mod validator;

pub use connectivity::ConnectivityMap;
pub use error::{SettingsError, SettingsResult};
pub use instrumented::TracingValidator;
pub use quality::{QualityBreakdown, QualityWeights};
pub use settings::ValidationSettings;
pub use validator::{LevelReport, LevelValidator, Validate};
