//! Cascading city → district → neighborhood selection.
//!
//! [`FormState`] is the selection state with pure transitions;
//! [`LocationCascadeController`] drives it from change events and lookups.

pub mod controller;
pub mod field;
pub mod labels;
pub mod restore;
pub mod state;

pub use controller::{LocationCascadeController, Restoration, Transition};
pub use field::{FieldKind, SelectField, SelectOption};
pub use labels::{Locale, Placeholders};
pub use restore::{match_persisted, MatchKind, PersistedSelection};
pub use state::FormState;
