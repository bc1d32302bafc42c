//! Matching persisted selections against freshly fetched options.
//!
//! Identifiers may drift between dataset versions, so a persisted value is
//! matched against option values first and against display names second.
//! A renamed entry loses its selection.

use serde::{Deserialize, Serialize};

use crate::lookup::LocationOption;

/// Selection previously saved with the form, as the hosting page renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSelection {
    pub region: Option<String>,
    pub sub_region: Option<String>,
    /// Text of the sub-region option the page rendered as selected.
    #[serde(default)]
    pub sub_region_label: Option<String>,
    pub sub_sub_region: Option<String>,
    #[serde(default)]
    pub sub_sub_region_label: Option<String>,
}

impl PersistedSelection {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    pub fn with_sub_region(mut self, value: impl Into<String>) -> Self {
        self.sub_region = Some(value.into());
        self
    }

    pub fn with_sub_sub_region(mut self, value: impl Into<String>) -> Self {
        self.sub_sub_region = Some(value.into());
        self
    }
}

/// How a persisted selection was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Value,
    Label,
}

/// Find the option matching a persisted `value`, falling back to `label`
/// (or the value itself) compared against display names.
pub fn match_persisted<'a>(
    options: &'a [LocationOption],
    value: Option<&str>,
    label: Option<&str>,
) -> Option<(&'a LocationOption, MatchKind)> {
    let value = non_blank(value);
    let label = non_blank(label);

    if let Some(v) = value {
        if let Some(o) = options.iter().find(|o| o.value == v) {
            return Some((o, MatchKind::Value));
        }
    }

    options
        .iter()
        .find(|o| label.is_some_and(|l| o.name == l) || value.is_some_and(|v| o.name == v))
        .map(|o| (o, MatchKind::Label))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
