//! Selection fields: the three dropdowns of the location form.

use serde::Serialize;
use std::fmt;

use crate::lookup::LocationOption;

/// Which level of the hierarchy a field selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// City.
    Region,
    /// District.
    SubRegion,
    /// Neighborhood.
    SubSubRegion,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region => write!(f, "city"),
            Self::SubRegion => write!(f, "district"),
            Self::SubSubRegion => write!(f, "neighborhood"),
        }
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// Non-data entry ("select…", "loading…"). Its value is always empty.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl SelectOption {
    pub fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
            placeholder: true,
        }
    }

    pub fn data(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            placeholder: false,
        }
    }
}

impl From<&LocationOption> for SelectOption {
    fn from(o: &LocationOption) -> Self {
        Self::data(o.value.clone(), o.name.clone())
    }
}

/// A dropdown: its option list, current selection and enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    pub kind: FieldKind,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub disabled: bool,
}

impl SelectField {
    /// A disabled field holding a single placeholder option.
    pub fn placeholder_only(kind: FieldKind, text: &str) -> Self {
        Self {
            kind,
            options: vec![SelectOption::placeholder(text)],
            selected: None,
            disabled: true,
        }
    }

    /// An enabled field: `placeholder` first, then one option per entry.
    pub fn populated(
        kind: FieldKind,
        placeholder: &str,
        entries: &[LocationOption],
        selected: Option<&str>,
    ) -> Self {
        let mut options = Vec::with_capacity(entries.len() + 1);
        options.push(SelectOption::placeholder(placeholder));
        options.extend(entries.iter().map(SelectOption::from));
        Self {
            kind,
            options,
            selected: selected.map(str::to_string),
            disabled: false,
        }
    }

    /// The selected value, if it is non-blank.
    pub fn value(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }

    /// The selected option.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        let value = self.value()?;
        self.data_options().find(|o| o.value == value)
    }

    /// Options excluding placeholders.
    pub fn data_options(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter().filter(|o| !o.placeholder)
    }

    /// Label of the leading placeholder, if any.
    pub fn placeholder_text(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.placeholder)
            .map(|o| o.label.as_str())
    }

    /// Select `value`. A value that is not among the data options clears the
    /// selection. Returns whether the value was accepted.
    pub fn select(&mut self, value: &str) -> bool {
        if self.data_options().any(|o| o.value == value) {
            self.selected = Some(value.to_string());
            true
        } else {
            self.selected = None;
            false
        }
    }
}
