//! The selection state of the form and its pure transitions.
//!
//! Every transition consumes a [`FormState`] and returns the next one; the
//! controller only decides *which* transition to apply and when.

use serde::Serialize;

use super::field::{FieldKind, SelectField, SelectOption};
use super::labels::Placeholders;
use super::restore::PersistedSelection;
use crate::lookup::{LocationOption, LookupOutcome};

/// City, district and neighborhood fields as currently shown.
///
/// Invariant: a dependent field is enabled only when its parent has a value
/// and the lookup for that value returned at least one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub region: SelectField,
    pub sub_region: SelectField,
    pub sub_sub_region: SelectField,
}

impl FormState {
    /// A blank form: region choices enabled, both dependents cleared.
    pub fn new(region_choices: &[String], p: &Placeholders) -> Self {
        let entries: Vec<LocationOption> =
            region_choices.iter().map(LocationOption::named).collect();
        Self {
            region: SelectField::populated(FieldKind::Region, p.select_city, &entries, None),
            sub_region: cleared(FieldKind::SubRegion, p),
            sub_sub_region: cleared(FieldKind::SubSubRegion, p),
        }
    }

    /// The form as the hosting page renders an existing record: the saved
    /// values are present but the dependent option lists are not loaded yet.
    pub fn seeded(
        region_choices: &[String],
        persisted: &PersistedSelection,
        p: &Placeholders,
    ) -> Self {
        Self::new(region_choices, p).with_persisted(persisted, p)
    }

    /// Write `persisted` into the fields, keeping the region choices.
    pub fn with_persisted(self, persisted: &PersistedSelection, p: &Placeholders) -> Self {
        let mut state = self.region_cleared(p);
        state.region.selected = None;
        if let Some(region) = persisted.region.as_deref() {
            if !state.region.select(region) {
                // The saved city is authoritative even when it is no longer a choice.
                state.region.options.push(SelectOption::data(region, region));
                state.region.selected = Some(region.to_string());
            }
        }
        state.sub_region = seeded_field(
            FieldKind::SubRegion,
            persisted.sub_region.as_deref(),
            persisted.sub_region_label.as_deref(),
            p,
        );
        state.sub_sub_region = seeded_field(
            FieldKind::SubSubRegion,
            persisted.sub_sub_region.as_deref(),
            persisted.sub_sub_region_label.as_deref(),
            p,
        );
        state
    }

    /// Read the saved selection back out of the fields.
    pub fn persisted(&self) -> PersistedSelection {
        PersistedSelection {
            region: self.region.value().map(str::to_string),
            sub_region: self.sub_region.value().map(str::to_string),
            sub_region_label: self.sub_region.selected_option().map(|o| o.label.clone()),
            sub_sub_region: self.sub_sub_region.value().map(str::to_string),
            sub_sub_region_label: self.sub_sub_region.selected_option().map(|o| o.label.clone()),
        }
    }

    // ─── Region transitions ─────────────────────────────────────

    /// Parent unset: both dependents cleared and disabled.
    pub fn region_cleared(self, p: &Placeholders) -> Self {
        Self {
            sub_region: cleared(FieldKind::SubRegion, p),
            sub_sub_region: cleared(FieldKind::SubSubRegion, p),
            ..self
        }
    }

    /// District fetch in flight.
    pub fn region_loading(self, p: &Placeholders) -> Self {
        Self {
            sub_region: loading(FieldKind::SubRegion, p),
            sub_sub_region: cleared(FieldKind::SubSubRegion, p),
            ..self
        }
    }

    /// District fetch finished. The neighborhood field is always reset.
    pub fn with_sub_regions(
        self,
        outcome: &LookupOutcome<LocationOption>,
        selected: Option<&str>,
        p: &Placeholders,
    ) -> Self {
        Self {
            sub_region: resolved(FieldKind::SubRegion, outcome, selected, p),
            sub_sub_region: cleared(FieldKind::SubSubRegion, p),
            ..self
        }
    }

    // ─── Sub-region transitions ─────────────────────────────────

    pub fn sub_region_cleared(self, p: &Placeholders) -> Self {
        Self {
            sub_sub_region: cleared(FieldKind::SubSubRegion, p),
            ..self
        }
    }

    pub fn sub_region_loading(self, p: &Placeholders) -> Self {
        Self {
            sub_sub_region: loading(FieldKind::SubSubRegion, p),
            ..self
        }
    }

    pub fn with_sub_sub_regions(
        self,
        outcome: &LookupOutcome<LocationOption>,
        selected: Option<&str>,
        p: &Placeholders,
    ) -> Self {
        Self {
            sub_sub_region: resolved(FieldKind::SubSubRegion, outcome, selected, p),
            ..self
        }
    }
}

/// Disabled with the "select…" placeholder.
pub fn cleared(kind: FieldKind, p: &Placeholders) -> SelectField {
    SelectField::placeholder_only(kind, p.select(kind))
}

/// Disabled with the "loading…" placeholder.
pub fn loading(kind: FieldKind, p: &Placeholders) -> SelectField {
    SelectField::placeholder_only(kind, p.loading)
}

/// Field contents for a finished lookup.
pub fn resolved(
    kind: FieldKind,
    outcome: &LookupOutcome<LocationOption>,
    selected: Option<&str>,
    p: &Placeholders,
) -> SelectField {
    match outcome {
        LookupOutcome::Found(entries) => {
            let mut field = SelectField::populated(kind, p.select(kind), entries, None);
            if let Some(value) = selected {
                field.select(value);
            }
            field
        }
        LookupOutcome::Empty => SelectField::placeholder_only(kind, p.not_found(kind)),
        LookupOutcome::Failed(_) => SelectField::placeholder_only(kind, p.error),
    }
}

fn seeded_field(
    kind: FieldKind,
    value: Option<&str>,
    label: Option<&str>,
    p: &Placeholders,
) -> SelectField {
    let mut field = cleared(kind, p);
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        field
            .options
            .push(SelectOption::data(value, label.unwrap_or(value)));
        field.selected = Some(value.to_string());
    }
    field
}
