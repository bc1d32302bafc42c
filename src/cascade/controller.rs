//! LocationCascadeController: keeps the district and neighborhood fields
//! consistent with the city and district selections.
//!
//! Handlers lock the form only to read inputs and to apply a transition; the
//! lookup itself runs unlocked. Each dependent field carries a request
//! sequence number, and a response is applied only if no newer request for
//! that field was issued meanwhile (latest request wins).

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use super::field::FieldKind;
use super::labels::{Locale, Placeholders};
use super::restore::{match_persisted, MatchKind, PersistedSelection};
use super::state::FormState;
use crate::lookup::{LocationLookup, LocationOption, LookupOutcome};

/// What a handler did to its dependent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Parent blank: field cleared without a request.
    Cleared,
    /// Field populated with this many options.
    Populated(usize),
    /// Lookup returned no options.
    NotFound,
    /// Lookup failed.
    Failed,
    /// A newer request for the same field was issued; the response was dropped.
    Superseded,
}

impl Transition {
    fn of(outcome: &LookupOutcome<LocationOption>) -> Self {
        match outcome {
            LookupOutcome::Found(items) => Self::Populated(items.len()),
            LookupOutcome::Empty => Self::NotFound,
            LookupOutcome::Failed(_) => Self::Failed,
        }
    }
}

/// Result of restoring a persisted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Restoration {
    pub sub_region: Option<Transition>,
    pub sub_sub_region: Option<Transition>,
    pub sub_region_match: Option<MatchKind>,
    pub sub_sub_region_match: Option<MatchKind>,
}

impl Restoration {
    fn nothing() -> Self {
        Self {
            sub_region: None,
            sub_sub_region: None,
            sub_region_match: None,
            sub_sub_region_match: None,
        }
    }
}

struct Inner {
    form: FormState,
    sub_region_seq: u64,
    sub_sub_region_seq: u64,
}

impl Inner {
    fn apply(&mut self, f: impl FnOnce(FormState) -> FormState) {
        self.form = f(self.form.clone());
    }

    fn issue_sub_region(&mut self) -> u64 {
        self.sub_region_seq += 1;
        self.sub_region_seq
    }

    fn issue_sub_sub_region(&mut self) -> u64 {
        self.sub_sub_region_seq += 1;
        self.sub_sub_region_seq
    }
}

/// The cascade controller for one form.
pub struct LocationCascadeController {
    lookup: Arc<dyn LocationLookup>,
    placeholders: &'static Placeholders,
    inner: Mutex<Inner>,
}

impl LocationCascadeController {
    /// Bind to a form whose fields were already written by the hosting page.
    pub fn new(lookup: Arc<dyn LocationLookup>, form: FormState, locale: Locale) -> Self {
        Self {
            lookup,
            placeholders: Placeholders::for_locale(locale),
            inner: Mutex::new(Inner {
                form,
                sub_region_seq: 0,
                sub_sub_region_seq: 0,
            }),
        }
    }

    /// Current field state.
    pub async fn snapshot(&self) -> FormState {
        self.inner.lock().await.form.clone()
    }

    // ─── User interaction ───────────────────────────────────────

    /// Set the city field and cascade.
    pub async fn select_region(&self, value: &str) -> Transition {
        {
            let mut inner = self.inner.lock().await;
            if !inner.form.region.select(value) {
                debug!(value, "city is not among the choices; selection cleared");
            }
        }
        self.on_region_changed().await
    }

    /// Set the district field and cascade.
    pub async fn select_sub_region(&self, value: &str) -> Transition {
        {
            let mut inner = self.inner.lock().await;
            if inner.form.sub_region.disabled || !inner.form.sub_region.select(value) {
                debug!(value, "district is not selectable; selection cleared");
                inner.form.sub_region.selected = None;
            }
        }
        self.on_sub_region_changed().await
    }

    /// Set the neighborhood field. Nothing depends on it.
    pub async fn select_sub_sub_region(&self, value: &str) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.form.sub_sub_region.disabled {
            inner.form.sub_sub_region.selected = None;
            return false;
        }
        inner.form.sub_sub_region.select(value)
    }

    // ─── Change handlers ────────────────────────────────────────

    /// The city changed: reload districts, reset neighborhoods.
    pub async fn on_region_changed(&self) -> Transition {
        let p = self.placeholders;

        let (city, seq) = {
            let mut inner = self.inner.lock().await;
            let seq = inner.issue_sub_region();
            inner.issue_sub_sub_region();

            let city = inner.form.region.value().map(|c| c.trim().to_string());
            debug!(city = ?city, seq, "city changed");
            match city {
                None => {
                    inner.apply(|f| f.region_cleared(p));
                    return Transition::Cleared;
                }
                Some(city) => {
                    inner.apply(|f| f.region_loading(p));
                    (city, seq)
                }
            }
        };

        let outcome = self.fetch_districts(&city).await;

        let mut inner = self.inner.lock().await;
        if inner.sub_region_seq != seq {
            let current = inner.sub_region_seq;
            debug!(%city, seq, current, "discarding stale district response");
            return Transition::Superseded;
        }
        inner.apply(|f| f.with_sub_regions(&outcome, None, p));
        Transition::of(&outcome)
    }

    /// The district changed: reload neighborhoods.
    pub async fn on_sub_region_changed(&self) -> Transition {
        let p = self.placeholders;

        let (city, district, seq) = {
            let mut inner = self.inner.lock().await;
            let seq = inner.issue_sub_sub_region();

            let city = inner.form.region.value().map(|c| c.trim().to_string());
            let district = inner.form.sub_region.value().map(|d| d.trim().to_string());
            debug!(city = ?city, district = ?district, seq, "district changed");
            match (city, district) {
                (Some(city), Some(district)) => {
                    inner.apply(|f| f.sub_region_loading(p));
                    (city, district, seq)
                }
                _ => {
                    inner.apply(|f| f.sub_region_cleared(p));
                    return Transition::Cleared;
                }
            }
        };

        let outcome = self.fetch_neighborhoods(&city, &district).await;

        let mut inner = self.inner.lock().await;
        if inner.sub_sub_region_seq != seq {
            debug!(%city, %district, seq, "discarding stale neighborhood response");
            return Transition::Superseded;
        }
        inner.apply(|f| f.with_sub_sub_regions(&outcome, None, p));
        Transition::of(&outcome)
    }

    // ─── Initialization ─────────────────────────────────────────

    /// Load option lists for the values the hosting page wrote into the
    /// fields and re-select them.
    pub async fn initialize_from_persisted_state(&self) -> Restoration {
        let p = self.placeholders;
        let mut report = Restoration::nothing();

        let (persisted, sub_seq) = {
            let mut inner = self.inner.lock().await;
            let persisted = inner.form.persisted();
            let sub_seq = inner.issue_sub_region();
            inner.issue_sub_sub_region();
            debug!(?persisted, "initializing from persisted values");

            if persisted.region.as_deref().map_or(true, |r| r.trim().is_empty()) {
                inner.apply(|f| f.region_cleared(p));
                return report;
            }
            inner.apply(|f| f.region_loading(p));
            (persisted, sub_seq)
        };
        let city = persisted.region.as_deref().unwrap_or_default().trim().to_string();

        let outcome = self.fetch_districts(&city).await;
        report.sub_region = Some(Transition::of(&outcome));

        let matched = match &outcome {
            LookupOutcome::Found(items) => match_persisted(
                items,
                persisted.sub_region.as_deref(),
                persisted.sub_region_label.as_deref(),
            )
            .map(|(o, kind)| (o.value.clone(), kind)),
            _ => None,
        };

        let (district, sub_sub_seq) = {
            let mut inner = self.inner.lock().await;
            if inner.sub_region_seq != sub_seq {
                debug!(%city, "initialization superseded by a newer city change");
                report.sub_region = Some(Transition::Superseded);
                return report;
            }
            let selected = matched.as_ref().map(|(v, _)| v.as_str());
            inner.apply(|f| f.with_sub_regions(&outcome, selected, p));

            let Some((district, kind)) = matched else {
                debug!(%city, "no persisted district restored");
                return report;
            };
            debug!(%city, %district, ?kind, "restored district");
            report.sub_region_match = Some(kind);

            let seq = inner.issue_sub_sub_region();
            inner.apply(|f| f.sub_region_loading(p));
            (district, seq)
        };

        let outcome = self.fetch_neighborhoods(&city, &district).await;
        report.sub_sub_region = Some(Transition::of(&outcome));

        let matched = match &outcome {
            LookupOutcome::Found(items) => match_persisted(
                items,
                persisted.sub_sub_region.as_deref(),
                persisted.sub_sub_region_label.as_deref(),
            )
            .map(|(o, kind)| (o.value.clone(), kind)),
            _ => None,
        };

        let mut inner = self.inner.lock().await;
        if inner.sub_sub_region_seq != sub_sub_seq {
            debug!(%city, %district, "neighborhood restore superseded");
            report.sub_sub_region = Some(Transition::Superseded);
            return report;
        }
        let selected = matched.as_ref().map(|(v, _)| v.as_str());
        inner.apply(|f| f.with_sub_sub_regions(&outcome, selected, p));
        report.sub_sub_region_match = matched.as_ref().map(|(_, kind)| *kind);
        if let Some(value) = selected {
            debug!(%city, %district, neighborhood = value, "restored neighborhood");
        }
        report
    }

    /// Wait until the hosting page hands over the persisted selection, write
    /// it into the form, then initialize. A dropped sender leaves the
    /// dependent fields cleared.
    pub async fn initialize_when_ready(
        &self,
        ready: oneshot::Receiver<PersistedSelection>,
    ) -> Restoration {
        let p = self.placeholders;
        match ready.await {
            Ok(persisted) => {
                {
                    let mut inner = self.inner.lock().await;
                    inner.apply(|f| f.with_persisted(&persisted, p));
                }
                self.initialize_from_persisted_state().await
            }
            Err(_) => {
                debug!("form never signalled readiness");
                let mut inner = self.inner.lock().await;
                inner.issue_sub_region();
                inner.issue_sub_sub_region();
                inner.apply(|f| f.region_cleared(p));
                Restoration::nothing()
            }
        }
    }

    // ─── Lookups ────────────────────────────────────────────────

    async fn fetch_districts(&self, city: &str) -> LookupOutcome<LocationOption> {
        let outcome = LookupOutcome::from(self.lookup.districts(city).await);
        log_outcome(FieldKind::SubRegion, city, &outcome);
        outcome
    }

    async fn fetch_neighborhoods(
        &self,
        city: &str,
        district: &str,
    ) -> LookupOutcome<LocationOption> {
        let outcome = LookupOutcome::from(self.lookup.neighborhoods(city, district).await);
        log_outcome(FieldKind::SubSubRegion, district, &outcome);
        outcome
    }
}

fn log_outcome(kind: FieldKind, parent: &str, outcome: &LookupOutcome<LocationOption>) {
    match outcome {
        LookupOutcome::Found(items) => {
            debug!(field = %kind, parent, count = items.len(), "options received")
        }
        LookupOutcome::Empty => debug!(field = %kind, parent, "no options found"),
        LookupOutcome::Failed(e) => warn!(field = %kind, parent, error = %e, "lookup failed"),
    }
}
