#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;
use location_cascade::cascade::{
    FormState, LocationCascadeController, Locale, PersistedSelection, Placeholders,
};
use location_cascade::lookup::{LocationLookup, LocationOption, LookupError};

type Reply = Result<Vec<LocationOption>, LookupError>;

/// Canned replies keyed by city and by (city, district); counts calls.
#[derive(Default)]
pub struct ScriptedLookup {
    districts: HashMap<String, Reply>,
    neighborhoods: HashMap<(String, String), Reply>,
    calls: AtomicUsize,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn districts(mut self, city: &str, reply: Reply) -> Self {
        self.districts.insert(city.to_string(), reply);
        self
    }

    pub fn neighborhoods(mut self, city: &str, district: &str, reply: Reply) -> Self {
        self.neighborhoods
            .insert((city.to_string(), district.to_string()), reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationLookup for ScriptedLookup {
    async fn districts(&self, city: &str) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.districts.get(city).cloned().unwrap_or(Ok(vec![]))
    }

    async fn neighborhoods(&self, city: &str, district: &str) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.neighborhoods
            .get(&(city.to_string(), district.to_string()))
            .cloned()
            .unwrap_or(Ok(vec![]))
    }
}

type Gates = Mutex<HashMap<String, oneshot::Receiver<Reply>>>;

/// Replies released by the test through oneshot channels, so responses can
/// arrive in any order. Districts are gated by city, neighborhoods by
/// district; ungated lookups answer with an empty list.
#[derive(Default)]
pub struct GatedLookup {
    cities: Gates,
    districts: Gates,
}

impl GatedLookup {
    pub fn gate(&self, city: &str) -> oneshot::Sender<Reply> {
        open_gate(&self.cities, city)
    }

    pub fn gate_district(&self, district: &str) -> oneshot::Sender<Reply> {
        open_gate(&self.districts, district)
    }
}

fn open_gate(gates: &Gates, key: &str) -> oneshot::Sender<Reply> {
    let (tx, rx) = oneshot::channel();
    gates.lock().unwrap().insert(key.to_string(), rx);
    tx
}

async fn pass_gate(gates: &Gates, key: &str) -> Reply {
    let rx = gates.lock().unwrap().remove(key);
    match rx {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(LookupError::Network("gate dropped".into()))),
        None => Ok(vec![]),
    }
}

#[async_trait]
impl LocationLookup for GatedLookup {
    async fn districts(&self, city: &str) -> Reply {
        pass_gate(&self.cities, city).await
    }

    async fn neighborhoods(&self, _city: &str, district: &str) -> Reply {
        pass_gate(&self.districts, district).await
    }
}

pub fn choices() -> Vec<String> {
    vec!["Istanbul".into(), "Ankara".into(), "Izmir".into()]
}

pub fn blank_controller(lookup: Arc<dyn LocationLookup>) -> LocationCascadeController {
    let form = FormState::new(&choices(), Placeholders::for_locale(Locale::Tr));
    LocationCascadeController::new(lookup, form, Locale::Tr)
}

pub fn seeded_controller(
    lookup: Arc<dyn LocationLookup>,
    persisted: &PersistedSelection,
) -> LocationCascadeController {
    let form = FormState::seeded(&choices(), persisted, Placeholders::for_locale(Locale::Tr));
    LocationCascadeController::new(lookup, form, Locale::Tr)
}

pub fn istanbul_districts() -> Vec<LocationOption> {
    vec![
        LocationOption::new("34-01", "Kadıköy"),
        LocationOption::new("34-02", "Beşiktaş"),
        LocationOption::new("34-03", "Üsküdar"),
    ]
}

pub fn kadikoy_neighborhoods() -> Vec<LocationOption> {
    vec![
        LocationOption::new("34-01-01", "Moda"),
        LocationOption::new("34-01-02", "Caferağa"),
    ]
}
