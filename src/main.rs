use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use location_cascade::cascade::{
    FormState, LocationCascadeController, Locale, PersistedSelection, Placeholders,
};
use location_cascade::config::CascadeConfig;
use location_cascade::lookup::{DatasetLookup, HttpLookup, LocationLookup};
use location_cascade::render::render_form;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Location Cascade: city / district / neighborhood selection for admin forms
///
/// Loads a form with a previously saved selection, restores it against the
/// lookup service, optionally simulates user changes, and prints the
/// resulting field state.
///
/// Examples:
///   cascade --builtin --city Istanbul --district Kadıköy --neighborhood Moda
///   cascade --base-url http://localhost:8000 --city Izmir
///   cascade --builtin --city Istanbul --change-city Ankara --change-district Çankaya
///   cascade --dataset locations.json --locale en --city Bursa
#[derive(Parser)]
#[command(name = "cascade", version, about, long_about = None)]
struct Cli {
    /// Config file. Defaults to ~/.cascade/config.json.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Admin backend origin (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Serve lookups from a hierarchical JSON dataset instead of HTTP.
    #[arg(long, conflicts_with = "builtin")]
    dataset: Option<PathBuf>,

    /// Serve lookups from the built-in sample dataset.
    #[arg(long)]
    builtin: bool,

    /// Placeholder language: "tr" or "en".
    #[arg(long)]
    locale: Option<Locale>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Saved city.
    #[arg(long)]
    city: Option<String>,

    /// Saved district value.
    #[arg(long)]
    district: Option<String>,

    /// Saved district label, used when the value no longer matches.
    #[arg(long)]
    district_label: Option<String>,

    /// Saved neighborhood value.
    #[arg(long)]
    neighborhood: Option<String>,

    /// Saved neighborhood label.
    #[arg(long)]
    neighborhood_label: Option<String>,

    /// After loading, select this city.
    #[arg(long)]
    change_city: Option<String>,

    /// After loading, select this district.
    #[arg(long)]
    change_district: Option<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    restoration: location_cascade::cascade::Restoration,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    changes: Vec<(&'a str, location_cascade::cascade::Transition)>,
    form: FormState,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,location_cascade=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    let cli = Cli::parse();

    // ── Configuration ───────────────────────────────────────────

    let mut config = match &cli.config {
        Some(path) => CascadeConfig::load_from(path)?,
        None => CascadeConfig::load()?,
    };
    if let Some(ref url) = cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }

    // ── Lookup service ──────────────────────────────────────────

    let lookup: Arc<dyn LocationLookup> = if cli.builtin {
        tracing::info!("using built-in dataset");
        Arc::new(DatasetLookup::builtin())
    } else if let Some(ref path) = cli.dataset {
        tracing::info!(path = %path.display(), "using dataset file");
        let dataset = DatasetLookup::load(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        Arc::new(dataset)
    } else {
        let http = HttpLookup::from_config(&config);
        tracing::info!(districts = http.districts_url(), "using HTTP lookup");
        Arc::new(http)
    };

    // ── Load the form ───────────────────────────────────────────

    let persisted = PersistedSelection {
        region: cli.city.clone(),
        sub_region: cli.district.clone(),
        sub_region_label: cli.district_label.clone(),
        sub_sub_region: cli.neighborhood.clone(),
        sub_sub_region_label: cli.neighborhood_label.clone(),
    };
    let placeholders = Placeholders::for_locale(config.locale);
    let form = FormState::seeded(&config.region_choices, &persisted, placeholders);
    let controller = LocationCascadeController::new(lookup, form, config.locale);

    let restoration = controller.initialize_from_persisted_state().await;

    // ── Simulated interaction ───────────────────────────────────

    let mut changes = Vec::new();
    if let Some(ref city) = cli.change_city {
        changes.push(("city", controller.select_region(city).await));
    }
    if let Some(ref district) = cli.change_district {
        changes.push(("district", controller.select_sub_region(district).await));
    }

    // ── Output ──────────────────────────────────────────────────

    let form = controller.snapshot().await;
    eprint!("{}", render_form(&form));

    let output = Output {
        restoration,
        changes,
        form,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
