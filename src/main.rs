//! Debug CLI for the Noova privacy subsystem.
//!
//! Wires a headless page against the configured storage backend so the
//! consent flow and the locally collected data can be inspected from a
//! terminal. `report` and `clear` mirror the accessors page code
//! exposes to visitors.

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use noova_privacy::adapters::{
    CookieConsentStore, FileCookieJar, HeadlessSurface, HeadlessThemeSwitcher, InMemoryEventBus,
    JsonFileStore, MemoryCookieJar, MemoryStore, StaticPageContext,
};
use noova_privacy::application::{
    AnalyticsRecorder, PreferencesStore, PrivacyRuntime, RuntimeSettings,
};
use noova_privacy::config::AppConfig;
use noova_privacy::domain::consent::CookieCategory;
use noova_privacy::ports::{ConsentStore, CookieJar, KeyValueStore};

/// Noova cookie consent and local analytics, headless.
#[derive(Parser, Debug)]
#[command(name = "noova-privacy", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the locally collected usage statistics.
    Report,
    /// Erase all locally stored analytics and preference data.
    Clear,
    /// Walk one page load through the consent flow.
    Demo {
        /// Decision to make when prompted.
        #[arg(long, value_enum, default_value_t = Choice::Accept)]
        choice: Choice,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Choice {
    /// Grant every category.
    Accept,
    /// Refuse every configurable category.
    Reject,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    config.validate()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Report => run_report(&config).await,
        Command::Clear => run_clear(&config).await,
        Command::Demo { choice } => run_demo(&config, choice).await,
    }
}

/// Origin-scoped stores for the configured backend. The tab-scoped
/// session never outlives one process run, so it is always in memory.
fn build_stores(
    config: &AppConfig,
) -> (
    Arc<dyn ConsentStore>,
    Arc<dyn KeyValueStore>,
    Arc<dyn KeyValueStore>,
) {
    let (jar, local): (Arc<dyn CookieJar>, Arc<dyn KeyValueStore>) =
        if config.storage.is_file_backed() {
            (
                Arc::new(FileCookieJar::new(config.storage.document_path("cookies.json"))),
                Arc::new(JsonFileStore::new(
                    config.storage.document_path("localstore.json"),
                )),
            )
        } else {
            (
                Arc::new(MemoryCookieJar::new()),
                Arc::new(MemoryStore::new()),
            )
        };

    let consent = Arc::new(CookieConsentStore::new(
        jar,
        config.consent.cookie_name.clone(),
        config.consent.expiry_days,
    ));
    let session: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    (consent, local, session)
}

fn runtime_settings(config: &AppConfig) -> RuntimeSettings {
    RuntimeSettings {
        cookie_name: config.consent.cookie_name.clone(),
        banner_delay: config.consent.banner_delay(),
        stats_key: config.analytics.stats_key.clone(),
        session_key: config.analytics.session_key.clone(),
        preferences_key: config.preferences.storage_key.clone(),
        max_stored_events: config.analytics.max_stored_events,
    }
}

fn recorder_for(config: &AppConfig, local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> AnalyticsRecorder {
    AnalyticsRecorder::new(
        local,
        session,
        Arc::new(StaticPageContext::new("/", "Noova")),
        config.analytics.stats_key.clone(),
        config.analytics.session_key.clone(),
        config.analytics.max_stored_events,
    )
}

async fn run_report(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let (_, local, session) = build_stores(config);
    let recorder = recorder_for(config, local, session);

    println!("{}", recorder.report().await?);
    Ok(())
}

async fn run_clear(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let (_, local, session) = build_stores(config);
    let recorder = recorder_for(config, local.clone(), session);
    let preferences = PreferencesStore::new(
        local,
        Arc::new(StaticPageContext::new("/", "Noova")),
        Arc::new(HeadlessThemeSwitcher::new()),
        config.preferences.storage_key.clone(),
    );

    recorder.clear_data().await?;
    preferences.clear_data().await?;
    println!("Local analytics and preference data cleared.");
    Ok(())
}

async fn run_demo(config: &AppConfig, choice: Choice) -> Result<(), Box<dyn Error>> {
    let (consent_store, local_store, session_store) = build_stores(config);
    let surface = Arc::new(HeadlessSurface::new());
    let page = Arc::new(StaticPageContext::new("/", "Noova"));
    let theme = Arc::new(HeadlessThemeSwitcher::new());
    let bus = Arc::new(InMemoryEventBus::new());

    let mut runtime = PrivacyRuntime::new(
        consent_store,
        local_store,
        session_store,
        bus.clone(),
        bus,
        surface.clone(),
        page.clone(),
        theme,
        runtime_settings(config),
    );

    runtime.on_page_load().await?;
    if surface.banner_visible() {
        println!("No stored decision; the banner prompted.");
    } else {
        println!("Stored decision found; the banner stayed hidden.");
    }

    match choice {
        Choice::Accept => runtime.accept_all().await?,
        Choice::Reject => runtime.reject_all().await?,
    }

    // One navigation and one interaction, as a page would produce
    page.navigate_to("/portfolio", "Portfolio - Noova");
    runtime.recorder().track_page_view().await?;
    runtime
        .recorder()
        .track_event("Demo", "Run", None)
        .await?;

    println!();
    for category in CookieCategory::CONFIGURABLE {
        let verdict = if runtime.has_consent(category) {
            "granted"
        } else {
            "refused"
        };
        println!("{}: {}", category, verdict);
    }
    println!();
    println!("{}", runtime.stats_report().await?);

    Ok(())
}
