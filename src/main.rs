use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use serde::Serialize;

use profile_projector::config::Config;
use profile_projector::logging::init_tracing;
use profile_projector::model::{ListingItem, UserId};
use profile_projector::observable::SubscriptionBag;
use profile_projector::source::{FixtureSource, Navigator};
use profile_projector::ui::profile::ProfileView;
use profile_projector::{ProfileDependencies, ProfileStateProjector};

/// Render a profile screen's state from fixture data.
#[derive(Debug, Parser)]
#[command(name = "profile-projector", version)]
struct Cli {
    /// Config file (default: ~/.config/profile-projector/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON fixture with profile and listing data.
    #[arg(long)]
    fixtures: Option<PathBuf>,
    /// User to show (default: config, then the fixture's user).
    #[arg(long)]
    user_id: Option<u64>,
    /// Segment index: 0 products, 1 ads & tags, 2 followers, 3 following.
    #[arg(long)]
    segment: Option<usize>,
    /// Search text applied after the listings load.
    #[arg(long)]
    search: Option<String>,
    /// Simulate a tap on the language button.
    #[arg(long)]
    language: bool,
    /// Print the projected view as JSON.
    #[arg(long)]
    json: bool,
    /// Log to stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Navigator for a headless run: there is no screen to open.
struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn open_language_selector(&self) {
        tracing::info!("Language selector requested");
        eprintln!("-> language selector");
    }
}

#[derive(Serialize)]
struct Report {
    view: ProfileView,
    errors: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let fixtures = cli
        .fixtures
        .clone()
        .or_else(|| config.fixtures.path.clone())
        .context("No fixture file: pass --fixtures or set [fixtures] path in the config")?;
    let source = Arc::new(FixtureSource::load_from(&fixtures)?);

    let user_id = cli
        .user_id
        .or(config.profile.user_id)
        .map(UserId)
        .or_else(|| source.fixture().user.as_ref().map(|user| user.id))
        .unwrap_or_default();

    let deps = ProfileDependencies {
        profiles: source.clone(),
        products: source,
        cache: config.cache.build(),
        navigator: Arc::new(LoggingNavigator),
    };
    let projector = ProfileStateProjector::new(user_id, config.initial_segment(), deps);

    let errors = Arc::new(Mutex::new(Vec::new()));
    let mut bag = SubscriptionBag::new();
    let sink = Arc::clone(&errors);
    projector
        .errors()
        .subscribe(move |error| sink.lock().push(error.to_string()))
        .disposed_by(&mut bag);

    projector.fetch_data();
    let segment_index = cli.segment.unwrap_or(config.profile.initial_segment);
    projector.did_select_segment(segment_index)?;
    projector.settled().await;

    if let Some(search) = cli.search {
        projector.set_search_text(search);
    }
    if cli.language {
        projector.get_language_tapped();
    }

    let report = Report {
        view: projector.view(),
        errors: errors.lock().clone(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    let view = &report.view;
    let stale = if view.from_cache { " (cached)" } else { "" };
    println!("{} {}{}", view.display_name, view.username, stale);
    if !view.location.is_empty() {
        println!("{}", view.location);
    }
    println!(
        "{} followers · {} following",
        view.follower_count, view.following_count
    );
    println!("segment: {}", view.selected_segment);

    for section in &view.sections {
        println!();
        println!("[{}] {} item(s)", section.title, section.items.len());
        for item in &section.items {
            println!("  {}", describe(item));
        }
    }

    for error in &report.errors {
        eprintln!("error: {}", error);
    }
}

fn describe(item: &ListingItem) -> String {
    match item {
        ListingItem::Product(product) if product.offer > 0.0 => format!(
            "{} - {:.2} {} ({:.0}% off)",
            product.name,
            product.discounted_price(),
            product.currency,
            product.offer
        ),
        ListingItem::Product(product) => {
            format!("{} - {:.2} {}", product.name, product.price, product.currency)
        }
        ListingItem::Advertisement(ad) => match &ad.link {
            Some(link) => format!("ad #{} → {}", ad.id, link),
            None => format!("ad #{}", ad.id),
        },
        ListingItem::Tag(tag) => format!("#{}", tag.name),
        ListingItem::User(user) => format!("{} @{}", user.name, user.user_name),
    }
}
