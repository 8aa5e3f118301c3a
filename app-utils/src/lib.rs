use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use canvas_api::DEFAULT_BASE_URL;
use canvas_api::cache::Cache;
use canvas_api::client::Client;
use canvas_api::course_selector::CourseSelector;
use dotenvy::dotenv;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};
use url::Url;

/// Builds the Canvas client from the environment: opens the sample-data
/// cache, resolves the base URL, and picks up the acting user and the
/// optional course selector.
pub fn init_from_env() -> Result<InitFromEnv> {
    let _ = dotenv();

    let user = env::var("CANVAS_USER")
        .context("CANVAS_USER must name a cached identity (e.g. `hermione`) or hold an API token")?;
    let cache_path: PathBuf = env::var("CACHE_PATH")
        .unwrap_or_else(|_| "sample_canvas_data.db".to_owned())
        .into();
    let base_url = base_url_from_env()?;

    let cache = Cache::open(&cache_path)?;
    let client = Client::new(base_url, cache)?;
    let course_selector = course_selector_from_env();

    Ok(InitFromEnv {
        client,
        user,
        course_selector,
    })
}

pub struct InitFromEnv {
    pub client: Client,
    pub user: String,
    pub course_selector: Option<CourseSelector>,
}

fn base_url_from_env() -> Result<Url> {
    let raw = env::var("CANVAS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
    Url::parse(&raw).with_context(|| format!("CANVAS_BASE_URL `{raw}` is not a valid URL"))
}

fn course_selector_from_env() -> Option<CourseSelector> {
    env::var("COURSE").ok().map(CourseSelector::new)
}

pub fn init_tracing() {
    registry()
        .with(fmt::layer().event_format(format().pretty()))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()
                .unwrap(),
        )
        .init();
}
