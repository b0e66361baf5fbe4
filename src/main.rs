//! Servfarma Admin CLI
//!
//! Loads one page of a feature list through the REST API and prints the
//! resulting list view as JSON.

use std::sync::Arc;

use clap::{Parser, ValueEnum};

use servfarma_admin::adapters::{
    PagedResultCache, RestClient, RestFeature, RestResource, TracingNotifier,
};
use servfarma_admin::application::{ListController, ListSettings};
use servfarma_admin::config::{AppConfig, ConfigError, LoggingConfig};
use servfarma_admin::domain::catalog::{PharmaceuticalForms, Permissions, ProductGroups, Users};
use servfarma_admin::domain::listing::{PagerEvent, PagerUpdate};
use servfarma_admin::ports::PagerView;

#[derive(Parser)]
#[command(name = "servfarma-admin")]
#[command(about = "Servfarma admin - load a page of a dashboard list")]
#[command(version)]
struct Cli {
    /// List to load
    #[arg(value_enum)]
    feature: Feature,

    /// 1-based page number
    #[arg(default_value_t = 1)]
    page: u32,

    /// Rows per page (defaults to SERVFARMA__LISTING__DEFAULT_PAGE_SIZE)
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Feature {
    ProductGroups,
    PharmaceuticalForms,
    Users,
    Permissions,
}

/// Pager that only logs what a table would render.
struct LogPager;

impl<T> PagerView<T> for LogPager {
    fn render(&self, update: PagerUpdate<T>) {
        tracing::info!(
            page = update.current_page,
            total_pages = update.total_pages,
            rows = update.table_data.len(),
            total = update.total_data,
            "Page rendered"
        );
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter()?)
        .with_writer(std::io::stderr);
    if logging.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn run<L: RestFeature>(
    api: RestClient,
    settings: ListSettings,
    page: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = ListController::<L>::new(
        Arc::new(RestResource::<L>::new(api)),
        Arc::new(PagedResultCache::new()),
        Arc::new(LogPager),
        Arc::new(TracingNotifier::new()),
        settings,
    );

    controller.mount(None).await?;
    if page > 1 {
        let size = i64::from(settings.page_size);
        let skip = i64::from(page - 1) * size;
        controller
            .on_pager_event(PagerEvent::new(skip, size, size))
            .await?;
    }

    let view = controller.view().await;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.logging)?;

    let api = RestClient::new(config.api.rest_config())?;
    let mut settings = config.listing.settings();
    if let Some(size) = cli.page_size {
        settings = settings.with_page_size(size.min(settings.max_page_size));
    }

    match cli.feature {
        Feature::ProductGroups => run::<ProductGroups>(api, settings, cli.page).await,
        Feature::PharmaceuticalForms => run::<PharmaceuticalForms>(api, settings, cli.page).await,
        Feature::Users => run::<Users>(api, settings, cli.page).await,
        Feature::Permissions => run::<Permissions>(api, settings, cli.page).await,
    }
}
