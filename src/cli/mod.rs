//! CLI module graph and command dispatch.

pub mod command;
pub mod output;
pub mod platforms;
pub mod pricing;
pub mod routes;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

pub use command::{Cli, Commands};

use crate::adapter::reference::ReferenceTables;
use crate::application::{CachedExchangeRates, PricingService};
use crate::config::Config;
use output::OutputConfig;

/// Pricing service over the reference tables with memoized exchange rates.
pub type ReferencePricing =
    PricingService<ReferenceTables, CachedExchangeRates<Arc<ReferenceTables>>>;

/// Loaded configuration plus where it came from.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
}

impl Context {
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config = Config::load(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?;
        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn reference_tables(&self) -> anyhow::Result<Arc<ReferenceTables>> {
        let path = self.config.reference_data_path(&self.config_path);
        let tables = ReferenceTables::load(&path)
            .with_context(|| format!("failed to load reference data from {}", path.display()))?;
        Ok(Arc::new(tables))
    }

    pub fn pricing_service(&self) -> anyhow::Result<ReferencePricing> {
        let tables = self.reference_tables()?;
        let rates = CachedExchangeRates::new(Arc::clone(&tables), self.config.exchange_rate_ttl());
        Ok(PricingService::new(tables, rates))
    }
}

/// Apply global flags, load configuration and run the selected command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let mut ctx = Context::load(&cli.config)?;
    match cli.verbose {
        0 => {}
        1 => ctx.config.logging.level = "debug".into(),
        _ => ctx.config.logging.level = "trace".into(),
    }
    ctx.config.init_logging();

    match cli.command {
        Commands::Profit(args) => pricing::profit(&ctx, &args),
        Commands::MinPrice(args) => pricing::min_price(&ctx, &args),
        Commands::Optimize(args) => pricing::optimize(&ctx, &args),
        Commands::Routes(args) => routes::execute(&ctx, &args).await,
        Commands::Platforms => platforms::execute(&ctx),
    }
}
