use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use storefront_cards::{catalog::Catalog, config::StorefrontConfig, grid::Grid};
use tracing::{error, info};

#[derive(Parser)]
struct Opts {
    #[clap(short, long, env = "STOREFRONT_CARDS_CONFIG")]
    config: Option<PathBuf>,
    #[clap(long)]
    catalog: PathBuf,
    /// Only arrange this grid.
    #[clap(short, long)]
    grid: Option<String>,
    #[clap(short, long)]
    lang: Option<String>,
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let config = match &opts.config {
        Some(path) => StorefrontConfig::load(path)
            .await
            .with_context(|| format!("load config from {}", path.display()))?,
        None => StorefrontConfig::default(),
    };
    let catalog = Catalog::load(&opts.catalog)
        .await
        .with_context(|| "load catalog")?;
    info!(products = catalog.products.len(), "catalog loaded");

    let grids = match &opts.grid {
        Some(name) => {
            let (name, grid) = config
                .grids
                .get_key_value(name.as_str())
                .ok_or_else(|| anyhow!("unknown grid: {name}"))?;
            vec![(name, grid)]
        }
        None => config.grids.iter().collect(),
    };
    let mut arranged = Vec::with_capacity(grids.len());
    for (name, grid_config) in grids {
        let grid = Grid::new(name, grid_config, &config);
        arranged.push(grid.arrange(&catalog.products, opts.lang.as_deref()).await);
    }
    let output = serde_json::to_string_pretty(&arranged).with_context(|| "serialize cards")?;
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(opts).await {
        error!(?e, "critical error");
        std::process::exit(1);
    }
}
