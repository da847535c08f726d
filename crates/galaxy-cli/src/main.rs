use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use galaxy_core::{QueryParams, SectorFilter};
use galaxy_engine::overlay::StarDetails;
use galaxy_engine::{HttpStarService, StarQueryService, ViewerConfig};
use galaxy_server::ServeConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "galaxy")]
#[command(about = "Galaxy Explorer: 3D star viewer and star query service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    Render {
        /// Star service URL (overrides the config file)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Viewer config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run the star query service
    Serve {
        /// Service config (JSON); flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        port: Option<u16>,
        /// Catalog CSV (synthetic catalog when omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        synthetic: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run one query against a star service and print the result
    Query {
        #[arg(short, long, default_value = "http://localhost:8000")]
        endpoint: String,
        #[arg(long, default_value = "10")]
        min_dist: f64,
        #[arg(long, default_value = "400")]
        max_dist: f64,
        /// "all" or 1..=12
        #[arg(long, default_value = "all")]
        sector: SectorFilter,
        #[arg(long, default_value = "2016")]
        year: i32,
        /// Stars to print
        #[arg(long, default_value = "10")]
        show: usize,
    },

    /// Write a synthetic star catalog CSV
    GenerateSynthetic {
        #[arg(short, long, default_value = "200000")]
        count: usize,
        #[arg(short, long, default_value = "data/synthetic.csv")]
        output: PathBuf,
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { endpoint, config } => {
            let mut viewer = match config {
                Some(path) => ViewerConfig::load(&path)?,
                None => ViewerConfig::default(),
            };
            if let Some(endpoint) = endpoint {
                viewer.endpoint = endpoint;
            }

            println!("Starting Galaxy Explorer...");
            println!("Controls:");
            println!("  Left drag  - Orbit");
            println!("  Right drag - Pan");
            println!("  Wheel      - Zoom");
            println!("  Y/U        - Year -/+");
            println!("  J/K        - Min distance -/+");
            println!("  N/M        - Max distance -/+");
            println!("  H / 0      - Next sector / All sectors");
            println!("  Shift      - Ten steps per press");
            println!("  Enter      - Run query");
            println!("  Escape     - Exit");

            galaxy_render::run(viewer, tokio::runtime::Handle::current())?;
        }

        Commands::Serve { config, port, catalog, synthetic, seed } => {
            let mut serve = match config {
                Some(path) => ServeConfig::load(&path)?,
                None => ServeConfig::default(),
            };
            if let Some(port) = port {
                serve.port = port;
            }
            if catalog.is_some() {
                serve.catalog = catalog;
            }
            if let Some(count) = synthetic {
                serve.synthetic_count = count;
            }
            if let Some(seed) = seed {
                serve.seed = seed;
            }

            tracing::info!("Starting star service on port {}", serve.port);
            galaxy_server::run_server(serve).await?;
        }

        Commands::Query { endpoint, min_dist, max_dist, sector, year, show } => {
            let params = QueryParams {
                min_dist,
                max_dist,
                healpix: sector.healpix(),
                year,
            };
            let viewer = ViewerConfig::default();
            let service = HttpStarService::new(endpoint, viewer.request_timeout())?;

            tracing::info!(?params, "Querying {}", service.base_url());
            let response = service
                .query_stars(params)
                .await
                .with_context(|| format!("query failed against {}", service.base_url()))?;

            println!(
                "{} stars ({}-{} ly, sector {}, year {})",
                response.count, min_dist, max_dist, sector, year
            );
            for star in response.stars.iter().take(show) {
                println!("  {}", StarDetails(star));
            }
        }

        Commands::GenerateSynthetic { count, output, seed } => {
            tracing::info!("Generating {} synthetic stars (seed {})", count, seed);
            let stars = galaxy_data::generate_synthetic_stars(count, seed);
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let pb = ProgressBar::new(stars.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar().template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({per_sec})",
                )?,
            );

            let mut w = csv::Writer::from_path(&output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            for star in &stars {
                w.serialize(star)?;
                pb.inc(1);
            }
            w.flush()?;
            pb.finish_and_clear();

            println!("Generated {} stars -> {:?}", count, output);
        }
    }

    Ok(())
}
