//! folio - HTTP server and static exporter for the portfolio and blog.

use std::path::PathBuf;

use axum::http::Request;
use clap::{Parser, Subcommand};
use folio_core::Blog;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use folio_site::{AppState, Config, OgRenderer, export_site, router};

/// folio - portfolio and blog server.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio and blog server with Open Graph previews", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site over HTTP (default).
    Serve,
    /// Write every page and preview image to a directory.
    Export {
        /// Output directory.
        #[arg(long, short, default_value = "dist")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let blog = Blog::builtin()?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, blog).await,
        Command::Export { out } => {
            let og = OgRenderer::new(&config);
            export_site(&blog, &config, &og, &out)?;
            Ok(())
        }
    }
}

async fn serve(config: Config, blog: Blog) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr.clone();

    // Create application state
    let state = AppState::new(config, blog);

    // Build router with middleware
    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting site server");

    axum::serve(listener, app).await?;

    Ok(())
}
