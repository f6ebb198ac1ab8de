//! git-browse - a browsable web view of bare git repositories
//!
//! # Usage
//! ```bash
//! git-browse /srv/git        # serve http://127.0.0.1:3001/git
//! git-browse /srv/git --open # serve and open the browser
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_browse::config::AppConfig;
use git_browse::routes;

/// Browse bare git repositories in your browser
#[derive(Parser)]
#[command(name = "git-browse")]
#[command(about = "A browsable web view of bare git repositories", long_about = None)]
struct Cli {
    /// Directory containing the bare repositories to serve
    #[arg(value_name = "STORAGE_ROOT")]
    root: PathBuf,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Maximum size of a rendered page in bytes
    #[arg(long, default_value_t = 8 * 1024 * 1024)]
    max_page_bytes: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let root = std::fs::canonicalize(&cli.root).unwrap_or_else(|_| cli.root.clone());
    if !root.is_dir() {
        eprintln!("✗ Storage root is not a directory: {}", root.display());
        std::process::exit(1);
    }

    let config = Arc::new(AppConfig {
        root: root.clone(),
        max_page_bytes: cli.max_page_bytes,
    });

    let app = routes::create_router(config).layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://{}/git", addr);
    println!();
    println!("  Repositories: {}", root.display());
    println!("  Server:       {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
