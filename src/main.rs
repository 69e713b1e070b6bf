use clap::Parser;
use snow_notes::cli::Cli;
use snow_notes::http::{self, ServerConfig};
use snow_notes::{logging, NoteStore, Result};

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    logging::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server exited with an error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ServerConfig::default();
    let store = NoteStore::open(&config.db_path())?;
    tracing::info!(db = %config.db_path().display(), "database ready");

    http::serve(config, store).await
}
