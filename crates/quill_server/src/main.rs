use anyhow::Result;
use clap::Parser;
use quill_models::GroqDriver;
use quill_script::{ExampleCorpus, InMemorySessionStore};
use quill_server::{AppState, QuillConfig, api_key_from_env, create_router, init_logging, serve};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Quill script generation server", long_about = None)]
struct Args {
    /// Configuration file (default: ./quill.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = QuillConfig::load(args.config.as_deref())?;
    config.apply_overrides(args.host, args.port);
    init_logging(&config.logging)?;

    let api_key = api_key_from_env().inspect_err(|e| {
        error!(error = %e, "Cannot start without a provider API key");
    })?;

    let driver = GroqDriver::with_endpoint(
        api_key,
        config.provider.model.clone(),
        &config.provider.base_url,
        config.provider.timeout(),
    )?;

    info!(
        model = %config.provider.model,
        addr = %config.server.bind_addr(),
        corpus = %config.script.corpus_path.display(),
        "Starting Quill server"
    );

    let corpus = ExampleCorpus::load(&config.script.corpus_path);
    let state = AppState::assemble(
        Arc::new(driver),
        corpus,
        Arc::new(InMemorySessionStore::new()),
        &config.script,
    );
    let router = create_router(state, &config.server.allowed_origin)?;

    serve(router, &config.server).await?;
    Ok(())
}
