use clap::Parser;
use skillstack::{
    cli::{self, Cli},
    http::client::create_client,
    repositories::skill::HttpSkillRepo,
    settings::AppConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix into rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skillstack=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    let config = match cli.api_url.clone() {
        Some(url) => config.with_api_base_url(url)?,
        None => config,
    };
    tracing::info!("Loaded configuration: {:?}", config);

    let client = create_client(&config)?;
    let skill_repo = HttpSkillRepo::new(client, &config.api_base_url);

    tracing::info!(
        "Starting {} v{} against {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        skill_repo.base_url()
    );

    cli::run(cli.command.unwrap_or_default(), skill_repo).await?;
    Ok(())
}
