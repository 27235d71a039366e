use cobra_amigo::{config::Config, start_server};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cobra_amigo=info")),
        )
        .init();

    let config = Config::from_env()?;
    start_server(config).await
}
