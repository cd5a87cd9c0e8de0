use vidcap_core::Config;
use vidcap_infra::LogFormat;

// Use mimalloc as the global allocator.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let log_format = config
        .log_format()
        .parse::<LogFormat>()
        .map_err(anyhow::Error::msg)?;
    vidcap_infra::init_telemetry(log_format, config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    config.validate()?;

    let (_state, router) = vidcap_api::setup::initialize_app(config.clone()).await?;

    vidcap_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
