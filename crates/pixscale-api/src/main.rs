use pixscale_core::Config;

// Use mimalloc as the global allocator: image decode/encode churns through
// large short-lived buffers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, routes)
    let (_state, router) = pixscale_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    pixscale_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
