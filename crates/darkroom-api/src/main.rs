mod api_doc;
mod constants;
mod error;
mod handlers;
mod services;
mod setup;
mod state;
mod utils;

use darkroom_core::Config;

// mimalloc keeps allocation-heavy image processing fast and fragmentation
// low, especially on musl builds inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, backends, routes)
    let (_state, router) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
