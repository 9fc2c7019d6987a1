use anyhow::Result;
use quizhub::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, then configuration
    quizhub::logger::init();
    let config = Config::from_env();

    // Run the batch import pipeline
    let mut app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
