use pts_client::app::AppContext;
use pts_client::config::load_config;
use pts_client::router::Route;
use pts_client::shell::Shell;
use pts_client::ui::{ConsoleAlerter, ConsoleNavigator};
use std::sync::Arc;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = load_config()?;
    log::info!(
        "{} {} talking to {}",
        pts_client::SERVICE_NAME,
        pts_client::VERSION,
        config.api_base_url
    );

    let start = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path)?,
        None => Route::parse("/")?,
    };

    let navigator = Arc::new(ConsoleNavigator::new());
    let ctx = AppContext::from_config(&config, Arc::new(ConsoleAlerter), navigator.clone());

    let mut shell = Shell::new(ctx, navigator, BufReader::new(tokio::io::stdin()), std::io::stdout());
    shell.run(start).await?;
    Ok(())
}
