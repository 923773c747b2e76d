mod config;
mod data;
mod render;
mod server;

use std::sync::Arc;

use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::config::ServerConfig;
use crate::server::App;

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    TermLogger::init(
        config.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    let app = Arc::new(App::new(&config));
    if let Err(e) = app.serve(config.addr).await {
        eprintln!("Error: {}", e);
    }
}
