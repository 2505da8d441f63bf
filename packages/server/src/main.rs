#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Housing affordability map server binary.

use clap::Parser;
use housing_map_server::{Cli, ServerConfig, init_logger, run_server};

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ServerConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to resolve configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logger(&config);

    if let Err(e) = run_server(config).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
