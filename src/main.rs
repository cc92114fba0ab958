/*
 * Copyright 2026 Lingua Team
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use anyhow::Context;
use clap::Parser;
use lingua_api::config::ConfigLoader;
use lingua_api::localization::SupportedCultures;
use lingua_api::server::run_server;
use lingua_api::telemetry::{init_telemetry, shutdown_telemetry};
use lingua_api::utils::shutdown_signal;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/lingua-config.yaml")]
    config: PathBuf,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ConfigLoader::from_file_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    init_telemetry(&config.telemetry)?;

    let cultures = SupportedCultures::new(&config.localization.supported_cultures)
        .context("Invalid supported cultures")?;
    info!(
        "Supported cultures: {}",
        cultures.iter().collect::<Vec<_>>().join(", ")
    );

    let application_name = config.openapi.application_name.clone();
    let server = run_server(config, cultures).await?;

    info!("{} is running", application_name);
    info!("Press Ctrl+C to shutdown");

    let server_handle = server.handle();
    tokio::select! {
        _ = server => {
            info!("Server stopped");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            server_handle.stop(true).await;
            info!("Server shutdown complete");
        }
    }

    shutdown_telemetry();

    Ok(())
}
