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

pub mod tracer;

pub use tracer::{init_tracing, tracing_middleware};

use crate::config::TelemetryConfig;
use anyhow::Context;
use tracing::info;

/// Installs the global subscriber. Local logging is always on; OTLP export
/// only happens when `enabled` is set and the `otel` feature is compiled in.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_tracing(config).context("Failed to initialize tracing")?;

    if config.enabled {
        info!(
            "Telemetry initialized with service name: {}",
            config.service_name
        );
    }
    Ok(())
}

/// Flushes pending spans and log records.
pub fn shutdown_telemetry() {
    info!("Shutting down telemetry");

    #[cfg(feature = "otel")]
    {
        if let Some(providers) = tracer::OTEL_PROVIDERS.get() {
            if let Err(e) = providers.tracer_provider.shutdown() {
                tracing::warn!("Failed to shut down tracer provider: {}", e);
            }
            if let Err(e) = providers.logger_provider.shutdown() {
                tracing::warn!("Failed to shut down logger provider: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_disabled_telemetry() {
        let config = TelemetryConfig {
            enabled: false,
            log_format: "json".to_string(),
            ..TelemetryConfig::default()
        };

        assert!(init_telemetry(&config).is_ok());
        // a second call must not fail on the already installed subscriber
        assert!(init_telemetry(&config).is_ok());
        shutdown_telemetry();
    }
}
