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

use crate::config::types::{
    Config, DocumentMetadata, LocalizationConfig, OpenApiConfig, ServerConfig, TelemetryConfig,
};
use crate::localization::SupportedCultures;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Loads `path` when it exists, otherwise falls back to the built-in defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        if path.as_ref().exists() {
            return Self::from_file(path);
        }

        info!(
            "Config file {:?} not found, using default configuration",
            path.as_ref()
        );
        let config = Config::default();
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn from_str(content: &str) -> anyhow::Result<Config> {
        let config: Config =
            serde_yaml::from_str(content).with_context(|| "Failed to parse YAML configuration")?;

        Self::validate(&config)?;

        Ok(config)
    }

    pub fn validate(config: &Config) -> anyhow::Result<()> {
        Self::validate_server(&config.server)?;
        Self::validate_localization(&config.localization)?;
        Self::validate_openapi(&config.openapi)?;

        if config.telemetry.enabled {
            Self::validate_telemetry_config(&config.telemetry)?;
        }

        Ok(())
    }

    fn validate_server(server: &ServerConfig) -> anyhow::Result<()> {
        if server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if server.workers == 0 {
            anyhow::bail!("Number of workers cannot be 0");
        }

        if server.max_request_size == 0 {
            anyhow::bail!("Max request size cannot be 0");
        }

        if server.https_port == Some(0) {
            anyhow::bail!("HTTPS port cannot be 0");
        }

        Ok(())
    }

    fn validate_localization(localization: &LocalizationConfig) -> anyhow::Result<()> {
        SupportedCultures::new(&localization.supported_cultures)
            .context("Invalid supported cultures")?;

        Ok(())
    }

    fn validate_openapi(openapi: &OpenApiConfig) -> anyhow::Result<()> {
        if !openapi.document_path.starts_with('/') {
            anyhow::bail!("OpenAPI document path must start with '/'");
        }

        if !openapi.swagger_ui_path.starts_with('/') {
            anyhow::bail!("Swagger UI path must start with '/'");
        }

        let swagger_prefix = format!("{}/", openapi.swagger_ui_path.trim_end_matches('/'));
        if swagger_prefix != "/"
            && (openapi.document_path.starts_with(&swagger_prefix)
                || openapi.document_path == swagger_prefix.trim_end_matches('/'))
        {
            anyhow::bail!("OpenAPI document path cannot live under the Swagger UI path");
        }

        Self::validate_metadata(&openapi.metadata)
    }

    fn validate_metadata(metadata: &DocumentMetadata) -> anyhow::Result<()> {
        if metadata.title.trim().is_empty() {
            anyhow::bail!("Document title cannot be empty");
        }

        if metadata.contact_email.trim().is_empty() {
            anyhow::bail!("Contact email cannot be empty");
        }

        if metadata.license_name.trim().is_empty() {
            anyhow::bail!("License name cannot be empty");
        }

        url::Url::parse(&metadata.license_url)
            .with_context(|| format!("Invalid license URL: {}", metadata.license_url))?;

        Ok(())
    }

    fn validate_telemetry_config(config: &TelemetryConfig) -> anyhow::Result<()> {
        if config.sampling_rate < 0.0 || config.sampling_rate > 1.0 {
            anyhow::bail!("Sampling rate must be between 0.0 and 1.0");
        }

        if config.endpoint.is_empty() {
            anyhow::bail!("Telemetry endpoint cannot be empty");
        }

        if let Ok(url) = url::Url::parse(&config.endpoint) {
            let scheme = url.scheme();
            if scheme != "http" && scheme != "https" {
                anyhow::bail!("Telemetry endpoint must use http:// or https:// scheme");
            }

            if url.host().is_none() {
                anyhow::bail!("Telemetry endpoint must have a host");
            }
        } else {
            anyhow::bail!("Invalid telemetry endpoint URL format: {}", config.endpoint);
        }

        let protocol = config.protocol.to_lowercase();
        if protocol != "http" && protocol != "grpc" {
            anyhow::bail!(
                "Telemetry protocol must be 'http' or 'grpc', got '{}'",
                config.protocol
            );
        }

        if config.timeout_seconds == 0 {
            anyhow::bail!("Telemetry timeout must be greater than 0");
        }

        Ok(())
    }
}
