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

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub localization: LocalizationConfig,
    #[serde(default)]
    pub openapi: OpenApiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
    /// Redirect plain http requests to https.
    #[serde(default)]
    pub https_redirect: bool,
    /// Port advertised in redirect locations. Redirection is skipped when unset.
    #[serde(default)]
    pub https_port: Option<u16>,
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    4
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Ordered culture tags. The first one is the default request culture.
    #[serde(default = "default_supported_cultures")]
    pub supported_cultures: Vec<String>,
}

fn default_supported_cultures() -> Vec<String> {
    vec!["en".to_string(), "it".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiConfig {
    #[serde(default = "default_application_name")]
    pub application_name: String,
    #[serde(default = "default_document_path")]
    pub document_path: String,
    #[serde(default = "default_swagger_ui_path")]
    pub swagger_ui_path: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

fn default_application_name() -> String {
    "lingua-api".to_string()
}

fn default_document_path() -> String {
    "/openapi/v1.json".to_string()
}

fn default_swagger_ui_path() -> String {
    "/swagger-ui".to_string()
}

/// Descriptive fields written over every generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_contact_name")]
    pub contact_name: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_license_name")]
    pub license_name: String,
    #[serde(default = "default_license_url")]
    pub license_url: String,
}

fn default_title() -> String {
    "My new API".to_string()
}

fn default_contact_name() -> String {
    "Support".to_string()
}

fn default_contact_email() -> String {
    "support@email.com".to_string()
}

fn default_license_name() -> String {
    "MIT".to_string()
}

fn default_license_url() -> String {
    "https://opensource.org/licenses/MIT".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Export traces and logs over OTLP. Local logging is always on.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_service_name() -> String {
    "lingua-api".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_protocol() -> String {
    "grpc".to_string()
}

fn default_sampling_rate() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            workers: default_workers(),
            host: default_host(),
            max_request_size: default_max_request_size(),
            https_redirect: false,
            https_port: None,
        }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            supported_cultures: default_supported_cultures(),
        }
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            application_name: default_application_name(),
            document_path: default_document_path(),
            swagger_ui_path: default_swagger_ui_path(),
            metadata: DocumentMetadata::default(),
        }
    }
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: default_title(),
            contact_name: default_contact_name(),
            contact_email: default_contact_email(),
            license_name: default_license_name(),
            license_url: default_license_url(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: default_service_name(),
            service_version: default_service_version(),
            endpoint: default_endpoint(),
            protocol: default_protocol(),
            sampling_rate: default_sampling_rate(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.workers, 4);
        assert!(!config.server.https_redirect);
        assert_eq!(config.localization.supported_cultures, vec!["en", "it"]);
        assert_eq!(config.openapi.document_path, "/openapi/v1.json");
        assert!(!config.telemetry.enabled);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_default_document_metadata() {
        let metadata = DocumentMetadata::default();
        assert_eq!(metadata.title, "My new API");
        assert_eq!(metadata.contact_name, "Support");
        assert_eq!(metadata.contact_email, "support@email.com");
        assert_eq!(metadata.license_name, "MIT");
        assert_eq!(metadata.license_url, "https://opensource.org/licenses/MIT");
    }

    #[test]
    fn test_partial_metadata_keeps_defaults() {
        let metadata: DocumentMetadata = serde_yaml::from_str("title: Other API").unwrap();
        assert_eq!(metadata.title, "Other API");
        assert_eq!(metadata.license_name, "MIT");
    }
}
