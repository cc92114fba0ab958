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

use crate::docs::DocumentPipeline;
use crate::weather::WeatherForecast;
use serde::{Deserialize, Serialize};
use utoipa::OpenApi;
use utoipa::ToSchema;

/// Base document. Info fields come from the crate manifest and are rewritten
/// by the document pipeline before the document is served.
#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::weather_forecast_handler,
        super::handlers::create_person_handler,
        super::handlers::health_handler
    ),
    components(
        schemas(
            WeatherForecast,
            Person,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Weather", description = "Weather forecasts"),
        (name = "Person", description = "Person echo"),
        (name = "System", description = "System endpoints")
    )
)]
pub struct ApiDoc;

/// Runs `pipeline` over a freshly derived [`ApiDoc`].
pub fn generate_document(pipeline: &DocumentPipeline) -> utoipa::openapi::OpenApi {
    pipeline.generate(ApiDoc::openapi())
}

/// The person to create
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Person {
    /// The person name
    #[schema(example = "Marco")]
    pub name: Option<String>,
    /// The city where the person lives
    #[schema(default = "Taggia")]
    pub city: Option<String>,
}

#[derive(ToSchema, Serialize)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "lingua-api")]
    pub service: String,
    #[schema(example = "2026-01-01T00:00:00Z")]
    pub timestamp: String,
}

#[derive(Debug, ToSchema, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[schema(example = "Query deserialize error: invalid digit found in string")]
    pub error: String,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub request_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::docs::{build_pipeline, ACCEPT_LANGUAGE};
    use crate::localization::SupportedCultures;
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    fn document_for(tags: &[&str]) -> serde_json::Value {
        let config = Config::default();
        let cultures = SupportedCultures::new(tags).unwrap();
        let pipeline = build_pipeline(&config.openapi, &cultures);
        serde_json::to_value(generate_document(&pipeline)).unwrap()
    }

    fn header_parameters<'a>(operation: &'a serde_json::Value) -> Vec<&'a serde_json::Value> {
        operation["parameters"]
            .as_array()
            .map(|params| {
                params
                    .iter()
                    .filter(|p| p["name"] == ACCEPT_LANGUAGE && p["in"] == "header")
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_document_lists_all_paths() {
        let document = document_for(&["en", "it"]);
        let paths = document["paths"].as_object().unwrap();

        assert!(paths.contains_key("/weatherforecast"));
        assert!(paths.contains_key("/api/person"));
        assert!(paths.contains_key("/health"));
        assert_eq!(
            document["paths"]["/weatherforecast"]["get"]["operationId"],
            "GetWeatherForecast"
        );
    }

    #[test]
    fn test_document_metadata_is_rewritten() {
        let document = document_for(&["en", "it"]);

        assert_json_include!(
            actual: document["info"].clone(),
            expected: json!({
                "title": "My new API",
                "contact": { "name": "Support", "email": "support@email.com" },
                "license": { "name": "MIT", "url": "https://opensource.org/licenses/MIT" }
            })
        );
        assert!(document.get("servers").is_none());
    }

    #[test]
    fn test_every_operation_has_accept_language_header() {
        let document = document_for(&["en", "it"]);

        for (path, item) in document["paths"].as_object().unwrap() {
            for (method, operation) in item.as_object().unwrap() {
                let headers = header_parameters(operation);
                assert_eq!(headers.len(), 1, "{} {}", method, path);
                assert_eq!(headers[0]["required"], false);
                assert_eq!(headers[0]["schema"]["enum"], json!(["en", "it"]));
                assert_eq!(headers[0]["schema"]["default"], "en");
            }
        }
    }

    #[test]
    fn test_no_cultures_means_no_header() {
        let document = document_for(&[]);

        for item in document["paths"].as_object().unwrap().values() {
            for operation in item.as_object().unwrap().values() {
                assert!(header_parameters(operation).is_empty());
            }
        }

        let days = &document["paths"]["/weatherforecast"]["get"]["parameters"][0];
        assert_eq!(days["name"], "days");
        assert_eq!(days["in"], "query");
    }

    #[test]
    fn test_person_schema_carries_descriptions_and_default() {
        let document = document_for(&["en"]);
        let person = &document["components"]["schemas"]["Person"]["properties"];

        assert_eq!(person["name"]["description"], "The person name");
        assert_eq!(person["city"]["description"], "The city where the person lives");
        assert_eq!(person["city"]["default"], "Taggia");
    }
}
