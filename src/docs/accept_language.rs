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

use crate::docs::transformer::{OperationContext, OperationTransformer};
use crate::localization::SupportedCultures;
use serde_json::Value;
use utoipa::openapi::path::{Operation, Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::{RefOr, Required};

pub const ACCEPT_LANGUAGE: &str = "Accept-Language";

/// Documents an optional `Accept-Language` header on every operation, with
/// the supported cultures as allowed values and the first one as default.
#[derive(Debug, Clone)]
pub struct AcceptLanguageHeaderTransformer {
    supported_languages: Vec<Value>,
}

impl AcceptLanguageHeaderTransformer {
    pub fn new(cultures: &SupportedCultures) -> Self {
        Self {
            supported_languages: cultures
                .iter()
                .map(|culture| Value::String(culture.to_string()))
                .collect(),
        }
    }

    fn parameter(&self) -> Parameter {
        let schema = ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(self.supported_languages.clone()))
            .default(self.supported_languages.first().cloned())
            .build();

        ParameterBuilder::new()
            .name(ACCEPT_LANGUAGE)
            .parameter_in(ParameterIn::Header)
            .required(Required::False)
            .schema(Some(RefOr::T(Schema::Object(schema))))
            .build()
    }
}

/// Exact, case-sensitive name match. Only header parameters count.
fn has_accept_language_header(parameters: &[Parameter]) -> bool {
    parameters
        .iter()
        .any(|p| p.name == ACCEPT_LANGUAGE && matches!(p.parameter_in, ParameterIn::Header))
}

impl OperationTransformer for AcceptLanguageHeaderTransformer {
    fn transform(&self, operation: &mut Operation, _context: &OperationContext<'_>) {
        if self.supported_languages.is_empty() {
            return;
        }

        let parameters = operation.parameters.get_or_insert_with(Vec::new);
        if has_accept_language_header(parameters) {
            return;
        }

        parameters.push(self.parameter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use utoipa::openapi::path::OperationBuilder;

    const CONTEXT: OperationContext<'static> = OperationContext {
        document_name: "v1",
        path: "/weatherforecast",
        method: "get",
    };

    fn transformer(tags: &[&str]) -> AcceptLanguageHeaderTransformer {
        AcceptLanguageHeaderTransformer::new(&SupportedCultures::new(tags).unwrap())
    }

    fn header_count(operation: &Operation) -> usize {
        operation
            .parameters
            .iter()
            .flatten()
            .filter(|p| p.name == ACCEPT_LANGUAGE && matches!(p.parameter_in, ParameterIn::Header))
            .count()
    }

    fn query_parameter(name: &str) -> Parameter {
        ParameterBuilder::new()
            .name(name)
            .parameter_in(ParameterIn::Query)
            .build()
    }

    #[test]
    fn test_adds_header_to_operation_without_parameters() {
        let mut operation = OperationBuilder::new().build();
        transformer(&["en", "it"]).transform(&mut operation, &CONTEXT);

        let value = serde_json::to_value(&operation).unwrap();
        assert_json_eq!(
            value["parameters"],
            json!([{
                "name": "Accept-Language",
                "in": "header",
                "required": false,
                "schema": {
                    "type": "string",
                    "enum": ["en", "it"],
                    "default": "en"
                }
            }])
        );
    }

    #[test]
    fn test_is_idempotent() {
        let transformer = transformer(&["en", "it"]);
        let mut operation = OperationBuilder::new().build();

        for _ in 0..3 {
            transformer.transform(&mut operation, &CONTEXT);
        }

        assert_eq!(header_count(&operation), 1);
        assert_eq!(operation.parameters.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_culture_list_is_a_no_op() {
        let mut operation = OperationBuilder::new().build();
        transformer(&[]).transform(&mut operation, &CONTEXT);
        assert!(operation.parameters.is_none());

        let mut operation = OperationBuilder::new()
            .parameter(query_parameter("days"))
            .build();
        transformer(&[]).transform(&mut operation, &CONTEXT);
        assert_eq!(operation.parameters.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_keeps_existing_header_untouched() {
        let existing = ParameterBuilder::new()
            .name(ACCEPT_LANGUAGE)
            .parameter_in(ParameterIn::Header)
            .required(Required::True)
            .description(Some("custom"))
            .build();
        let mut operation = OperationBuilder::new().parameter(existing).build();

        transformer(&["en", "it"]).transform(&mut operation, &CONTEXT);

        let parameters = operation.parameters.as_ref().unwrap();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].description.as_deref(), Some("custom"));
        assert!(matches!(parameters[0].required, Required::True));
    }

    #[test]
    fn test_query_parameter_with_same_name_is_not_a_duplicate() {
        let mut operation = OperationBuilder::new()
            .parameter(query_parameter(ACCEPT_LANGUAGE))
            .build();

        transformer(&["en", "it"]).transform(&mut operation, &CONTEXT);

        let parameters = operation.parameters.as_ref().unwrap();
        assert_eq!(parameters.len(), 2);
        assert!(matches!(parameters[0].parameter_in, ParameterIn::Query));
        assert!(matches!(parameters[1].parameter_in, ParameterIn::Header));
        assert_eq!(header_count(&operation), 1);
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let lowercase = ParameterBuilder::new()
            .name("accept-language")
            .parameter_in(ParameterIn::Header)
            .build();
        let mut operation = OperationBuilder::new().parameter(lowercase).build();

        transformer(&["en"]).transform(&mut operation, &CONTEXT);

        assert_eq!(operation.parameters.as_ref().unwrap().len(), 2);
        assert_eq!(header_count(&operation), 1);
    }

    #[test]
    fn test_appends_after_existing_parameters() {
        let mut operation = OperationBuilder::new()
            .parameter(query_parameter("days"))
            .build();

        transformer(&["it", "en", "de"]).transform(&mut operation, &CONTEXT);

        let value = serde_json::to_value(&operation).unwrap();
        assert_eq!(value["parameters"][0]["name"], "days");
        assert_eq!(value["parameters"][1]["name"], "Accept-Language");
        assert_json_eq!(
            value["parameters"][1]["schema"],
            json!({ "type": "string", "enum": ["it", "en", "de"], "default": "it" })
        );
    }
}
