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

use crate::docs::transformer::{
    DocumentContext, DocumentTransformer, OperationContext, OperationTransformer,
};
use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::OpenApi;
use tracing::debug;

/// Ordered set of transformers applied to every generated document.
///
/// Document transformers run first, in registration order. Operation
/// transformers then run, again in registration order, over every operation
/// of every path.
pub struct DocumentPipeline {
    document_name: String,
    document_transformers: Vec<Box<dyn DocumentTransformer>>,
    operation_transformers: Vec<Box<dyn OperationTransformer>>,
}

impl DocumentPipeline {
    pub fn new(document_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            document_transformers: Vec::new(),
            operation_transformers: Vec::new(),
        }
    }

    pub fn add_document_transformer<T>(mut self, transformer: T) -> Self
    where
        T: DocumentTransformer + 'static,
    {
        self.document_transformers.push(Box::new(transformer));
        self
    }

    pub fn add_operation_transformer<T>(mut self, transformer: T) -> Self
    where
        T: OperationTransformer + 'static,
    {
        self.operation_transformers.push(Box::new(transformer));
        self
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn generate(&self, mut document: OpenApi) -> OpenApi {
        let context = DocumentContext {
            document_name: &self.document_name,
        };
        for transformer in &self.document_transformers {
            transformer.transform(&mut document, &context);
        }

        let mut operations = 0usize;
        for (path, item) in document.paths.paths.iter_mut() {
            for (method, operation) in operations_mut(item) {
                let context = OperationContext {
                    document_name: &self.document_name,
                    path,
                    method,
                };
                for transformer in &self.operation_transformers {
                    transformer.transform(operation, &context);
                }
                operations += 1;
            }
        }

        debug!(
            document = %self.document_name,
            document_transformers = self.document_transformers.len(),
            operation_transformers = self.operation_transformers.len(),
            operations,
            "OpenAPI document generated"
        );

        document
    }
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = (&'static str, &mut Operation)> {
    [
        ("get", &mut item.get),
        ("put", &mut item.put),
        ("post", &mut item.post),
        ("delete", &mut item.delete),
        ("options", &mut item.options),
        ("head", &mut item.head),
        ("patch", &mut item.patch),
        ("trace", &mut item.trace),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.as_mut().map(|operation| (method, operation)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use utoipa::openapi::path::{HttpMethod, OperationBuilder, PathItem};
    use utoipa::openapi::{InfoBuilder, OpenApiBuilder, PathsBuilder};

    fn document() -> OpenApi {
        OpenApiBuilder::new()
            .info(InfoBuilder::new().title("base").version("1.0.0").build())
            .paths(
                PathsBuilder::new()
                    .path(
                        "/b",
                        PathItem::new(HttpMethod::Get, OperationBuilder::new().operation_id(Some("b_get"))),
                    )
                    .path(
                        "/a",
                        PathItem::new(HttpMethod::Post, OperationBuilder::new().operation_id(Some("a_post"))),
                    ),
            )
            .build()
    }

    #[test]
    fn test_empty_pipeline_leaves_document_untouched() {
        let pipeline = DocumentPipeline::new("v1");
        let before = serde_json::to_value(document()).unwrap();
        let after = serde_json::to_value(pipeline.generate(document())).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_document_transformers_run_in_order() {
        let pipeline = DocumentPipeline::new("v1")
            .add_document_transformer(|doc: &mut OpenApi, _: &DocumentContext<'_>| {
                doc.info.title = "first".to_string();
            })
            .add_document_transformer(|doc: &mut OpenApi, _: &DocumentContext<'_>| {
                doc.info.title.push_str("+second");
            });

        let document = pipeline.generate(document());
        assert_eq!(document.info.title, "first+second");
    }

    #[test]
    fn test_operation_transformers_visit_every_operation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let pipeline = DocumentPipeline::new("v1").add_operation_transformer(
            move |op: &mut Operation, ctx: &OperationContext<'_>| {
                recorder.lock().unwrap().push(format!(
                    "{} {} {} {}",
                    ctx.document_name,
                    ctx.method,
                    ctx.path,
                    op.operation_id.clone().unwrap_or_default()
                ));
            },
        );

        pipeline.generate(document());
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["v1 post /a a_post".to_string(), "v1 get /b b_get".to_string()]
        );
    }

    #[test]
    fn test_document_transformers_run_before_operation_transformers() {
        let pipeline = DocumentPipeline::new("v1")
            .add_operation_transformer(|op: &mut Operation, _: &OperationContext<'_>| {
                op.summary = Some("seen".to_string());
            })
            .add_document_transformer(|doc: &mut OpenApi, _: &DocumentContext<'_>| {
                doc.paths.paths.clear();
            });

        let document = pipeline.generate(document());
        assert!(document.paths.paths.is_empty());
    }
}
