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

//! OpenAPI document post-processing.
//!
//! A [`DocumentPipeline`] takes the document utoipa derives from the route
//! annotations and runs the registered document and operation transformers
//! over it before it is served.

pub mod accept_language;
pub mod metadata;
pub mod pipeline;
pub mod transformer;

pub use accept_language::{AcceptLanguageHeaderTransformer, ACCEPT_LANGUAGE};
pub use metadata::DocumentMetadataTransformer;
pub use pipeline::DocumentPipeline;
pub use transformer::{DocumentContext, DocumentTransformer, OperationContext, OperationTransformer};

use crate::config::OpenApiConfig;
use crate::localization::SupportedCultures;

/// Name of the single document the service publishes.
pub const DOCUMENT_NAME: &str = "v1";

/// Pipeline used by the server: metadata rewrite, then `Accept-Language`
/// injection.
pub fn build_pipeline(config: &OpenApiConfig, cultures: &SupportedCultures) -> DocumentPipeline {
    DocumentPipeline::new(DOCUMENT_NAME)
        .add_document_transformer(DocumentMetadataTransformer::new(&config.metadata))
        .add_operation_transformer(AcceptLanguageHeaderTransformer::new(cultures))
}
