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

use utoipa::openapi::path::Operation;
use utoipa::openapi::OpenApi;

/// Where a document transformer is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentContext<'a> {
    pub document_name: &'a str,
}

/// Where an operation transformer is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationContext<'a> {
    pub document_name: &'a str,
    pub path: &'a str,
    /// Lowercase HTTP method, e.g. `get`.
    pub method: &'static str,
}

/// Rewrites a whole document. Runs once per generated document, before any
/// operation transformer.
pub trait DocumentTransformer: Send + Sync {
    fn transform(&self, document: &mut OpenApi, context: &DocumentContext<'_>);
}

/// Rewrites one operation. Runs once per operation of a generated document.
pub trait OperationTransformer: Send + Sync {
    fn transform(&self, operation: &mut Operation, context: &OperationContext<'_>);
}

impl<F> DocumentTransformer for F
where
    F: Fn(&mut OpenApi, &DocumentContext<'_>) + Send + Sync,
{
    fn transform(&self, document: &mut OpenApi, context: &DocumentContext<'_>) {
        self(document, context)
    }
}

impl<F> OperationTransformer for F
where
    F: Fn(&mut Operation, &OperationContext<'_>) + Send + Sync,
{
    fn transform(&self, operation: &mut Operation, context: &OperationContext<'_>) {
        self(operation, context)
    }
}
