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

use crate::config::DocumentMetadata;
use crate::docs::transformer::{DocumentContext, DocumentTransformer};
use utoipa::openapi::info::{Contact, ContactBuilder, License, LicenseBuilder};
use utoipa::openapi::OpenApi;

/// Overwrites title, contact and license of a document and drops its server
/// list.
#[derive(Debug, Clone)]
pub struct DocumentMetadataTransformer {
    title: String,
    contact: Contact,
    license: License,
}

impl DocumentMetadataTransformer {
    pub fn new(metadata: &DocumentMetadata) -> Self {
        Self {
            title: metadata.title.clone(),
            contact: ContactBuilder::new()
                .name(Some(metadata.contact_name.clone()))
                .email(Some(metadata.contact_email.clone()))
                .build(),
            license: LicenseBuilder::new()
                .name(metadata.license_name.clone())
                .url(Some(metadata.license_url.clone()))
                .build(),
        }
    }
}

impl DocumentTransformer for DocumentMetadataTransformer {
    fn transform(&self, document: &mut OpenApi, _context: &DocumentContext<'_>) {
        document.info.title = self.title.clone();
        document.info.contact = Some(self.contact.clone());
        document.info.license = Some(self.license.clone());
        document.servers = None;
    }
}
