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

//! Request localization.
//!
//! The set of cultures the service understands is fixed at startup and shared
//! read-only between the localization middleware and the OpenAPI document
//! pipeline.

pub mod middleware;

pub use middleware::{localization_middleware, LocalizationMiddleware};

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Only the highest weighted Accept-Language entries are considered.
pub const MAX_ACCEPT_LANGUAGE_CANDIDATES: usize = 3;

/// Query string keys checked before the cookie and the Accept-Language header.
pub const CULTURE_QUERY_KEYS: [&str; 2] = ["culture", "ui-culture"];

/// Cookie carrying a persisted culture choice, formatted `c=it|uic=it`.
pub const CULTURE_COOKIE_NAME: &str = ".AspNetCore.Culture";

static CULTURE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("culture tag pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CultureError {
    #[error("invalid culture tag '{0}'")]
    InvalidTag(String),
}

/// Ordered list of culture tags the service supports. The first entry is the
/// default request culture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedCultures {
    cultures: Vec<String>,
}

impl SupportedCultures {
    /// Validates and de-duplicates `tags`, keeping the first spelling of each
    /// culture and the configured order.
    pub fn new<I, S>(tags: I) -> Result<Self, CultureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cultures: Vec<String> = Vec::new();

        for tag in tags {
            let tag = tag.as_ref().trim();
            if !CULTURE_TAG.is_match(tag) {
                return Err(CultureError::InvalidTag(tag.to_string()));
            }

            if !cultures.iter().any(|c| c.eq_ignore_ascii_case(tag)) {
                cultures.push(tag.to_string());
            }
        }

        Ok(Self { cultures })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cultures
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cultures.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cultures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cultures.is_empty()
    }

    pub fn default_culture(&self) -> Option<&str> {
        self.cultures.first().map(String::as_str)
    }

    /// Maps a requested tag onto a supported culture. Exact matches win,
    /// otherwise parent cultures are tried (`en-US` falls back to `en`).
    pub fn resolve(&self, requested: &str) -> Option<&str> {
        let mut candidate = requested.trim();

        while !candidate.is_empty() {
            if let Some(found) = self
                .cultures
                .iter()
                .find(|c| c.eq_ignore_ascii_case(candidate))
            {
                return Some(found.as_str());
            }

            match candidate.rfind('-') {
                Some(idx) => candidate = &candidate[..idx],
                None => break,
            }
        }

        None
    }

    /// Picks the culture for one request. `None` only when no cultures are
    /// configured.
    /// Sources are tried in order: query string, culture cookie,
    /// Accept-Language header, then the default culture.
    pub fn negotiate(
        &self,
        query_culture: Option<&str>,
        cookie_culture: Option<&str>,
        accept_language: Option<&str>,
    ) -> Option<RequestCulture> {
        if let Some(name) = query_culture.and_then(|q| self.resolve(q)) {
            return Some(RequestCulture::new(name, CultureSource::QueryString));
        }

        if let Some(name) = cookie_culture.and_then(|c| self.resolve(c)) {
            return Some(RequestCulture::new(name, CultureSource::Cookie));
        }

        if let Some(header) = accept_language {
            for candidate in parse_accept_language(header) {
                if let Some(name) = self.resolve(&candidate) {
                    return Some(RequestCulture::new(name, CultureSource::AcceptLanguageHeader));
                }
            }
        }

        self.default_culture()
            .map(|name| RequestCulture::new(name, CultureSource::Default))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CultureSource {
    QueryString,
    Cookie,
    AcceptLanguageHeader,
    Default,
}

impl fmt::Display for CultureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CultureSource::QueryString => "query_string",
            CultureSource::Cookie => "cookie",
            CultureSource::AcceptLanguageHeader => "accept_language_header",
            CultureSource::Default => "default",
        };
        f.write_str(name)
    }
}

/// Culture selected for the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCulture {
    pub name: String,
    pub source: CultureSource,
}

impl RequestCulture {
    pub fn new(name: impl Into<String>, source: CultureSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Returns the language ranges of an Accept-Language header ordered by
/// quality, highest first. Wildcards, zero weights and malformed weights are
/// dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut ranges: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in parts {
                if let Some(value) = param.trim().strip_prefix("q=") {
                    quality = value.trim().parse::<f32>().ok()?;
                }
            }

            // also rejects NaN
            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }

            Some((tag.to_string(), quality))
        })
        .collect();

    // stable, so equal weights keep header order
    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ranges
        .into_iter()
        .take(MAX_ACCEPT_LANGUAGE_CANDIDATES)
        .map(|(tag, _)| tag)
        .collect()
}

/// Extracts the culture from a culture cookie value. `c` wins over `uic`.
/// Percent-encoded values are decoded first.
pub fn parse_culture_cookie(value: &str) -> Option<String> {
    let decoded: String = url::form_urlencoded::parse(format!("v={}", value).as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())?;

    let mut culture = None;
    let mut ui_culture = None;
    for part in decoded.split('|') {
        if let Some(c) = part.trim().strip_prefix("c=") {
            culture = Some(c.trim());
        } else if let Some(uic) = part.trim().strip_prefix("uic=") {
            ui_culture = Some(uic.trim());
        }
    }

    culture
        .or(ui_culture)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
