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

use crate::localization::{
    parse_culture_cookie, SupportedCultures, CULTURE_COOKIE_NAME, CULTURE_QUERY_KEYS,
};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::HttpMessage;
use futures::future::LocalBoxFuture;
use std::future::ready;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use tracing::debug;

pub fn localization_middleware(cultures: Arc<SupportedCultures>) -> LocalizationMiddleware {
    LocalizationMiddleware { cultures }
}

/// Negotiates a [`RequestCulture`](crate::localization::RequestCulture) for
/// every request, stores it in the request extensions and echoes it back in
/// `Content-Language`.
pub struct LocalizationMiddleware {
    cultures: Arc<SupportedCultures>,
}

impl<S, B> Transform<S, ServiceRequest> for LocalizationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = LocalizationMiddlewareService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LocalizationMiddlewareService {
            service: Rc::new(service),
            cultures: self.cultures.clone(),
        }))
    }
}

pub struct LocalizationMiddlewareService<S> {
    service: Rc<S>,
    cultures: Arc<SupportedCultures>,
}

impl<S, B> Service<ServiceRequest> for LocalizationMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let query_culture = query_culture(req.query_string());
        let cookie_culture = req
            .cookie(CULTURE_COOKIE_NAME)
            .and_then(|cookie| parse_culture_cookie(cookie.value()));
        let accept_language = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());

        let culture = self
            .cultures
            .negotiate(
                query_culture.as_deref(),
                cookie_culture.as_deref(),
                accept_language,
            );

        Box::pin(async move {
            let Some(culture) = culture else {
                return service.call(req).await;
            };

            debug!(
                culture = %culture.name,
                source = %culture.source,
                "Request culture selected"
            );

            req.extensions_mut().insert(culture.clone());
            let mut response = service.call(req).await?;

            if let Ok(value) = HeaderValue::from_str(&culture.name) {
                response
                    .headers_mut()
                    .insert(header::CONTENT_LANGUAGE, value);
            }

            Ok(response)
        })
    }
}

fn query_culture(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| CULTURE_QUERY_KEYS.contains(&key.as_ref()))
        .map(|(_, value)| value.into_owned())
}
