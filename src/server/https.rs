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

use crate::config::ServerConfig;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::HttpResponse;
use futures::future::LocalBoxFuture;
use std::future::ready;
use std::rc::Rc;
use std::task::{Context as TaskContext, Poll};
use tracing::{debug, warn};

const DEFAULT_HTTPS_PORT: u16 = 443;

/// Builds the redirect middleware from server settings. Redirection is
/// disabled when it is switched off or no https port is configured.
pub fn https_redirect_middleware(config: &ServerConfig) -> HttpsRedirectMiddleware {
    let https_port = match (config.https_redirect, config.https_port) {
        (true, Some(port)) => Some(port),
        (true, None) => {
            warn!("Failed to determine the https port for redirect, requests will not be redirected");
            None
        }
        (false, _) => None,
    };

    HttpsRedirectMiddleware { https_port }
}

/// Answers plain http requests with `307 Temporary Redirect` to the https
/// equivalent of the requested URL.
#[derive(Debug, Clone, Copy)]
pub struct HttpsRedirectMiddleware {
    https_port: Option<u16>,
}

impl<S, B> Transform<S, ServiceRequest> for HttpsRedirectMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Transform = HttpsRedirectMiddlewareService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HttpsRedirectMiddlewareService {
            service: Rc::new(service),
            https_port: self.https_port,
        }))
    }
}

pub struct HttpsRedirectMiddlewareService<S> {
    service: Rc<S>,
    https_port: Option<u16>,
}

impl<S, B> Service<ServiceRequest> for HttpsRedirectMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let location = self.https_port.and_then(|port| {
            let info = req.connection_info();
            if info.scheme() != "http" {
                return None;
            }

            let path = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            Some(redirect_location(info.host(), port, path))
        });

        if let Some(location) = location {
            debug!(location = %location, "Redirecting to https");
            let (request, _payload) = req.into_parts();
            let response = HttpResponse::TemporaryRedirect()
                .insert_header((header::LOCATION, location))
                .finish()
                .map_into_right_body();
            return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
        }

        let service = self.service.clone();
        Box::pin(async move {
            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

fn redirect_location(host: &str, port: u16, path_and_query: &str) -> String {
    let host = host_without_port(host);
    if port == DEFAULT_HTTPS_PORT {
        format!("https://{}{}", host, path_and_query)
    } else {
        format!("https://{}:{}{}", host, port, path_and_query)
    }
}

fn host_without_port(host: &str) -> &str {
    if host.starts_with('[') {
        // bracketed IPv6 literal
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    host.split(':').next().unwrap_or(host)
}
