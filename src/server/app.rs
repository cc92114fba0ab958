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

use crate::config::Config;
use crate::docs::{build_pipeline, DocumentPipeline};
use crate::localization::{localization_middleware, SupportedCultures};
use crate::server::handlers::{
    create_person_handler, health_handler, json_error_handler, openapi_json_handler,
    query_error_handler, weather_forecast_handler,
};
use crate::server::https::https_redirect_middleware;
use crate::telemetry::tracer::tracing_middleware;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use std::sync::Arc;
use tracing::info;
use utoipa_swagger_ui::{SwaggerUi, Url};

/// Labelled document entry shown by Swagger UI.
#[derive(Debug, Clone, Copy)]
pub struct SwaggerEndpoint {
    pub name: &'static str,
    pub url: &'static str,
}

impl SwaggerEndpoint {
    /// Leaks both strings: swagger-ui only accepts named urls borrowed for
    /// `'static`. Call once per application state.
    fn leak(name: &str, url: &str) -> Self {
        Self {
            name: Box::leak(name.to_owned().into_boxed_str()),
            url: Box::leak(url.to_owned().into_boxed_str()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: Arc<DocumentPipeline>,
    pub swagger_endpoint: SwaggerEndpoint,
}

impl AppState {
    pub fn new(config: Config, cultures: &SupportedCultures) -> Self {
        let pipeline = Arc::new(build_pipeline(&config.openapi, cultures));
        let swagger_endpoint = SwaggerEndpoint::leak(
            &config.openapi.application_name,
            &config.openapi.document_path,
        );
        Self {
            config,
            pipeline,
            swagger_endpoint,
        }
    }
}

pub async fn run_server(config: Config, cultures: SupportedCultures) -> anyhow::Result<Server> {
    let server_config = config.server.clone();
    let addr = format!("{}:{}", server_config.host, server_config.port);

    info!("Starting server on {}", addr);
    info!("Server workers: {}", server_config.workers);
    info!("Max request size: {} bytes", server_config.max_request_size);
    info!(
        "OpenAPI document at {}, Swagger UI at {}",
        config.openapi.document_path, config.openapi.swagger_ui_path
    );

    let cultures = Arc::new(cultures);
    let app_state = web::Data::new(AppState::new(config, &cultures));
    let https_redirect = https_redirect_middleware(&server_config);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(localization_middleware(cultures.clone()))
            .wrap(https_redirect)
            .wrap(tracing_middleware())
            .configure(|cfg| configure(cfg, &app_state))
    })
    .workers(server_config.workers)
    .bind(addr)?
    .run();

    Ok(server)
}

/// Registers application data, the API routes, the OpenAPI document and
/// Swagger UI.
pub fn configure(cfg: &mut web::ServiceConfig, state: &web::Data<AppState>) {
    let openapi = &state.config.openapi;
    let swagger_ui_path = format!("{}/{{_:.*}}", openapi.swagger_ui_path.trim_end_matches('/'));
    let endpoint = state.swagger_endpoint;
    let swagger_config = utoipa_swagger_ui::Config::new([Url::new(endpoint.name, endpoint.url)]);

    cfg.app_data(state.clone())
        .app_data(
            web::JsonConfig::default()
                .limit(state.config.server.max_request_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(web::resource("/weatherforecast").route(web::get().to(weather_forecast_handler)))
        .service(web::resource("/api/person").route(web::post().to(create_person_handler)))
        .service(web::resource("/health").route(web::get().to(health_handler)))
        .service(
            web::resource(openapi.document_path.as_str())
                .route(web::get().to(openapi_json_handler)),
        )
        .service(SwaggerUi::new(swagger_ui_path).config(swagger_config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::test as actix_test;

    fn state(config: Config) -> web::Data<AppState> {
        let cultures = SupportedCultures::new(&config.localization.supported_cultures).unwrap();
        web::Data::new(AppState::new(config, &cultures))
    }

    #[test]
    fn test_app_state() {
        let config = Config::default();
        let app_state = state(config);

        assert_eq!(app_state.config.openapi.document_path, "/openapi/v1.json");
        assert_eq!(app_state.pipeline.document_name(), "v1");
    }

    #[actix_web::test]
    async fn test_custom_document_path() {
        let mut config = Config::default();
        config.openapi.document_path = "/docs/api.json".to_string();
        let app_state = state(config);

        let app = actix_test::init_service(App::new().configure(|cfg| configure(cfg, &app_state))).await;

        let req = actix_test::TestRequest::get().uri("/docs/api.json").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = actix_test::TestRequest::get().uri("/openapi/v1.json").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_swagger_ui_is_served() {
        let app_state = state(Config::default());
        let app = actix_test::init_service(App::new().configure(|cfg| configure(cfg, &app_state))).await;

        let req = actix_test::TestRequest::get().uri("/swagger-ui/").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert!(resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[actix_web::test]
    async fn test_swagger_ui_labels_document_with_application_name() {
        let mut config = Config::default();
        config.openapi.application_name = "weather-service".to_string();
        let app_state = state(config);
        let app = actix_test::init_service(App::new().configure(|cfg| configure(cfg, &app_state))).await;

        let req = actix_test::TestRequest::get()
            .uri("/swagger-ui/swagger-initializer.js")
            .to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        let script = std::str::from_utf8(&body).unwrap();

        assert!(script.contains(r#""name": "weather-service""#));
        assert!(script.contains(r#""url": "/openapi/v1.json""#));
    }
}
