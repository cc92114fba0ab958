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

use crate::localization::RequestCulture;
use crate::server::app::AppState;
use crate::server::openapi::{generate_document, ErrorResponse, HealthResponse, Person};
use crate::weather::{generate_forecast, WeatherForecast, DEFAULT_FORECAST_DAYS};
use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use serde::Deserialize;
use tracing::{debug, info, warn};
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForecastQuery {
    /// The number of days
    #[param(default = 5)]
    pub days: Option<u16>,
}

/// Get the weather forecast
///
/// The forecast for the next days
#[utoipa::path(
    get,
    path = "/weatherforecast",
    tag = "Weather",
    operation_id = "GetWeatherForecast",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Forecast for the requested days", body = Vec<WeatherForecast>),
        (status = 400, description = "Invalid query string", body = ErrorResponse)
    )
)]
pub async fn weather_forecast_handler(
    query: web::Query<ForecastQuery>,
    culture: Option<web::ReqData<RequestCulture>>,
) -> impl Responder {
    let days = query.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    let culture = culture.map(|c| c.into_inner().name);

    info!(
        days,
        culture = culture.as_deref().unwrap_or("none"),
        "Generating weather forecast"
    );

    let today = chrono::Local::now().date_naive();
    let forecast = generate_forecast(&mut rand::thread_rng(), today, days);
    HttpResponse::Ok().json(forecast)
}

#[utoipa::path(
    post,
    path = "/api/person",
    tag = "Person",
    request_body(content = Person, description = "The person to create"),
    responses(
        (status = 200, description = "The received person", body = Person),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse)
    )
)]
pub async fn create_person_handler(person: web::Json<Person>) -> impl Responder {
    let person = person.into_inner();
    debug!(has_name = person.name.is_some(), has_city = person.city.is_some(), "Person received");
    HttpResponse::Ok().json(person)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: data.config.openapi.application_name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Serves the generated OpenAPI document. A fresh document is built for every
/// request.
pub async fn openapi_json_handler(data: web::Data<AppState>) -> impl Responder {
    let document = generate_document(&data.pipeline);
    HttpResponse::Ok().json(document)
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err.to_string(), req)
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err.to_string(), req)
}

fn bad_request(message: String, req: &HttpRequest) -> actix_web::Error {
    let request_id = uuid::Uuid::new_v4().to_string();

    warn!(
        method = %req.method(),
        path = %req.path(),
        request_id = %request_id,
        error = %message,
        "Rejected malformed request"
    );

    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: message.clone(),
        request_id,
    });
    InternalError::from_response(message, response).into()
}
