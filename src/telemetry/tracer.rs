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

use crate::config::TelemetryConfig;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures::future::LocalBoxFuture;
use std::future::ready;
use std::rc::Rc;
use std::task::{Context as TaskContext, Poll};
use tracing::dispatcher::has_been_set;
use tracing::{info, Instrument, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

#[cfg(feature = "otel")]
use opentelemetry::KeyValue;
#[cfg(feature = "otel")]
use opentelemetry_otlp::WithExportConfig;
#[cfg(feature = "otel")]
use tracing::{error, warn};

/// Providers kept alive for the lifetime of the process so they can be
/// flushed on shutdown.
#[cfg(feature = "otel")]
pub(crate) struct OtelProviders {
    pub tracer_provider: opentelemetry_sdk::trace::SdkTracerProvider,
    pub logger_provider: opentelemetry_sdk::logs::SdkLoggerProvider,
}

#[cfg(feature = "otel")]
pub(crate) static OTEL_PROVIDERS: once_cell::sync::OnceCell<OtelProviders> =
    once_cell::sync::OnceCell::new();

/// Adapts actix-web's `HeaderMap` to the `opentelemetry::propagation::Extractor`
/// trait so W3C `traceparent`/`tracestate` headers can be read from incoming
/// requests.
#[cfg(feature = "otel")]
struct ActixHeaderExtractor<'a>(&'a actix_web::http::header::HeaderMap);

#[cfg(feature = "otel")]
impl opentelemetry::propagation::Extractor for ActixHeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

fn install<S>(subscriber: S, log_format: &str)
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
{
    if log_format == "json" {
        let _ = subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .try_init();
    } else {
        let _ = subscriber.with(tracing_subscriber::fmt::layer()).try_init();
    }
}

#[cfg(feature = "otel")]
fn signal_endpoint(endpoint: &str, signal: &str) -> String {
    let suffix = format!("v1/{}", signal);
    if endpoint.contains(&suffix) {
        endpoint.to_string()
    } else if endpoint.ends_with('/') {
        format!("{}{}", endpoint, suffix)
    } else {
        format!("{}/{}", endpoint, suffix)
    }
}

#[cfg(feature = "otel")]
pub fn init_tracing(config: &TelemetryConfig) -> anyhow::Result<()> {
    if has_been_set() {
        info!("A tracing subscriber is already set, skipping initialization");
        return Ok(());
    }

    let registry = Registry::default().with(tracing_subscriber::EnvFilter::new(&config.log_level));

    if !config.enabled {
        install(registry, &config.log_format);
        info!("Logging initialized, OpenTelemetry export is disabled");
        return Ok(());
    }

    let resource = opentelemetry_sdk::Resource::builder()
        .with_attributes(vec![
            KeyValue::new("service.name", config.service_name.clone()),
            KeyValue::new("service.version", config.service_version.clone()),
        ])
        .build();

    let timeout = std::time::Duration::from_secs(config.timeout_seconds);
    let protocol = config.protocol.to_lowercase();

    let span_exporter = match protocol.as_str() {
        "http" => opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(signal_endpoint(&config.endpoint, "traces"))
            .with_timeout(timeout)
            .build(),
        "grpc" => opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build(),
        _ => {
            warn!("Unknown protocol '{}', defaulting to gRPC", protocol);
            opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(&config.endpoint)
                .with_timeout(timeout)
                .build()
        }
    }
    .map_err(|e| {
        error!("Failed to build OpenTelemetry span exporter: {}", e);
        anyhow::anyhow!("OpenTelemetry span exporter build failed: {}", e)
    })?;

    let log_exporter = match protocol.as_str() {
        "http" => opentelemetry_otlp::LogExporter::builder()
            .with_http()
            .with_endpoint(signal_endpoint(&config.endpoint, "logs"))
            .with_timeout(timeout)
            .build(),
        _ => opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build(),
    }
    .map_err(|e| {
        error!("Failed to build OpenTelemetry log exporter: {}", e);
        anyhow::anyhow!("OpenTelemetry log exporter build failed: {}", e)
    })?;

    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .with_sampler(opentelemetry_sdk::trace::Sampler::ParentBased(Box::new(
            opentelemetry_sdk::trace::Sampler::TraceIdRatioBased(config.sampling_rate),
        )))
        .build();

    let logger_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    opentelemetry::global::set_tracer_provider(tracer_provider.clone());
    opentelemetry::global::set_text_map_propagator(
        opentelemetry_sdk::propagation::TraceContextPropagator::new(),
    );

    let tracer = opentelemetry::global::tracer("lingua-api");
    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let otel_log_layer =
        opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge::new(&logger_provider);

    install(
        registry.with(telemetry_layer).with(otel_log_layer),
        &config.log_format,
    );

    let _ = OTEL_PROVIDERS.set(OtelProviders {
        tracer_provider,
        logger_provider,
    });

    info!(
        "OpenTelemetry tracing initialized with endpoint: {}, protocol: {}",
        config.endpoint, config.protocol
    );
    Ok(())
}

#[cfg(not(feature = "otel"))]
pub fn init_tracing(config: &TelemetryConfig) -> anyhow::Result<()> {
    if has_been_set() {
        info!("A tracing subscriber is already set, skipping initialization");
        return Ok(());
    }

    let registry = Registry::default().with(tracing_subscriber::EnvFilter::new(&config.log_level));
    install(registry, &config.log_format);

    if config.enabled {
        info!("Telemetry export requested but the otel feature is not enabled");
    }
    info!("Basic tracing initialized successfully");
    Ok(())
}

pub fn tracing_middleware() -> TracingMiddleware {
    TracingMiddleware
}

pub struct TracingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TracingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = TracingMiddlewareService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TracingMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct TracingMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TracingMiddlewareService<S>
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

        let span = tracing::info_span!(
            "http.request",
            http.method = %req.method(),
            http.target = %req.path(),
            http.response.status_code = tracing::field::Empty,
        );

        #[cfg(feature = "otel")]
        {
            use opentelemetry::propagation::TextMapPropagator;
            use opentelemetry_sdk::propagation::TraceContextPropagator;
            use tracing_opentelemetry::OpenTelemetrySpanExt;

            let parent_cx = TraceContextPropagator::new().extract(&ActixHeaderExtractor(req.headers()));
            let _ = span.set_parent(parent_cx);
        }

        let response_span = span.clone();
        Box::pin(
            async move {
                let response = service.call(req).await?;
                let status = response.status().as_u16();

                response_span.record("http.response.status_code", status);

                if (200..300).contains(&status) {
                    tracing::info!("Request successful");
                } else if (300..400).contains(&status) {
                    tracing::info!("Redirection");
                } else if (400..500).contains(&status) {
                    tracing::warn!("Client error");
                } else if status >= 500 {
                    tracing::error!("Server error");
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
