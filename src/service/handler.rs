// * HTTP surface: /ships, /health and /metrics on a single hyper server

use chrono::Utc;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde_json::json;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::network::{RequestIdentity, UpstreamClient, UpstreamError};
use crate::ops::telemetry;
use crate::refinery::dates::current_source_year;
use crate::refinery::{Refinery, RefineryConfig, RefineryResult, Vocabulary};
use crate::service::envelope::{ResponseOptions, ShipsEnvelope};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Shared, read-only state for every request
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub client: UpstreamClient,
    pub refinery: Refinery,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Result<Self, UpstreamError> {
        let identity = RequestIdentity::new(settings.user_agent.clone());
        let client = UpstreamClient::new(&identity, settings.fetch_timeout)?;
        let refinery = Refinery::with_config(
            RefineryConfig {
                min_filled_cells: settings.min_filled_cells,
                positional_layout: settings.positional_layout,
            },
            Arc::new(Vocabulary::standard()),
        );

        Ok(Self {
            settings,
            client,
            refinery,
        })
    }

    /// Fetches the upstream page and runs it through the refinery.
    /// Upstream failures are recorded and returned whole; nothing is retried.
    pub async fn fetch_and_refine(&self) -> Result<RefineryResult, UpstreamError> {
        let fetched = match self.client.fetch_tables(&self.settings.upstream_url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                telemetry::record_upstream_failure(e.kind());
                return Err(e);
            }
        };
        telemetry::record_fetch_duration(fetched.elapsed.as_secs_f64());

        let result = self.refinery.process(fetched.tables, current_source_year());
        telemetry::record_refinery_pass(
            result.stats.table_count,
            result.stats.record_count,
            result.stats.rows_dropped,
        );
        Ok(result)
    }

    /// Renders a refinery result as the JSON envelope
    pub fn render(&self, result: &RefineryResult, options: ResponseOptions) -> serde_json::Result<String> {
        ShipsEnvelope::new(
            self.settings.upstream_url.as_str(),
            Utc::now(),
            &result.records,
            options.include_raw,
        )
        .to_json(options.pretty)
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    respond(status, JSON_CONTENT_TYPE, json!({ "error": message }).to_string())
}

async fn ships(state: &AppState, options: ResponseOptions) -> Response<Body> {
    let result = match state.fetch_and_refine().await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Upstream failure");
            telemetry::record_request_failure();
            return error_response(StatusCode::BAD_GATEWAY, &e.to_string());
        }
    };

    match state.render(&result, options) {
        Ok(body) => {
            telemetry::record_request_success();
            respond(StatusCode::OK, JSON_CONTENT_TYPE, body)
        }
        Err(e) => {
            error!(error = %e, "Failed to serialise envelope");
            telemetry::record_request_failure();
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "serialisation failed")
        }
    }
}

fn metrics() -> Response<Body> {
    let mut response = respond(StatusCode::OK, TEXT_CONTENT_TYPE, telemetry::get_metrics_string());
    if let Ok(value) = HeaderValue::from_str(&telemetry::metrics_content_type()) {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    response
}

/// Routes one request
pub async fn handle(state: Arc<AppState>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    if req.method() != Method::GET {
        return Ok(respond(StatusCode::NOT_FOUND, TEXT_CONTENT_TYPE, "Not Found"));
    }

    let response = match req.uri().path() {
        "/ships" => ships(&state, ResponseOptions::from_query(req.uri().query())).await,
        "/health" => respond(StatusCode::OK, TEXT_CONTENT_TYPE, "OK"),
        "/metrics" => metrics(),
        _ => respond(StatusCode::NOT_FOUND, TEXT_CONTENT_TYPE, "Not Found"),
    };
    Ok(response)
}

/// Serves until `shutdown` resolves
pub async fn serve<F>(state: Arc<AppState>, shutdown: F) -> Result<(), hyper::Error>
where
    F: Future<Output = ()>,
{
    let addr = state.settings.listen_addr;
    let make_svc = make_service_fn(move |_conn| {
        let state = state.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| handle(state.clone(), req))) }
    });

    let server = Server::try_bind(&addr)?
        .serve(make_svc)
        .with_graceful_shutdown(shutdown);

    info!(addr = %addr, "Lineup service listening");
    server.await?;
    info!("Lineup service stopped");
    Ok(())
}
