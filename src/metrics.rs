use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::error;

use crate::modules::dashboard::view::Activation;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads OBSERVABILITY_ENABLED once; anything but "false"/"0" enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and its upkeep task.
/// Returns None when observability is disabled or the recorder cannot be
/// installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )
        .and_then(|builder| builder.install_recorder());

    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "failed to install Prometheus recorder");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status.to_string()).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_sign_in_success() {
    if !is_observability_enabled() {
        return;
    }
    counter!("sign_ins_total", "status" => "success").increment(1);
    counter!("tokens_issued_total", "type" => "access").increment(1);
}

pub fn track_sign_in_failure(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("sign_ins_total", "status" => "failure", "reason" => reason).increment(1);
}

pub fn track_sign_up() {
    if !is_observability_enabled() {
        return;
    }
    counter!("sign_ups_total").increment(1);
}

pub fn track_sign_out() {
    if !is_observability_enabled() {
        return;
    }
    counter!("sign_outs_total").increment(1);
}

/// Counts dashboard loads by outcome: `ok`, `failed` or `stale`.
pub fn track_dashboard_load(activation: &Activation) {
    if !is_observability_enabled() {
        return;
    }
    let outcome = if !activation.committed {
        "stale"
    } else if activation.displayed.load.is_failed() {
        "failed"
    } else {
        "ok"
    };
    counter!("dashboard_loads_total", "outcome" => outcome).increment(1);
}
