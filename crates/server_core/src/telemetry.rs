//! Telemetry bootstrap for hosts (tracing + optional Prometheus metrics).

use anyhow::Result;
use data_runtime::configs::telemetry::TelemetryCfg;

pub struct TelemetryGuard;

pub fn init_telemetry(cfg: &TelemetryCfg) -> Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if cfg.json_logs.unwrap_or(false) {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };
    // A second init (tests, embedding hosts) keeps the first subscriber
    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        log::debug!("telemetry: subscriber already installed");
    }
    if let Some(addr) = &cfg.metrics_addr {
        let addr = match addr.parse::<std::net::SocketAddr>() {
            Ok(a) => a,
            Err(_e) => {
                metrics::counter!("sim.errors_total", "site" => "telemetry.parse_addr").increment(1);
                std::net::SocketAddr::from(([127, 0, 0, 1], 9100))
            }
        };
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        if let Err(e) = builder.with_http_listener(addr).install() {
            tracing::warn!(target: "telemetry", error = %e, "prometheus exporter not installed");
        }
    }
    tracing::info!(
        target: "telemetry",
        log_level = ?cfg.log_level,
        json_logs = ?cfg.json_logs,
        metrics_addr = ?cfg.metrics_addr,
        "telemetry initialized"
    );
    Ok(TelemetryGuard)
}
