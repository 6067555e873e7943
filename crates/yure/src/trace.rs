use std::io::Write;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::config::{Config, Env};

pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  let builder = PrometheusBuilder::new()
    .add_global_label("service", "yure")
    .set_buckets_for_metric(Matcher::Full("yure_normalize_latency_seconds".into()), &[0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005])?
    .set_buckets_for_metric(Matcher::Full("yure_index_build_latency_seconds".into()), &[0.01, 0.05, 0.1, 0.5, 1.0, 5.0])?;

  builder.install_recorder()
}

pub struct TraceGuards {
  _logging: WorkerGuard,
}

pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> TraceGuards {
  let (appender, logging_guard) = tracing_appender::non_blocking(writer);

  let logging_formatter = match config.env {
    #[cfg(not(test))]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(true).boxed(),
    Env::Production => fmt::layer().json().flatten_event(true).with_current_span(true).with_span_list(false).with_writer(appender).boxed(),

    #[cfg(test)]
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(false).boxed(),
  };

  let filter = EnvFilter::builder().try_from_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry().with(filter.and_then(logging_formatter)).init();

  TraceGuards { _logging: logging_guard }
}
