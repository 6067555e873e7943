use std::net::SocketAddr;

use axum::{
  body::{Body, HttpBody},
  extract::ConnectInfo,
  http::Request,
  middleware::Next,
  response::Response,
};
use jiff::Timestamp;
use tokio::time::Instant;

use crate::api::middlewares::RequestId;

/// One access log line per request, emitted once the response is ready.
pub(crate) async fn api_logger(request: Request<Body>, next: Next) -> Response {
  let received_at = Timestamp::now();
  let method = request.method().clone();
  let uri = request.uri().clone();
  let request_id = request.extensions().get::<RequestId>().map(|RequestId(id)| *id);
  let remote = match request.extensions().get::<ConnectInfo<SocketAddr>>() {
    Some(ConnectInfo(addr)) => addr.ip().to_string(),
    None => "-".to_string(),
  };

  let then = Instant::now();
  let response = next.run(request).await;

  tracing::info!(
    request_id = request_id.map(tracing::field::display),
    time = %received_at,
    remote,
    method = %method,
    path = uri.path(),
    status = response.status().as_u16(),
    latency = then.elapsed().as_millis(),
    size = response.size_hint().exact().unwrap_or(0),
    "{method} {uri}",
  );

  response
}
