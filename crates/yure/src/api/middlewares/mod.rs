use axum::{
  body::Body,
  extract::Request as AxumRequest,
  http::{HeaderName, HeaderValue, Request},
  middleware::Next,
  response::Response,
};
use metrics::counter;
use tracing::Span;
use uuid::Uuid;

pub(crate) mod json_rejection;
pub(crate) mod logging;

pub(crate) const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Copy, Debug)]
pub(crate) struct RequestId(pub Uuid);

/// Tag the request with a fresh identifier, echoed back in `x-request-id`.
pub(crate) async fn request_id(mut request: Request<Body>, next: Next) -> Response {
  let request_id = Uuid::new_v4();

  request.extensions_mut().insert(RequestId(request_id));

  let mut response = next.run(request).await;

  if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
  }

  response
}

pub(super) async fn metrics(request: Request<Body>, next: Next) -> Response {
  let method = request.method().to_string();
  let response = next.run(request).await;

  counter!("yure_http_requests_total", "method" => method, "status" => response.status().as_u16().to_string()).increment(1);

  response
}

pub(crate) fn create_request_span(request: &AxumRequest) -> Span {
  let request_id = request.extensions().get::<RequestId>().map(|RequestId(id)| tracing::field::display(*id));

  tracing::info_span!("request", request_id, method = %request.method(), path = request.uri().path())
}
