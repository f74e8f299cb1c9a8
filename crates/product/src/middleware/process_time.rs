use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

pub static PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

/// Stamps every response with its handling time in seconds.
pub async fn process_time(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.6}")) {
        response
            .headers_mut()
            .insert(PROCESS_TIME_HEADER.clone(), value);
    }

    response
}
