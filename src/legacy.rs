use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::{credit_packages, response::Envelope, skills, state::AppState};

pub const NO_SUCH_ROUTE: &str = "no such route";

const ALLOW_HEADERS: &str = "Content-Type, Authorization, Content-Length, X-Requested-With";
const ALLOW_METHODS: &str = "PATCH, POST, GET, OPTIONS, DELETE";

/// Routes served under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(credit_packages::router())
        .merge(skills::legacy_router())
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::PATCH,
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::CONTENT_LENGTH,
            header::HeaderName::from_static("x-requested-with"),
        ])
}

/// Any `OPTIONS` request is answered here, whether or not the path exists.
pub async fn answer_options(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }

    debug!(uri = %req.uri(), "answering options request");
    let mut res = Response::new(Body::empty());
    let headers = res.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    res
}

/// A known path hit with an unrouted method is answered like an unknown path.
pub async fn unmatched_method(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }
    debug!("method not routed for path");
    no_such_route().await.into_response()
}

pub async fn no_such_route() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(Envelope::failed(NO_SUCH_ROUTE)))
}
