use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Uniform JSON wrapper: `{status, data?, message?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn empty() -> Self {
        Self {
            status: "success",
            data: None,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: "failed",
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            data: None,
            message: Some(message.into()),
        }
    }
}

pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

pub fn ok<T: Serialize>(data: T) -> Reply<T> {
    (StatusCode::OK, Json(Envelope::success(data)))
}

pub fn created<T: Serialize>(data: T) -> Reply<T> {
    (StatusCode::CREATED, Json(Envelope::success(data)))
}

pub fn ok_empty() -> Reply<()> {
    (StatusCode::OK, Json(Envelope::empty()))
}
