use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::ApiError, validation::FIELDS_INVALID};

/// Raw JSON request body.
///
/// Fields are classified by `validation` instead of being deserialized into a
/// typed struct, so wrong-typed input becomes a 400 rather than a rejection
/// from the extractor. A body that does not parse is treated as `null`.
#[derive(Debug, Clone)]
pub struct Payload(pub Value);

impl Payload {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            ApiError::validation(FIELDS_INVALID)
        })?;
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            debug!(error = %e, "request body is not JSON");
            Value::Null
        });
        Ok(Payload(value))
    }
}
