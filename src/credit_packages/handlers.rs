use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use tracing::{info, instrument, warn};

use super::repo_types::{CreditPackage, CreditPackageItem, NewCreditPackage};
use crate::{
    db::RepoError,
    error::{ApiError, ApiResult},
    payload::Payload,
    response::{ok, ok_empty, Reply},
    state::AppState,
    validation::{
        parse_id, valid_non_negative_integer, valid_string, DUPLICATE, FIELDS_INVALID, INVALID_ID,
    },
};

pub fn credit_package_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/credit-package",
            get(list_credit_packages).post(create_credit_package),
        )
        .route("/credit-package/", delete(delete_credit_package))
        .route("/credit-package/:package_id", delete(delete_credit_package))
}

#[instrument(skip(state))]
pub async fn list_credit_packages(
    State(state): State<AppState>,
) -> ApiResult<Reply<Vec<CreditPackageItem>>> {
    let packages = state.credit_packages.list().await?;
    Ok(ok(packages))
}

#[instrument(skip(state, payload))]
pub async fn create_credit_package(
    State(state): State<AppState>,
    payload: Payload,
) -> ApiResult<Reply<CreditPackage>> {
    let (Ok(name), Ok(credit_amount), Ok(price)) = (
        valid_string(payload.field("name")),
        valid_non_negative_integer(payload.field("credit_amount")),
        valid_non_negative_integer(payload.field("price")),
    ) else {
        warn!("credit package fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    if state.credit_packages.find_by_name(name).await?.is_some() {
        warn!(name = %name, "credit package already exists");
        return Err(ApiError::conflict(DUPLICATE));
    }

    let package = state
        .credit_packages
        .create(NewCreditPackage {
            name: name.to_string(),
            credit_amount,
            price,
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict => ApiError::conflict(DUPLICATE),
            other => other.into(),
        })?;

    info!(package_id = %package.id, "credit package created");
    Ok(ok(package))
}

#[instrument(skip(state))]
pub async fn delete_credit_package(
    State(state): State<AppState>,
    package_id: Option<Path<String>>,
) -> ApiResult<Reply<()>> {
    let package_id = package_id.map(|Path(id)| id).unwrap_or_default();
    let Some(id) = parse_id(&package_id) else {
        warn!(package_id = %package_id, "malformed credit package id");
        return Err(ApiError::validation(INVALID_ID));
    };

    if state.credit_packages.delete(id).await? == 0 {
        warn!(package_id = %id, "credit package not found");
        return Err(ApiError::not_found(INVALID_ID));
    }

    info!(package_id = %id, "credit package deleted");
    Ok(ok_empty())
}
