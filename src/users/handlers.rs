use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{LoginData, NamedUser, ProfileUser, SignedUpUser, UserData},
    repo_types::{NewUser, Role},
};
use crate::{
    auth::{password, AuthUser, JwtKeys},
    db::RepoError,
    error::{ApiError, ApiResult},
    payload::Payload,
    response::{created, ok, Reply},
    state::AppState,
    validation::{is_valid_password, valid_string, FIELDS_INVALID, PASSWORD_FORMAT},
};

pub const EMAIL_TAKEN: &str = "email already in use";
pub const LOGIN_FAILED: &str = "user does not exist or password incorrect";
pub const NAME_UNCHANGED: &str = "user name unchanged";
pub const UPDATE_FAILED: &str = "failed to update user";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .route("/users/profile", get(get_profile).put(put_profile))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Payload,
) -> ApiResult<Reply<UserData<SignedUpUser>>> {
    let (Ok(name), Ok(email), Ok(password)) = (
        valid_string(payload.field("name")),
        valid_string(payload.field("email")),
        valid_string(payload.field("password")),
    ) else {
        warn!("signup fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    if !is_valid_password(password) {
        warn!("signup password format rejected");
        return Err(ApiError::validation(PASSWORD_FORMAT));
    }

    if state.users.find_by_email(email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::conflict(EMAIL_TAKEN));
    }

    let password_hash = password::hash(password.to_string()).await?;
    let user = state
        .users
        .create(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::User,
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict => {
                warn!(email = %email, "email registered concurrently");
                ApiError::conflict(EMAIL_TAKEN)
            }
            other => other.into(),
        })?;

    info!(user_id = %user.id, "user signed up");
    Ok(created(UserData {
        user: SignedUpUser {
            id: user.id,
            name: user.name,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(State(state): State<AppState>, payload: Payload) -> ApiResult<Reply<LoginData>> {
    let (Ok(email), Ok(password)) = (
        valid_string(payload.field("email")),
        valid_string(payload.field("password")),
    ) else {
        warn!("login fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    if !is_valid_password(password) {
        warn!("login password format rejected");
        return Err(ApiError::validation(PASSWORD_FORMAT));
    }

    // Unknown email and wrong password answer identically.
    let Some(user) = state.users.find_by_email(email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::validation(LOGIN_FAILED));
    };

    if !password::verify(password.to_string(), user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::validation(LOGIN_FAILED));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(created(LoginData {
        token,
        user: NamedUser { name: user.name },
    }))
}

#[instrument(skip(state, auth), fields(user_id = %auth.id, role = auth.role.as_str()))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Reply<UserData<ProfileUser>>> {
    let user = state
        .users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized(crate::auth::extractors::INVALID_TOKEN))?;

    Ok(ok(UserData {
        user: ProfileUser {
            name: user.name,
            email: user.email,
        },
    }))
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.id, role = auth.role.as_str()))]
pub async fn put_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Payload,
) -> ApiResult<Reply<UserData<NamedUser>>> {
    let Ok(name) = valid_string(payload.field("name")) else {
        warn!("profile fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    let current = state
        .users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized(crate::auth::extractors::INVALID_TOKEN))?;

    if current.name == name {
        warn!("profile name unchanged");
        return Err(ApiError::validation(NAME_UNCHANGED));
    }

    let affected = state.users.update_name(auth.id, &current.name, name).await?;
    if affected == 0 {
        warn!("profile update matched no rows");
        return Err(ApiError::update_failed(UPDATE_FAILED));
    }

    let updated = state
        .users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::update_failed(UPDATE_FAILED))?;

    info!(previous = %auth.name, name = %updated.name, "profile updated");
    Ok(ok(UserData {
        user: NamedUser { name: updated.name },
    }))
}
