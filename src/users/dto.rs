use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SignedUpUser {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NamedUser {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub name: String,
    pub email: String,
}

/// `{user: ...}` wrapper used by every user response.
#[derive(Debug, Serialize)]
pub struct UserData<T> {
    pub user: T,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub user: NamedUser,
}
