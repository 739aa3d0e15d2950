use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RpcJson;
use crate::deadline::Deadline;
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::state::SharedState;

pub const SERVICE: &str = "auth_v1.AuthV1";
pub const GET_PATH: &str = "/auth_v1.AuthV1/Get";
pub const CREATE_PATH: &str = "/auth_v1.AuthV1/Create";

// Absent fields decode to zero values so validation, not the decoder,
// reports them.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetRequest {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GetResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for GetResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: i32::from(user.role),
            created_at: user.created_at,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
    pub role: i32,
}

impl From<CreateRequest> for NewUser {
    fn from(req: CreateRequest) -> Self {
        NewUser {
            email: req.email,
            name: req.name,
            password: req.password,
            password_confirm: req.password_confirm,
            role: req.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: i64,
}

pub async fn get(
    State(state): State<SharedState>,
    deadline: Deadline,
    RpcJson(req): RpcJson<GetRequest>,
) -> Result<RpcJson<GetResponse>, AppError> {
    let user = state.auth.get(req.id, deadline).await?;
    Ok(RpcJson(user.into()))
}

pub async fn create(
    State(state): State<SharedState>,
    deadline: Deadline,
    RpcJson(req): RpcJson<CreateRequest>,
) -> Result<RpcJson<CreateResponse>, AppError> {
    let id = state.auth.create(req.into(), deadline).await?;
    Ok(RpcJson(CreateResponse { id }))
}
