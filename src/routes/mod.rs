pub mod auth_v1;
pub mod reflection;

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::state::SharedState;

/// JSON body extractor/response whose decode failures come back as
/// `invalid_argument` errors in the usual envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct RpcJson<T>(pub T);

impl<T: Serialize> IntoResponse for RpcJson<T> {
    fn into_response(self) -> Response {
        let Self(value) = self;
        axum::Json(value).into_response()
    }
}

pub fn rpc_routes() -> Router<SharedState> {
    Router::new()
        .route(auth_v1::GET_PATH, post(auth_v1::get))
        .route(auth_v1::CREATE_PATH, post(auth_v1::create))
        .route("/reflection", get(reflection::list_services))
}
