pub mod contact;
pub mod portfolio;

use anyhow::Error;
use axum::{
    extract::FromRef,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{notify::Notifiers, portfolio::Portfolio, store::ContactStore};

#[derive(Clone, Copy, FromRef)]
pub struct ServerState {
    pub portfolio: &'static Portfolio,
    pub store: &'static ContactStore,
    pub notifiers: &'static Notifiers,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/profile", get(portfolio::profile))
        .route("/api/projects", get(portfolio::projects))
        .route("/api/contact", post(contact::contact))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::default().include_headers(true)),
                )
                // Any origin may call the API, restrict this before exposing it publicly.
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub enum ServerError {
    MissingField(&'static str),
    BadRequest(&'static str),
    Rejection(Response),
    Internal(Error),
}

impl<E> From<E> for ServerError
where
    Error: From<E>,
{
    fn from(err: E) -> Self {
        Self::Internal(Error::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingField(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": "Field required", "field": field })),
            )
                .into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": msg }))).into_response()
            }
            Self::Rejection(resp) => resp,
            Self::Internal(err) => {
                tracing::error!("{:#}", err);

                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
