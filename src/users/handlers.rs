use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    state::AppState,
    users::{
        domain::Phone,
        dto::{RegisterRequest, UserResponse},
        errors::RegistrationError,
        services::RegisterInput,
        validation::validate_register,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), (StatusCode, String)> {
    if let Err(e) = validate_register(&mut payload, &state.password_policy) {
        warn!(error = %e, "invalid registration request");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let input = RegisterInput {
        name: payload.name,
        email: payload.email,
        raw_password: payload.password,
        phones: payload
            .phones
            .map(|phones| phones.into_iter().map(Phone::from).collect()),
    };

    let user = state
        .registration
        .register(input)
        .await
        .map_err(error_status)?;

    info!(user_id = %user.id, "registration response sent");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

fn error_status(err: RegistrationError) -> (StatusCode, String) {
    match err {
        RegistrationError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        RegistrationError::Store(e) => {
            error!(error = %e, "registration store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Service temporarily unavailable, please try again".into(),
            )
        }
        RegistrationError::Internal(e) => {
            error!(error = ?e, "registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            )
        }
    }
}
