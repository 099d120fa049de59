use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug)]
pub enum AppError {
    Unexpected,

    UsersNotFound,
    UsersNotAnEmployer,
    UsersNotAnEmployee,

    WorkersNotFound,

    MessagesSelfRecipient,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",

            AppError::UsersNotFound => "users.not_found",
            AppError::UsersNotAnEmployer => "users.not_an_employer",
            AppError::UsersNotAnEmployee => "users.not_an_employee",

            AppError::WorkersNotFound => "workers.not_found",

            AppError::MessagesSelfRecipient => "messages.self_recipient",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",

            AppError::UsersNotFound => "This user does not exist.",
            AppError::UsersNotAnEmployer => "This user is not an employer.",
            AppError::UsersNotAnEmployee => "This user is not an employee.",

            AppError::WorkersNotFound => "This worker profile does not exist.",

            AppError::MessagesSelfRecipient => "You cannot send a message to yourself.",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::MessagesSelfRecipient => StatusCode::BAD_REQUEST,

            AppError::UsersNotAnEmployer | AppError::UsersNotAnEmployee => StatusCode::FORBIDDEN,

            AppError::UsersNotFound | AppError::WorkersNotFound => StatusCode::NOT_FOUND,

            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
