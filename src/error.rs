use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Handler error: any `anyhow::Error` rendered as a 500.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// The category of a store round trip, used to pick the alert shown when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Update,
    Add,
    Delete,
}
impl Operation {
    pub fn alert_message(self) -> &'static str {
        match self {
            Operation::Fetch => "할 일 목록을 불러오지 못했습니다.",
            Operation::Update => "할 일 상태를 변경하지 못했습니다.",
            Operation::Add => "할 일을 추가하지 못했습니다.",
            Operation::Delete => "할 일을 삭제하지 못했습니다.",
        }
    }
}
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Fetch => "fetching",
            Operation::Update => "updating",
            Operation::Add => "adding",
            Operation::Delete => "deleting",
        };
        f.write_str(verb)
    }
}
