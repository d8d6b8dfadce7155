//! ExpenseTracker is a web app for keeping track of where your money goes.
//!
//! This library provides an HTTP server that directly serves HTML pages.
//! Pages are rendered on the server and htmx swaps in partial updates, e.g.,
//! when the category filter changes or an expense is deleted.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod expense;
mod format;
mod html;
mod internal_server_error;
mod layout;
mod logging;
mod not_found;
mod routing;
mod timezone;
mod toast;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{
    Category, CategoryFilter, Expense, ExpenseId, NewExpense, category_text_color, create_expense,
    filter_and_sort,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use toast::{IconTheme, Notifier, ToastConfig, ToastPosition, ToastStyle};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an expense that does not exist.
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An empty (or whitespace only) string was used as an expense description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The amount of an expense must be a finite number greater than zero.
    #[error("{0} is not a valid amount, expected a number greater than zero")]
    InvalidAmount(f64),

    /// The submitted form could not be deserialized, e.g. a non-numeric amount.
    #[error("invalid expense form: {0}")]
    InvalidForm(String),

    /// The string does not name one of the known expense categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                html::error_view(
                    "Bad Request",
                    "400",
                    "Unknown category",
                    &format!(
                        "\"{category}\" is not a category. Pick one from the category filter instead."
                    ),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as a toast for endpoints that are called via htmx.
    fn into_toast_response(self, notifier: &Notifier) -> Response {
        let (status_code, message) = match self {
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                "Could not delete expense: it may have already been deleted".to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The expense could not be found".to_owned(),
            ),
            Error::InvalidCategory(_)
            | Error::InvalidAmount(_)
            | Error::EmptyDescription
            | Error::InvalidForm(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not get local timezone \"{timezone}\""),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, check the server logs for more details".to_owned(),
                )
            }
        };

        (status_code, notifier.error(&message)).into_response()
    }
}
