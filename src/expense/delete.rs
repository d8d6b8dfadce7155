//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{
        ExpenseId, ExpenseListQuery,
        db::{delete_expense, get_all_expenses, get_expense},
        list::{expense_list_view, filter_and_sort},
    },
    toast::Notifier,
};

/// The message shown after an expense is deleted.
pub const DELETE_SUCCESS_MESSAGE: &str = "Expense deleted successfully";

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub notifier: Arc<Notifier>,
}

impl FromRef<AppState> for DeleteExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifier: state.notifier.clone(),
        }
    }
}

/// Handle expense deletion.
///
/// On success, responds with the re-rendered expense list for the filter in
/// the query string and a success toast swapped out-of-band into the
/// notification surface. Failures respond with an error toast instead.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<ExpenseListQuery>,
    State(state): State<DeleteExpenseEndpointState>,
) -> Response {
    let notifier = &state.notifier;

    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(error) => return error.into_toast_response(notifier),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_toast_response(notifier);
        }
    };

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(Error::NotFound) => {
            tracing::warn!("Tried to delete expense {expense_id} which does not exist");
            return Error::DeleteMissingExpense.into_toast_response(notifier);
        }
        Err(error) => {
            tracing::error!("Could not look up expense {expense_id} to delete it: {error}");
            return error.into_toast_response(notifier);
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(()) => tracing::info!("Deleted expense {expense_id} ({:?})", expense.description),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting expense {expense_id}: {error}"
            );
            return error.into_toast_response(notifier);
        }
    }

    let expenses = match get_all_expenses(&connection) {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::error!("Failed to retrieve expenses after deleting {expense_id}: {error}");
            return error.into_toast_response(notifier);
        }
    };

    let visible = filter_and_sort(&expenses, &filter);
    let toast = notifier.success(DELETE_SUCCESS_MESSAGE);

    html! {
        (expense_list_view(&visible, &filter))
        (notifier.surface_oob(&[toast]))
    }
    .into_response()
}
