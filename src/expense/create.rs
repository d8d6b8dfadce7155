//! Expense creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::{Category, NewExpense, create_expense, domain::ExpenseFormData},
    format::date_datetime_attr,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HEADING_STYLE, LINK_STYLE,
    },
    layout::dashboard_layout,
    timezone::current_local_date,
    toast::{Notifier, TOAST_CONTAINER_SELECTOR},
};

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    pub local_timezone: String,
    pub notifier: Arc<Notifier>,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            notifier: state.notifier.clone(),
        }
    }
}

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub notifier: Arc<Notifier>,
}

impl FromRef<AppState> for CreateExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifier: state.notifier.clone(),
        }
    }
}

/// The values to pre-fill the expense form with.
struct FormValues<'a> {
    description: &'a str,
    amount: Option<f64>,
    category: Option<&'a str>,
    date: Date,
}

/// Render the expense creation page.
pub async fn get_new_expense_page(
    State(state): State<NewExpensePageState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let values = FormValues {
        description: "",
        amount: None,
        category: None,
        date: today,
    };

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class={ (HEADING_STYLE) " mb-6" } { "Add Expense" }

            (expense_form_view(&values, ""))

            a href=(endpoints::EXPENSES_VIEW) class={ (LINK_STYLE) " mt-6" } { "Back to expenses" }
        }
    };

    Ok(dashboard_layout("Add Expense", today.year(), &state.notifier, &content).into_response())
}

/// Handle expense creation form submission.
///
/// Invalid input re-renders the form with an error message. A body that
/// cannot be deserialized gets an error toast. On success the client is
/// redirected to the expense list.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseEndpointState>,
    form: Result<Form<ExpenseFormData>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!("Rejected expense form: {rejection}");
            return Error::InvalidForm(rejection.body_text()).into_toast_response(&state.notifier);
        }
    };

    let values = FormValues {
        description: &form.description,
        amount: Some(form.amount),
        category: Some(&form.category),
        date: form.date,
    };

    let new_expense = form
        .category
        .parse::<Category>()
        .and_then(|category| NewExpense::new(&form.description, form.amount, category, form.date));

    let new_expense = match new_expense {
        Ok(new_expense) => new_expense,
        Err(error) => {
            return expense_form_view(&values, &format!("Error: {error}")).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_toast_response(&state.notifier);
        }
    };

    match create_expense(new_expense, &connection) {
        Ok(expense) => {
            tracing::info!("Created expense {}", expense.id);

            (
                HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");

            error.into_toast_response(&state.notifier)
        }
    }
}

fn expense_form_view(values: &FormValues<'_>, error_message: &str) -> Markup {
    let amount = values.amount.map(|amount| amount.to_string());

    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-target-error=(TOAST_CONTAINER_SELECTOR)
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="What did you spend money on?"
                    value=(values.description)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    value=[amount]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::KNOWN {
                        option
                            value=(category.key())
                            selected[values.category == Some(category.key())]
                        {
                            (category.option_label())
                        }
                    }
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    value=(date_datetime_attr(values.date))
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

#[cfg(test)]
mod new_expense_page_tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_select, assert_form_submit_button,
            assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document,
        },
        toast::Notifier,
    };

    use super::{NewExpensePageState, get_new_expense_page};

    #[tokio::test]
    async fn render_page() {
        let state = NewExpensePageState {
            local_timezone: "Etc/UTC".to_owned(),
            notifier: Arc::new(Notifier::default()),
        };

        let response = get_new_expense_page(State(state))
            .await
            .expect("Could not render page");

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_select(&form, "category", 7);
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = NewExpensePageState {
            local_timezone: "Not/AZone".to_owned(),
            notifier: Arc::new(Notifier::default()),
        };

        let result = get_new_expense_page(State(state)).await;

        assert_eq!(
            result.map(|_| ()),
            Err(crate::Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }
}

#[cfg(test)]
mod create_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        endpoints,
        expense::{
            Category, Expense, create_expense_table,
            db::{get_all_expenses, get_expense},
            domain::ExpenseFormData,
        },
        test_utils::{
            assert_content_type, assert_form_error_message, assert_form_input_with_value,
            assert_hx_redirect, assert_valid_html, must_get_form, parse_html_fragment,
        },
        toast::Notifier,
    };

    use super::{CreateExpenseEndpointState, create_expense_endpoint};

    fn get_create_expense_state() -> CreateExpenseEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_expense_table(&connection).expect("Could not create expense table");

        CreateExpenseEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            notifier: Arc::new(Notifier::default()),
        }
    }

    fn form(description: &str, amount: f64, category: &str) -> ExpenseFormData {
        ExpenseFormData {
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            date: date!(2024 - 03 - 10),
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_create_expense_state();
        let want = Expense {
            id: 1,
            description: "Groceries".to_owned(),
            amount: 54.2,
            category: Category::Food,
            date: date!(2024 - 03 - 10),
        };

        let response = create_expense_endpoint(
            State(state.clone()),
            Ok(Form(form("  Groceries ", 54.2, "food"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::EXPENSES_VIEW);
        assert_eq!(Ok(want), get_expense(1, &state.db_connection.lock().unwrap()));
    }

    #[tokio::test]
    async fn rejects_empty_description() {
        let state = get_create_expense_state();

        let response =
            create_expense_endpoint(State(state.clone()), Ok(Form(form("   ", 10.0, "food"))))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Description cannot be empty");
        assert!(get_all_expenses(&state.db_connection.lock().unwrap()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_non_positive_amount_and_keeps_input() {
        let state = get_create_expense_state();

        let response =
            create_expense_endpoint(State(state), Ok(Form(form("Coffee", -4.5, "food")))).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(
            &form,
            "Error: -4.5 is not a valid amount, expected a number greater than zero",
        );
        assert_form_input_with_value(&form, "description", "text", "Coffee");
        assert_form_input_with_value(&form, "amount", "number", "-4.5");
        assert_form_input_with_value(&form, "date", "date", "2024-03-10");
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let state = get_create_expense_state();

        let response =
            create_expense_endpoint(State(state), Ok(Form(form("Cat food", 20.0, "pets")))).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: \"pets\" is not a valid category");
    }
}
