//! The expense list: category filtering, ordering by date and the table view.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{Category, CategoryFilter, Expense, ExpenseListQuery, db::get_all_expenses},
    format::{date_datetime_attr, format_currency, format_date, truncate_graphemes},
    html::{
        BUTTON_DELETE_STYLE, HEADING_STYLE, LINK_STYLE, SELECT_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_CELL_STYLE, TABLE_ROW_STYLE,
    },
    layout::dashboard_layout,
    timezone::current_local_date,
    toast::{Notifier, TOAST_CONTAINER_SELECTOR},
};

/// The element ID of the expense list fragment that htmx swaps.
pub const EXPENSE_LIST_ID: &str = "expense-list";

const EXPENSE_LIST_SELECTOR: &str = "#expense-list";

/// The max number of graphemes to display in the description column before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 48;

/// The state needed for the expense list page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
    pub notifier: Arc<Notifier>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            notifier: state.notifier.clone(),
        }
    }
}

/// Keep the expenses that pass `filter`, most recent first.
///
/// The sort is stable: expenses on the same date keep their relative order
/// from `expenses`.
pub fn filter_and_sort<'a>(expenses: &'a [Expense], filter: &CategoryFilter) -> Vec<&'a Expense> {
    let mut visible: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| filter.matches(&expense.category))
        .collect();

    visible.sort_by(|a, b| b.date.cmp(&a.date));

    visible
}

/// Render the expense list page.
///
/// htmx requests (e.g., from the category filter) only get the list fragment,
/// and their errors are rendered as an error toast so that the notification
/// surface survives the `hx-target-error` swap.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<ExpenseListQuery>,
) -> Response {
    match render_expenses_page(&state, is_htmx_request, &query) {
        Ok(response) => response,
        Err(error) if is_htmx_request => error.into_toast_response(&state.notifier),
        Err(error) => error.into_response(),
    }
}

fn render_expenses_page(
    state: &ExpensesPageState,
    is_htmx_request: bool,
    query: &ExpenseListQuery,
) -> Result<Response, Error> {
    let filter = query.filter()?;

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?
    };

    let visible = filter_and_sort(&expenses, &filter);
    let list = expense_list_view(&visible, &filter);

    if is_htmx_request {
        return Ok(list.into_response());
    }

    let year = current_local_date(&state.local_timezone)?.year();

    Ok(dashboard_layout("Expenses", year, &state.notifier, &list).into_response())
}

/// Build a link to `path` that keeps the current category filter.
pub(crate) fn with_filter_query(path: &str, filter: &CategoryFilter) -> String {
    match serde_urlencoded::to_string([("category", filter.query_value())]) {
        Ok(query) => format!("{path}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode category filter for {path}: {error}");
            path.to_owned()
        }
    }
}

/// The expense list fragment: heading, category filter and the table or an
/// empty state.
pub(crate) fn expense_list_view(expenses: &[&Expense], filter: &CategoryFilter) -> Markup {
    html! {
        div id=(EXPENSE_LIST_ID) class="w-full"
        {
            div class="flex justify-between items-center mb-4"
            {
                h2 class=(HEADING_STYLE) { "Expense History" }

                div class="flex items-center gap-4"
                {
                    a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE) { "Add Expense" }

                    (category_filter_view(filter))
                }
            }

            @if expenses.is_empty() {
                (empty_state_view(filter))
            } @else {
                (expense_table_view(expenses, filter))
            }
        }
    }
}

fn category_filter_view(filter: &CategoryFilter) -> Markup {
    html! {
        select
            name="category"
            aria-label="Filter by category"
            hx-get=(endpoints::EXPENSES_VIEW)
            hx-trigger="change"
            hx-target=(EXPENSE_LIST_SELECTOR)
            hx-target-error=(TOAST_CONTAINER_SELECTOR)
            hx-swap="outerHTML"
            hx-push-url="true"
            class=(SELECT_STYLE)
        {
            option value=(CategoryFilter::ALL_VALUE) selected[!filter.is_active()]
            {
                "All Categories"
            }

            @for category in Category::KNOWN {
                option
                    value=(category.key())
                    selected[*filter == CategoryFilter::Only(category.clone())]
                {
                    (category.option_label())
                }
            }
        }
    }
}

fn empty_state_view(filter: &CategoryFilter) -> Markup {
    html! {
        div data-empty-state="true" class="rounded-lg shadow-sm p-8 text-center text-white"
        {
            p class="mb-2" { "No expenses found" }

            @if filter.is_active() {
                p { "Try changing the category filter or add new expenses." }
            }
        }
    }
}

fn expense_table_view(expenses: &[&Expense], filter: &CategoryFilter) -> Markup {
    html! {
        div class="bg-black/60 rounded-lg shadow-sm overflow-hidden"
        {
            div class="overflow-x-auto"
            {
                table class="min-w-full divide-y divide-gray-200"
                {
                    thead
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Action" }
                        }
                    }

                    tbody class="divide-y divide-gray-200"
                    {
                        @for expense in expenses {
                            (expense_row_view(expense, filter))
                        }
                    }
                }
            }
        }
    }
}

fn expense_row_view(expense: &Expense, filter: &CategoryFilter) -> Markup {
    let (description, tooltip) =
        truncate_graphemes(&expense.description, MAX_DESCRIPTION_GRAPHEMES);
    let delete_url = with_filter_query(
        &endpoints::format_endpoint(endpoints::EXPENSE, expense.id),
        filter,
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(date_datetime_attr(expense.date)) { (format_date(expense.date)) }
            }

            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }

            td class="px-6 border text-white py-4 whitespace-nowrap text-sm"
            {
                span
                    data-category=(expense.category.key())
                    class={ (expense.category.text_color()) " font-medium" }
                {
                    (expense.category.display_name())
                }
            }

            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }

            td class="px-6 py-4 border text-white whitespace-nowrap text-center"
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-target=(EXPENSE_LIST_SELECTOR)
                    hx-target-error=(TOAST_CONTAINER_SELECTOR)
                    hx-swap="outerHTML"
                    aria-label={ "Delete " (expense.description) }
                    class=(BUTTON_DELETE_STYLE)
                {
                    (trash_icon())
                }
            }
        }
    }
}

fn trash_icon() -> Markup {
    // Icon adapted from https://lucide.dev/icons/trash-2
    html! {
        svg
            aria-hidden="true"
            xmlns="http://www.w3.org/2000/svg"
            width="18"
            height="18"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
        {
            path d="M3 6h18" {}
            path d="M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6" {}
            path d="M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2" {}
            line x1="10" x2="10" y1="11" y2="17" {}
            line x1="14" x2="14" y1="11" y2="17" {}
        }
    }
}


#[cfg(test)]
mod expense_list_view_tests {
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        expense::{Category, CategoryFilter, Expense},
        test_utils::assert_valid_html,
    };

    use super::expense_list_view;

    fn render(expenses: &[Expense], filter: &CategoryFilter) -> Html {
        let refs = expenses.iter().collect::<Vec<_>>();

        Html::parse_fragment(&expense_list_view(&refs, filter).into_string())
    }

    fn select<'a>(html: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
        html.select(&Selector::parse(selector).unwrap()).collect()
    }

    fn text(element: &ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_owned()
    }

    fn lunch() -> Expense {
        Expense {
            id: 1,
            description: "Lunch".to_owned(),
            amount: 12.5,
            category: Category::Food,
            date: date!(2024 - 01 - 05),
        }
    }

    #[test]
    fn empty_list_without_filter_shows_only_base_message() {
        let html = render(&[], &CategoryFilter::All);

        assert_valid_html(&html);
        let paragraphs = select(&html, "[data-empty-state] p");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(text(&paragraphs[0]), "No expenses found");
        assert!(select(&html, "table").is_empty());
    }

    #[test]
    fn empty_list_with_filter_shows_hint() {
        let html = render(&[], &CategoryFilter::Only(Category::Health));

        let paragraphs = select(&html, "[data-empty-state] p");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(text(&paragraphs[0]), "No expenses found");
        assert_eq!(
            text(&paragraphs[1]),
            "Try changing the category filter or add new expenses."
        );
    }

    #[test]
    fn row_shows_formatted_values() {
        let html = render(&[lunch()], &CategoryFilter::All);

        assert_valid_html(&html);
        let rows = select(&html, "tbody tr");
        assert_eq!(rows.len(), 1);
        let cells = rows[0]
            .select(&Selector::parse("td").unwrap())
            .map(|cell| text(&cell))
            .collect::<Vec<_>>();
        assert_eq!(cells[0], "Jan 5, 2024");
        assert_eq!(cells[1], "Lunch");
        assert_eq!(cells[2], "Food");
        assert_eq!(cells[3], "$12.50");
    }

    #[test]
    fn category_label_is_colour_coded() {
        let html = render(&[lunch()], &CategoryFilter::All);

        let label = select(&html, "span[data-category='food']");
        assert_eq!(label.len(), 1);
        let class = label[0].value().attr("class").unwrap_or_default();
        assert!(
            class.contains(Category::Food.text_color()),
            "want class to contain {}, got {class}",
            Category::Food.text_color()
        );
    }

    #[test]
    fn unknown_category_uses_default_colour() {
        let mut expense = lunch();
        expense.category = Category::Unknown("pets".to_owned());

        let html = render(&[expense], &CategoryFilter::All);

        let label = select(&html, "span[data-category='pets']");
        assert_eq!(text(&label[0]), "Pets");
        let class = label[0].value().attr("class").unwrap_or_default();
        assert!(class.contains(crate::expense::domain::DEFAULT_CATEGORY_TEXT_COLOR));
    }

    #[test]
    fn delete_button_keeps_current_filter() {
        let html = render(&[lunch()], &CategoryFilter::Only(Category::Food));

        let buttons = select(&html, "button[hx-delete]");
        assert_eq!(buttons.len(), 1);
        let want_url = format!(
            "{}?category=food",
            endpoints::format_endpoint(endpoints::EXPENSE, 1)
        );
        assert_eq!(buttons[0].value().attr("hx-delete"), Some(want_url.as_str()));
        assert_eq!(buttons[0].value().attr("hx-target"), Some("#expense-list"));
    }

    #[test]
    fn filter_select_lists_all_and_every_category() {
        let html = render(&[], &CategoryFilter::All);

        let options = select(&html, "select[name='category'] option");
        let values = options
            .iter()
            .map(|option| option.value().attr("value").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                "all",
                "food",
                "transport",
                "entertainment",
                "shopping",
                "utilities",
                "health",
                "other"
            ]
        );
        assert_eq!(text(&options[1]), "Food & Dining");
    }

    #[test]
    fn filter_select_marks_current_filter() {
        let html = render(&[], &CategoryFilter::Only(Category::Utilities));

        let selected = select(&html, "select[name='category'] option[selected]");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value().attr("value"), Some("utilities"));
    }

    #[test]
    fn long_descriptions_are_truncated_with_tooltip() {
        let mut expense = lunch();
        expense.description = "x".repeat(100);

        let html = render(&[expense], &CategoryFilter::All);

        let cell = select(&html, "td[title]");
        assert_eq!(cell.len(), 1);
        assert_eq!(cell[0].value().attr("title"), Some("x".repeat(100).as_str()));
        assert!(text(&cell[0]).ends_with("..."));
    }
}
