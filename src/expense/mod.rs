//! Expense tracking: the expense list, creating expenses and deleting them.

mod create;
mod db;
mod delete;
mod domain;
mod list;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use db::{create_expense, create_expense_table};
pub use delete::delete_expense_endpoint;
pub use domain::{
    Category, CategoryFilter, Expense, ExpenseId, ExpenseListQuery, NewExpense, category_text_color,
};
pub use list::{filter_and_sort, get_expenses_page};
