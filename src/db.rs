//! Database setup for the application's SQLite store.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create all of the application's tables if they do not already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
