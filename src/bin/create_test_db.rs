use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{Category, NewExpense, create_expense, initialize_db};

/// A utility for creating a test database for the ExpenseTracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();
    let expenses = sample_expenses();

    println!("Creating {} test expenses...", expenses.len());

    for (description, amount, category, days_ago) in expenses {
        let date = today - Duration::days(days_ago);
        create_expense(NewExpense::new(description, amount, category, date)?, &conn)?;
    }

    // Rows written by older versions or by hand can hold categories the app
    // does not know about. Include one so the fallback styling is visible.
    conn.execute(
        "INSERT INTO expense (description, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
        ("Dog food", 32.0, "pets", today - Duration::days(9)),
    )?;

    println!("Success!");

    Ok(())
}

/// Description, amount, category and how many days ago the expense was made.
fn sample_expenses() -> Vec<(&'static str, f64, Category, i64)> {
    vec![
        ("Weekly groceries", 142.35, Category::Food, 0),
        ("Bus pass top-up", 20.0, Category::Transport, 1),
        ("Movie tickets", 36.5, Category::Entertainment, 2),
        ("Flat white", 5.5, Category::Food, 2),
        ("Running shoes", 189.99, Category::Shopping, 4),
        ("Power bill", 164.2, Category::Utilities, 7),
        ("Pharmacy", 23.75, Category::Health, 8),
        ("Birthday present", 45.0, Category::Other, 12),
        ("Internet", 79.99, Category::Utilities, 14),
        ("Dinner with friends", 68.4, Category::Food, 15),
        ("Petrol", 95.12, Category::Transport, 18),
        ("Concert ticket", 120.0, Category::Entertainment, 30),
    ]
}
