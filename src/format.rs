//! Formatting of amounts, dates and text for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

const DATE_ATTRIBUTE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// Format `amount` as dollars and cents, e.g. "$1,234.50" or "-$3.20".
pub fn format_currency(amount: f64) -> String {
    static DOLLARS_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let dollars_fmt = DOLLARS_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .inspect_err(|error| tracing::error!("Could not create currency formatter: {error}"))
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
    });

    let total_cents = (amount.abs() * 100.0).round() as u64;
    let dollars = total_cents / 100;
    let cents = total_cents % 100;
    let sign = if amount < 0.0 && total_cents > 0 {
        "-"
    } else {
        ""
    };

    let dollars = match dollars_fmt {
        Some(formatter) if dollars > 0 => formatter.fmt_string(dollars as f64),
        _ => dollars.to_string(),
    };

    format!("{sign}${dollars}.{cents:02}")
}

/// Format `date` for display, e.g. "Jan 5, 2024".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format `date` for the `datetime` attribute of a `<time>` element.
pub fn date_datetime_attr(date: Date) -> String {
    date.format(DATE_ATTRIBUTE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Shorten `text` to at most `max_graphemes` graphemes, ending in "..." when
/// truncated.
///
/// Returns the text to display and, if it was truncated, the full text for a
/// tooltip.
pub fn truncate_graphemes(text: &str, max_graphemes: usize) -> (String, Option<&str>) {
    let length = text.graphemes(true).count();

    if length <= max_graphemes {
        (text.to_owned(), None)
    } else {
        let truncated: String = text
            .graphemes(true)
            .take(max_graphemes.saturating_sub(3))
            .collect();
        (truncated + "...", Some(text))
    }
}
