//! Core expense domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// The style token used for categories that have no colour of their own.
pub const DEFAULT_CATEGORY_TEXT_COLOR: &str = "text-gray-300";

/// What an expense was spent on.
///
/// New expenses must use one of the known categories. [Category::Unknown]
/// only exists so that rows written by something other than this app still
/// render, using the default style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    Food,
    /// Public transport, fuel, parking.
    Transport,
    /// Movies, games, concerts.
    Entertainment,
    /// Clothes and other purchases.
    Shopping,
    /// Power, water, internet, phone.
    Utilities,
    /// Doctor visits, medicine.
    Health,
    /// Anything else.
    Other,
    /// A stored category key that is not in the known set.
    Unknown(String),
}

impl Category {
    /// The known categories in the order they are offered to users.
    pub const KNOWN: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Health,
        Category::Other,
    ];

    /// The lowercase key used in the database and in URLs.
    pub fn key(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Utilities => "utilities",
            Category::Health => "health",
            Category::Other => "other",
            Category::Unknown(key) => key,
        }
    }

    /// Parse a key read back from the database.
    ///
    /// Unlike [Category::from_str], keys outside the known set are kept as
    /// [Category::Unknown] instead of being rejected.
    pub fn from_stored(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!("Found unknown expense category \"{key}\", using the default style");
            Category::Unknown(key.to_owned())
        })
    }

    /// The key with its first letter capitalised, e.g. "Food".
    pub fn display_name(&self) -> String {
        let key = self.key();
        let mut chars = key.chars();

        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// The longer label shown in the category filter and form, e.g. "Food & Dining".
    pub fn option_label(&self) -> &str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Health => "Health & Medical",
            Category::Other => "Other",
            Category::Unknown(key) => key,
        }
    }

    /// The text colour style token for the category.
    pub fn text_color(&self) -> &'static str {
        match self {
            Category::Food => "text-green-400",
            Category::Transport => "text-blue-400",
            Category::Entertainment => "text-purple-400",
            Category::Shopping => "text-pink-400",
            Category::Utilities => "text-yellow-400",
            Category::Health => "text-red-400",
            Category::Other => "text-gray-400",
            Category::Unknown(_) => DEFAULT_CATEGORY_TEXT_COLOR,
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::KNOWN
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Look up the text colour style token for a raw category key.
///
/// Keys outside the known set get [DEFAULT_CATEGORY_TEXT_COLOR].
pub fn category_text_color(key: &str) -> &'static str {
    key.parse::<Category>()
        .map(|category| category.text_color())
        .unwrap_or(DEFAULT_CATEGORY_TEXT_COLOR)
}

/// Which expenses to show in the expense list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every expense.
    #[default]
    All,
    /// Show only expenses in the given category.
    Only(Category),
}

impl CategoryFilter {
    /// The query parameter value for "show everything".
    pub const ALL_VALUE: &'static str = "all";

    /// Whether an expense in `category` passes the filter.
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Whether the filter hides anything, i.e. it is not [CategoryFilter::All].
    pub fn is_active(&self) -> bool {
        !matches!(self, CategoryFilter::All)
    }

    /// The value used for the `category` query parameter.
    pub fn query_value(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_VALUE,
            CategoryFilter::Only(category) => category.key(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_VALUE {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Query parameters for pages and endpoints that render the expense list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseListQuery {
    /// `all` or a category key. Missing means `all`.
    pub category: Option<String>,
}

impl ExpenseListQuery {
    /// Parse the query into a filter.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if `category` is neither `all` nor a
    /// known category key.
    pub fn filter(&self) -> Result<CategoryFilter, Error> {
        match self.category.as_deref() {
            None | Some("") => Ok(CategoryFilter::All),
            Some(value) => value.parse(),
        }
    }
}

/// A single tracked expense.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// A text description of what the money was spent on.
    pub description: String,
    /// How much was spent, in dollars.
    pub amount: f64,
    /// What kind of expense this is.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
}

/// A validated expense that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    description: String,
    amount: f64,
    category: Category,
    date: Date,
}

impl NewExpense {
    /// Validate the fields of a new expense.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyDescription] if `description` is empty after trimming,
    /// - or [Error::InvalidAmount] if `amount` is not a finite number greater than zero,
    /// - or [Error::InvalidCategory] if `category` is [Category::Unknown].
    pub fn new(
        description: &str,
        amount: f64,
        category: Category,
        date: Date,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        if let Category::Unknown(key) = category {
            return Err(Error::InvalidCategory(key));
        }

        Ok(Self {
            description: description.to_owned(),
            amount,
            category,
            date,
        })
    }

    /// The trimmed description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The category of the expense.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// When the money was spent.
    pub fn date(&self) -> Date {
        self.date
    }
}

/// Form data for expense creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: Date,
}
