//! Grocery price comparison between Coles and Woolworths.
//!
//! Item requests such as "garlic 100g" are parsed into a search term and a
//! weight, searched at both supermarkets, scaled to the requested weight where
//! the product is sold per kilogram, and totalled.

pub mod client;
pub mod coles;
pub mod compare;
pub mod item;
pub mod models;
pub mod normalize;
pub mod woolworths;

pub use client::GrocerySearch;
pub use coles::ColesClient;
pub use compare::compare_grocery_prices;
pub use models::{
    ComparisonResult, ComparisonRow, ComparisonSummary, NormalizedQuote, ParsedItem, ProductQuote,
    Retailer, WeightUnit,
};
pub use woolworths::WoolworthsClient;
