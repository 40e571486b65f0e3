use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::KagoError;
use crate::price::{self, PriceSource};

/// A shopping-list item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Unique identifier
    pub id: Uuid,
    /// Who the item belongs to
    pub owner: String,
    /// Display name
    pub name: String,
    /// Product page URL, if any
    pub link: Option<String>,
    /// Stored price; 0 when no price could be determined
    pub price: f64,
    /// High-priority items sort to the top of the list
    pub priority: bool,
    pub created_at: DateTime<Utc>,
}

impl ShoppingListItem {
    pub fn new(owner: String, name: String, link: Option<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name,
            link,
            price,
            priority: false,
            created_at: Utc::now(),
        }
    }
}

/// How the caller supplied a price: the literal `auto` triggers page
/// scraping, anything else must be a plain number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceSpec {
    Auto,
    Fixed(f64),
}

impl FromStr for PriceSpec {
    type Err = KagoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(PriceSpec::Auto);
        }
        trimmed
            .parse::<f64>()
            .map(PriceSpec::Fixed)
            .map_err(|_| KagoError::InvalidPrice(s.to_string()))
    }
}

/// Resolve a price spec to a storable number.
///
/// `Auto` runs the extraction pipeline against the item's link and falls
/// back to `default_price` when there is no link, the lookup fails, or
/// the extracted value is not numeric. Item creation is never blocked by
/// a failed lookup.
pub fn resolve_price(
    spec: PriceSpec,
    link: Option<&str>,
    default_price: f64,
) -> (f64, Option<PriceSource>) {
    match spec {
        PriceSpec::Fixed(value) => (value, None),
        PriceSpec::Auto => {
            let extracted = link.and_then(price::extract_price);
            match extracted {
                Some(found) => match price::parse_amount(&found.raw) {
                    Some(amount) => (amount, Some(found.source)),
                    None => (default_price, None),
                },
                None => (default_price, None),
            }
        }
    }
}
