//! Filter and sort the place list for display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::place::{Category, Place, PriceRange};

/// Max average price selected when the explorer starts.
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// Upper end of the price slider; "reset filters" jumps here.
pub const MAX_PRICE_CEILING: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Nearest,
    Price,
    Rating,
}

/// Active filter and sort chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub category: CategoryFilter,
    /// Inclusive ceiling on the average price. At [`MAX_PRICE_CEILING`] or
    /// above, places with unparseable prices are kept too.
    pub max_price: f64,
    pub sort: SortKey,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            max_price: DEFAULT_MAX_PRICE,
            sort: SortKey::Nearest,
        }
    }
}

impl Criteria {
    /// Everything, nearest first.
    pub fn unfiltered() -> Self {
        Self {
            category: CategoryFilter::All,
            max_price: f64::INFINITY,
            sort: SortKey::Nearest,
        }
    }
}

/// Mean of the two price bounds, `None` when the range does not parse.
pub fn average_price(range: &PriceRange) -> Option<f64> {
    range.average()
}

/// Apply `criteria` to `places`. Output is a subset of the input; ties keep
/// input order.
pub fn select_places(places: &[Place], criteria: &Criteria) -> Vec<Place> {
    let mut selected: Vec<Place> = places
        .iter()
        .filter(|place| criteria.category.matches(place.category))
        .filter(|place| within_price(place, criteria.max_price))
        .cloned()
        .collect();

    sort_places(&mut selected, criteria.sort);
    selected
}

/// Stable in-place sort by `key`.
pub fn sort_places(places: &mut [Place], key: SortKey) {
    match key {
        SortKey::Nearest => places.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km)),
        SortKey::Price => places.sort_by(|a, b| {
            compare_missing_last(a.price_range.lower(), b.price_range.lower())
        }),
        SortKey::Rating => places.sort_by(|a, b| b.rating.value().total_cmp(&a.rating.value())),
    }
}

fn within_price(place: &Place, max_price: f64) -> bool {
    match place.price_range.bounds() {
        Ok(bounds) => bounds.average() <= max_price,
        Err(err) => {
            let open = max_price >= MAX_PRICE_CEILING;
            debug!(id = %place.id, error = %err, passes = open, "unparseable price range");
            open
        }
    }
}

fn compare_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
