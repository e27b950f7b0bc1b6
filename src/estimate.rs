//! Placeholder price and rating estimators.
//!
//! OpenStreetMap has no reliable price or rating data. [`RandomEstimator`]
//! fills both with random values from fixed ranges; consumers must treat them
//! as illustrative only.

use std::ops::Range;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::place::{PriceRange, Rating, Tags};
use crate::traits::{PlaceEstimate, PlaceEstimator};

pub const DEFAULT_CURRENCY: &str = "₹";

/// Random ranges used by [`RandomEstimator`].
#[derive(Debug, Clone)]
pub struct EstimateRanges {
    pub low: Range<u32>,
    pub high: Range<u32>,
    pub rating: Range<f64>,
}

impl Default for EstimateRanges {
    fn default() -> Self {
        Self {
            low: 100..500,
            high: 500..1000,
            rating: 3.5..5.0,
        }
    }
}

impl EstimateRanges {
    /// Cheaper spread used by the offline synthetic source.
    pub fn synthetic() -> Self {
        Self {
            low: 50..150,
            high: 200..500,
            rating: Rating::MIN..Rating::MAX,
        }
    }

    /// Every range must be non-empty to be sampled.
    pub fn is_valid(&self) -> bool {
        !self.low.is_empty()
            && !self.high.is_empty()
            && self.rating.start.is_finite()
            && self.rating.end.is_finite()
            && self.rating.start < self.rating.end
    }
}

/// Draws price and rating uniformly from [`EstimateRanges`].
#[derive(Debug)]
pub struct RandomEstimator {
    currency: String,
    ranges: EstimateRanges,
    rng: Mutex<StdRng>,
}

impl Default for RandomEstimator {
    fn default() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }
}

impl RandomEstimator {
    /// Deterministic estimator for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            ranges: EstimateRanges::default(),
            rng: Mutex::new(rng),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Replace the sampling ranges. Empty ranges are rejected with a warning
    /// and the current ranges are kept.
    pub fn with_ranges(mut self, ranges: EstimateRanges) -> Self {
        if ranges.is_valid() {
            self.ranges = ranges;
        } else {
            warn!(?ranges, "ignoring empty estimate ranges");
        }
        self
    }

    pub fn ranges(&self) -> &EstimateRanges {
        &self.ranges
    }
}

impl PlaceEstimator for RandomEstimator {
    fn estimate(&self, _tags: &Tags) -> PlaceEstimate {
        // Poisoning leaves the rng usable.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let low = rng.random_range(self.ranges.low.clone());
        let high = rng.random_range(self.ranges.high.clone());
        let rating = rng.random_range(self.ranges.rating.clone());

        PlaceEstimate {
            price_range: PriceRange::from_bounds(&self.currency, low, high),
            rating: Rating::new(rating),
        }
    }
}

/// Returns the same estimate for every record.
#[derive(Debug, Clone)]
pub struct FixedEstimator {
    estimate: PlaceEstimate,
}

impl FixedEstimator {
    pub fn new(price_range: PriceRange, rating: Rating) -> Self {
        Self {
            estimate: PlaceEstimate { price_range, rating },
        }
    }
}

impl PlaceEstimator for FixedEstimator {
    fn estimate(&self, _tags: &Tags) -> PlaceEstimate {
        self.estimate.clone()
    }
}
