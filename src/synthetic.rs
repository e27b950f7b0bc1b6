//! Offline place source that scatters made-up places around a center.
//!
//! Used for demos without network access and for tests that need a
//! realistic-looking batch.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ExploreError;
use crate::estimate::{EstimateRanges, RandomEstimator};
use crate::haversine::distance_km;
use crate::place::{Category, Coordinate, Place, PlaceId, Tags};
use crate::traits::{PlaceEstimator, PlaceSource};

/// Places generated per fetch unless configured otherwise.
pub const DEFAULT_COUNT: usize = 24;

/// Max offset in degrees on each axis (roughly 2 km at the equator).
const SPREAD_DEGREES: f64 = 0.02;

fn names_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Food => &["Annapurna Tiffin", "Spicy Bites", "Curry Corner", "Mama's Kitchen", "Roti Ghar"],
        Category::Cafe => &["Brew & Bean", "Corner Cafe", "Chai Point", "Lazy Mocha", "Coffee House"],
        Category::Bakery => &["Sweet Crumbs", "Daily Fresh", "Cake Walk", "Bread Basket"],
        Category::Services => &["Quick Fix", "Laundry Express", "Shoe Shine", "Key Makers"],
        Category::Beauty => &["Glamour Zone", "Style Cuts", "Glow Salon", "Nail Studio"],
        Category::Gym => &["Fit Life", "Muscle Gym", "Yoga Space", "Active Arena"],
        Category::Shopping => &["Budget Mart", "Fashion Street", "Local Trends", "Daily Needs"],
        Category::Bookstore => &["Reads & Pages", "Old Book Shop", "Knowledge Corner"],
        Category::Stays => &["Green Dorm", "City Inn", "Backpacker Hostel", "Budget Stay"],
        Category::Essentials => &["General Store", "Milk Depot", "Veggie Market"],
        Category::Pharmacy => &["Health Plus", "City Meds", "Wellness Chemist"],
        Category::Other => &["Place"],
    }
}

/// Generates positions, names and categories itself; price and rating come
/// from the estimator.
#[derive(Debug)]
pub struct SyntheticPlaceSource<E = RandomEstimator> {
    count: usize,
    rng: Mutex<StdRng>,
    estimator: E,
}

impl Default for SyntheticPlaceSource<RandomEstimator> {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
            estimator: RandomEstimator::default().with_ranges(EstimateRanges::synthetic()),
        }
    }
}

impl SyntheticPlaceSource<RandomEstimator> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            count: DEFAULT_COUNT,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            estimator: RandomEstimator::seeded(seed).with_ranges(EstimateRanges::synthetic()),
        }
    }
}

impl<E: PlaceEstimator> SyntheticPlaceSource<E> {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Swap the price/rating estimator, keeping count and position rng.
    pub fn with_estimator<F: PlaceEstimator>(self, estimator: F) -> SyntheticPlaceSource<F> {
        SyntheticPlaceSource {
            count: self.count,
            rng: self.rng,
            estimator,
        }
    }

    fn generate(&self, center: Coordinate, rng: &mut StdRng, index: usize) -> Place {
        let lat = center.lat + rng.random_range(-SPREAD_DEGREES..SPREAD_DEGREES);
        let lng = center.lng + rng.random_range(-SPREAD_DEGREES..SPREAD_DEGREES);
        let category = Category::ALL[rng.random_range(0..Category::ALL.len())];
        let names = names_for(category);
        let name = names[rng.random_range(0..names.len())];
        let suffix = rng.random_range(1..=10);

        let mut tags = Tags::new();
        tags.insert("name".to_string(), format!("{name} {suffix}"));
        let estimate = self.estimator.estimate(&tags);

        Place {
            id: PlaceId(index as i64),
            name: format!("{name} {suffix}"),
            category,
            lat,
            lng,
            price_range: estimate.price_range,
            rating: estimate.rating,
            distance_km: distance_km(center, Coordinate::new_unchecked(lat, lng)),
            tags,
        }
    }
}

impl<E: PlaceEstimator> PlaceSource for SyntheticPlaceSource<E> {
    /// `radius_meters` is ignored; places always land within the fixed spread.
    fn fetch_nearby(&self, center: Coordinate, _radius_meters: u32) -> Result<Vec<Place>, ExploreError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok((0..self.count)
            .map(|index| self.generate(center, &mut rng, index))
            .collect())
    }
}
