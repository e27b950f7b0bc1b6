//! Filter/sort pipeline properties.
//!
//! Subset, ordering, inclusive price ceiling, and stable tie-breaking.

mod fixtures;

use nearo::haversine::distance_km;
use nearo::synthetic::SyntheticPlaceSource;
use nearo::traits::PlaceSource;
use nearo::{Category, CategoryFilter, Criteria, Place, SortKey, select_places};

use fixtures::{CENTER, INDIRANAGAR, ids, place};

// ============================================================================
// Test Fixtures
// ============================================================================

fn mixed_places() -> Vec<Place> {
    vec![
        place(1, Category::Cafe, "₹120 - ₹300", 4.5, 2.4),
        place(2, Category::Food, "₹300 - ₹900", 3.0, 0.8),
        place(3, Category::Cafe, "₹100 - ₹500", 4.9, 1.1),
        place(4, Category::Gym, "₹450 - ₹999", 4.5, 0.8),
        place(5, Category::Stays, "on request", 3.8, 0.2),
        place(6, Category::Food, "₹150 - ₹250", 4.1, 3.5),
    ]
}

fn criteria(category: CategoryFilter, max_price: f64, sort: SortKey) -> Criteria {
    Criteria {
        category,
        max_price,
        sort,
    }
}

fn is_subset(output: &[Place], input: &[Place]) -> bool {
    output.iter().all(|p| input.contains(p))
}

// ============================================================================
// Distance Utility
// ============================================================================

#[test]
fn distance_is_zero_to_self_and_symmetric() {
    let points = [CENTER, INDIRANAGAR, nearo::Coordinate::new_unchecked(-33.86, 151.21)];
    for a in points {
        assert_eq!(distance_km(a, a), 0.0);
        for b in points {
            assert_eq!(distance_km(a, b), distance_km(b, a));
        }
    }
}

// ============================================================================
// Filter Stage
// ============================================================================

#[test]
fn unfiltered_nearest_returns_everything_by_distance() {
    let input = mixed_places();
    let output = select_places(&input, &Criteria::unfiltered());

    assert_eq!(output.len(), input.len());
    assert!(is_subset(&output, &input));
    // 2 and 4 tie at 0.8 km and keep input order
    assert_eq!(ids(&output), vec![5, 2, 4, 3, 1, 6]);
}

#[test]
fn price_ceiling_boundary_is_inclusive() {
    let input = vec![place(1, Category::Food, "100 - 500", 4.0, 1.0)];

    let at_250 = criteria(CategoryFilter::All, 250.0, SortKey::Nearest);
    assert!(select_places(&input, &at_250).is_empty());

    let at_300 = criteria(CategoryFilter::All, 300.0, SortKey::Nearest);
    assert_eq!(ids(&select_places(&input, &at_300)), vec![1]);
}

#[test]
fn category_and_price_combine() {
    let input = mixed_places();
    let cafes_under_300 = criteria(CategoryFilter::Only(Category::Cafe), 300.0, SortKey::Nearest);
    // place 1 averages 210, place 3 averages 300
    assert_eq!(ids(&select_places(&input, &cafes_under_300)), vec![3, 1]);

    let cafes_under_250 = criteria(CategoryFilter::Only(Category::Cafe), 250.0, SortKey::Nearest);
    assert_eq!(ids(&select_places(&input, &cafes_under_250)), vec![1]);
}

#[test]
fn malformed_price_does_not_abort_filter() {
    let input = mixed_places();
    let output = select_places(&input, &criteria(CategoryFilter::All, 1500.0, SortKey::Nearest));
    assert!(!ids(&output).contains(&5));
    assert_eq!(output.len(), input.len() - 1);

    // the slider maximum means "no ceiling"
    let output = select_places(&input, &criteria(CategoryFilter::All, 2000.0, SortKey::Nearest));
    assert_eq!(output.len(), input.len());
}

#[test]
fn category_with_no_matches_is_empty() {
    let output = select_places(
        &mixed_places(),
        &criteria(CategoryFilter::Only(Category::Bookstore), f64::INFINITY, SortKey::Nearest),
    );
    assert!(output.is_empty());
}

// ============================================================================
// Sort Stage
// ============================================================================

#[test]
fn price_sort_ascending_by_lower_bound() {
    let output = select_places(
        &mixed_places(),
        &criteria(CategoryFilter::All, f64::INFINITY, SortKey::Price),
    );
    // malformed price sorts last
    assert_eq!(ids(&output), vec![3, 1, 6, 2, 4, 5]);
}

#[test]
fn rating_sort_descending_keeps_tie_order() {
    let input = vec![
        place(1, Category::Food, "1 - 2", 4.5, 1.0),
        place(2, Category::Food, "1 - 2", 3.0, 1.0),
        place(3, Category::Food, "1 - 2", 4.9, 1.0),
        place(4, Category::Food, "1 - 2", 4.5, 1.0),
    ];
    let output = select_places(&input, &criteria(CategoryFilter::All, f64::INFINITY, SortKey::Rating));
    assert_eq!(ids(&output), vec![3, 1, 4, 2]);
}

#[test]
fn synthetic_batch_properties() {
    let input = SyntheticPlaceSource::seeded(2024)
        .with_count(60)
        .fetch_nearby(CENTER, 2000)
        .unwrap();

    for sort in [SortKey::Nearest, SortKey::Price, SortKey::Rating] {
        let output = select_places(&input, &criteria(CategoryFilter::All, 300.0, sort));
        assert!(is_subset(&output, &input));
        for place in &output {
            assert!(place.price_range.average().unwrap() <= 300.0);
        }
        for pair in output.windows(2) {
            match sort {
                SortKey::Nearest => assert!(pair[0].distance_km <= pair[1].distance_km),
                SortKey::Price => {
                    assert!(pair[0].price_range.lower().unwrap() <= pair[1].price_range.lower().unwrap())
                }
                SortKey::Rating => assert!(pair[0].rating.value() >= pair[1].rating.value()),
            }
        }
    }
}
