//! Proximity discovery tests
//!
//! Tests for distance computation and radius filtering including:
//! - Haversine distance properties
//! - Radius boundary inclusion
//! - Distance-ranked ordering with stable ties

use std::collections::HashSet;

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use shared::geo::{distance_meters, find_nearby};
use shared::models::{Business, Category};
use shared::types::GeoPoint;

/// MG Road, Bangalore
const ORIGIN: GeoPoint = GeoPoint {
    latitude: 12.9716,
    longitude: 77.5946,
};

fn business_at(name: &str, category: Category, location: Option<GeoPoint>) -> Business {
    Business {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        business_name: name.to_string(),
        description: None,
        category,
        phone_number: "+911234567890".to_string(),
        email: None,
        address: "Bangalore".to_string(),
        location,
        is_active: true,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Distance from a point to itself is zero
    #[test]
    fn test_zero_distance() {
        assert_eq!(distance_meters(ORIGIN, ORIGIN), 0.0);
    }

    /// A point roughly 1 degree of latitude away is ~111 km out
    #[test]
    fn test_one_degree_latitude() {
        let north = GeoPoint::new(ORIGIN.latitude + 1.0, ORIGIN.longitude);
        let d = distance_meters(ORIGIN, north);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }

    /// Businesses inside the radius are returned, outside are not
    #[test]
    fn test_radius_filtering() {
        // ~0.9 km and ~5.6 km north of the origin
        let near = business_at(
            "Near Cafe",
            Category::Food,
            Some(GeoPoint::new(12.9797, 77.5946)),
        );
        let far = business_at(
            "Far Cafe",
            Category::Food,
            Some(GeoPoint::new(13.0216, 77.5946)),
        );
        let candidates = vec![near, far];

        let results = find_nearby(ORIGIN, 1000.0, None, &candidates);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.business_name, "Near Cafe");
    }

    /// A business exactly on the boundary is included
    #[test]
    fn test_boundary_is_inclusive() {
        let spot = GeoPoint::new(12.9797, 77.5946);
        let exact = distance_meters(ORIGIN, spot);
        let business = business_at("Edge", Category::Food, Some(spot));
        let candidates = vec![business];

        let results = find_nearby(ORIGIN, exact, None, &candidates);
        assert_eq!(results.len(), 1);
    }

    /// Results come back closest first
    #[test]
    fn test_sorted_by_distance() {
        let candidates = vec![
            business_at("C", Category::Food, Some(GeoPoint::new(12.9896, 77.5946))),
            business_at("A", Category::Food, Some(GeoPoint::new(12.9726, 77.5946))),
            business_at("B", Category::Food, Some(GeoPoint::new(12.9806, 77.5946))),
        ];

        let results = find_nearby(ORIGIN, 10_000.0, None, &candidates);
        let names: Vec<&str> = results
            .iter()
            .map(|(b, _)| b.business_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(results[0].1 <= results[1].1 && results[1].1 <= results[2].1);
    }

    /// Equidistant businesses keep their input order
    #[test]
    fn test_ties_keep_input_order() {
        let spot = GeoPoint::new(12.9796, 77.5946);
        let first = business_at("First", Category::Food, Some(spot));
        let second = business_at("Second", Category::Food, Some(spot));
        let candidates = vec![first, second];

        let results = find_nearby(ORIGIN, 2000.0, None, &candidates);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.business_name, "First");
        assert_eq!(results[1].0.business_name, "Second");
    }

    /// Category filter keeps only requested categories
    #[test]
    fn test_category_filter() {
        let spot = GeoPoint::new(12.9726, 77.5946);
        let candidates = vec![
            business_at("Cafe", Category::Food, Some(spot)),
            business_at("Boutique", Category::Clothing, Some(spot)),
            business_at("Salon", Category::Spa, Some(spot)),
        ];

        let wanted: HashSet<Category> = [Category::Food, Category::Spa].into_iter().collect();
        let results = find_nearby(ORIGIN, 5000.0, Some(&wanted), &candidates);
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|(b, _)| wanted.contains(&b.category)));
    }

    /// No category filter means every category qualifies
    #[test]
    fn test_no_filter_includes_all_categories() {
        let spot = GeoPoint::new(12.9726, 77.5946);
        let candidates = vec![
            business_at("Cafe", Category::Food, Some(spot)),
            business_at("Boutique", Category::Clothing, Some(spot)),
        ];

        let results = find_nearby(ORIGIN, 5000.0, None, &candidates);
        assert_eq!(results.len(), 2);
    }

    /// Inactive businesses never appear
    #[test]
    fn test_inactive_excluded() {
        let spot = GeoPoint::new(12.9726, 77.5946);
        let mut business = business_at("Closed", Category::Food, Some(spot));
        business.is_active = false;
        let candidates = vec![business];

        let results = find_nearby(ORIGIN, 5000.0, None, &candidates);
        assert!(results.is_empty());
    }

    /// Businesses without a location never appear
    #[test]
    fn test_unlocated_excluded() {
        let candidates = vec![business_at("Nowhere", Category::Food, None)];

        let results = find_nearby(ORIGIN, 5000.0, None, &candidates);
        assert!(results.is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Distance is symmetric
    #[test]
    fn prop_distance_symmetric(
        lat1 in -80.0_f64..80.0,
        lon1 in -179.0_f64..179.0,
        lat2 in -80.0_f64..80.0,
        lon2 in -179.0_f64..179.0,
    ) {
        let a = GeoPoint::new(lat1, lon1);
        let b = GeoPoint::new(lat2, lon2);
        let ab = distance_meters(a, b);
        let ba = distance_meters(b, a);
        prop_assert!((ab - ba).abs() < 1e-6);
    }

    /// Distance is never negative
    #[test]
    fn prop_distance_nonnegative(
        lat1 in -90.0_f64..=90.0,
        lon1 in -180.0_f64..=180.0,
        lat2 in -90.0_f64..=90.0,
        lon2 in -180.0_f64..=180.0,
    ) {
        let d = distance_meters(GeoPoint::new(lat1, lon1), GeoPoint::new(lat2, lon2));
        prop_assert!(d >= 0.0);
    }

    /// Every result lies within the requested radius
    #[test]
    fn prop_results_within_radius(
        offsets in prop::collection::vec((-0.1_f64..0.1, -0.1_f64..0.1), 0..20),
        radius in 100.0_f64..20_000.0,
    ) {
        let candidates: Vec<Business> = offsets
            .iter()
            .map(|(dlat, dlon)| {
                business_at(
                    "B",
                    Category::Food,
                    Some(GeoPoint::new(ORIGIN.latitude + dlat, ORIGIN.longitude + dlon)),
                )
            })
            .collect();

        let results = find_nearby(ORIGIN, radius, None, &candidates);
        for (_, d) in results {
            prop_assert!(d <= radius);
        }
    }
}
