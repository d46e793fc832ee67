//! Great-circle distance and proximity ranking
//!
//! Both operations are pure and safe to call concurrently; coordinate range
//! validation is the caller's responsibility (`GeoPoint::validate`).

use std::collections::HashSet;

use crate::models::Category;
use crate::types::GeoPoint;

/// Mean Earth radius in meters (spherical model)
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters (haversine)
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Something that can be ranked by proximity
pub trait Locatable {
    fn location(&self) -> Option<GeoPoint>;
    fn category(&self) -> Category;
    fn is_active(&self) -> bool;
}

impl Locatable for crate::models::Business {
    fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    fn category(&self) -> Category {
        self.category
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Select and rank candidates by ascending distance from `origin`
///
/// A candidate is included iff it is active, has a stored coordinate,
/// matches one of `categories` (no restriction when `None`), and lies within
/// `radius_meters`. Candidates without a coordinate are skipped, not errored.
/// Ties are broken by input order, keeping results deterministic.
pub fn find_nearby<'a, T: Locatable>(
    origin: GeoPoint,
    radius_meters: f64,
    categories: Option<&HashSet<Category>>,
    candidates: &'a [T],
) -> Vec<(&'a T, f64)> {
    let mut matches: Vec<(&T, f64)> = candidates
        .iter()
        .filter(|c| c.is_active())
        .filter(|c| categories.map_or(true, |set| set.contains(&c.category())))
        .filter_map(|c| {
            let location = c.location()?;
            let distance = distance_meters(origin, location);
            (distance <= radius_meters).then_some((c, distance))
        })
        .collect();

    // sort_by is stable, so equal distances keep candidate order
    matches.sort_by(|a, b| a.1.total_cmp(&b.1));
    matches
}
