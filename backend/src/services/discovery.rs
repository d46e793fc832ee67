//! Nearby-business discovery

use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::business::{BusinessRow, BUSINESS_COLUMNS};
use crate::services::offer::NearbyQuery;
use shared::geo;
use shared::models::{Business, BusinessWithDistance};

/// Discovery service
#[derive(Clone)]
pub struct DiscoveryService {
    db: PgPool,
}

/// Response for a nearby-businesses query
#[derive(Debug, Serialize)]
pub struct NearbyBusinessesResponse {
    pub total_found: usize,
    pub radius_meters: f64,
    pub businesses: Vec<BusinessWithDistance>,
}

impl DiscoveryService {
    /// Create a new DiscoveryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Active businesses within the query radius, closest first
    pub async fn discover_nearby(&self, query: NearbyQuery) -> AppResult<NearbyBusinessesResponse> {
        query.validate()?;

        let rows = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE is_active = true",
            BUSINESS_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;
        let candidates: Vec<Business> = rows.into_iter().map(Business::from).collect();

        let category_set = query.category_set();
        let businesses: Vec<BusinessWithDistance> = geo::find_nearby(
            query.origin(),
            query.radius_meters,
            category_set.as_ref(),
            &candidates,
        )
        .into_iter()
        .map(|(business, distance)| BusinessWithDistance {
            business: business.clone(),
            distance_meters: distance,
        })
        .collect();

        Ok(NearbyBusinessesResponse {
            total_found: businesses.len(),
            radius_meters: query.radius_meters,
            businesses,
        })
    }
}
