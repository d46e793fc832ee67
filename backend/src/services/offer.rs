//! Offer publication and discovery service
//!
//! The discounted price is stamped once here, at creation; nothing ever
//! recomputes it afterwards.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::business::{BusinessRow, BUSINESS_COLUMNS};
use shared::geo;
use shared::models::{Business, Category, CreateOfferInput, Offer, OfferWithBusiness};
use shared::pricing;
use shared::types::GeoPoint;
use shared::validation::{validate_radius, validate_validity_window};

/// Offer service
#[derive(Clone)]
pub struct OfferService {
    db: PgPool,
}

const OFFER_COLUMNS: &str = "id, business_id, title, description, discount_type, \
     discount_value, original_price, discounted_price, image_base64, valid_from, \
     valid_until, max_uses, current_uses, is_active, terms_conditions, created_at";

/// Input for a nearby query (businesses or offers)
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius_meters: f64,
    pub categories: Option<Vec<Category>>,
}

fn default_radius() -> f64 {
    1000.0
}

impl NearbyQuery {
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn category_set(&self) -> Option<HashSet<Category>> {
        self.categories
            .as_ref()
            .map(|cs| cs.iter().copied().collect())
    }

    pub fn validate(&self) -> AppResult<()> {
        self.origin().validate().map_err(|msg| AppError::Validation {
            field: "location".to_string(),
            message: msg.to_string(),
        })?;
        validate_radius(self.radius_meters).map_err(|msg| AppError::Validation {
            field: "radius_meters".to_string(),
            message: msg.to_string(),
        })?;
        Ok(())
    }
}

/// Response for a nearby-offers query
#[derive(Debug, Serialize)]
pub struct NearbyOffersResponse {
    pub total_found: usize,
    pub radius_meters: f64,
    pub offers: Vec<OfferWithBusiness>,
}

impl OfferService {
    /// Create a new OfferService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Publish an offer for a business owned by `owner_id`
    ///
    /// Returns the offer together with its business so the caller can kick
    /// off the alert fan-out. The ownership check is folded into the lookup;
    /// a business owned by someone else reads as not found.
    pub async fn create_offer(
        &self,
        owner_id: Uuid,
        business_id: Uuid,
        input: CreateOfferInput,
    ) -> AppResult<(Offer, Business)> {
        let business = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE id = $1 AND owner_id = $2 AND is_active = true",
            BUSINESS_COLUMNS
        ))
        .bind(business_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        let valid_until = DateTime::parse_from_rfc3339(&input.valid_until)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::Validation {
                field: "valid_until".to_string(),
                message: "Invalid date format for valid_until".to_string(),
            })?;
        validate_validity_window(valid_until, Utc::now()).map_err(|msg| AppError::Validation {
            field: "valid_until".to_string(),
            message: msg.to_string(),
        })?;

        pricing::validate_discount(input.discount_type, input.discount_value).map_err(|msg| {
            AppError::Validation {
                field: "discount_value".to_string(),
                message: msg.to_string(),
            }
        })?;

        // Stamped once; immutable thereafter
        let discounted_price = pricing::discounted_price(
            input.original_price,
            input.discount_type,
            input.discount_value,
        );

        let offer = sqlx::query_as::<_, Offer>(&format!(
            r#"
            INSERT INTO offers (business_id, title, description, discount_type,
                                discount_value, original_price, discounted_price,
                                image_base64, valid_until, max_uses, terms_conditions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            OFFER_COLUMNS
        ))
        .bind(business_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.discount_type)
        .bind(input.discount_value)
        .bind(input.original_price)
        .bind(discounted_price)
        .bind(&input.image_base64)
        .bind(valid_until)
        .bind(input.max_uses)
        .bind(&input.terms_conditions)
        .fetch_one(&self.db)
        .await?;

        Ok((offer, Business::from(business)))
    }

    /// Active, unexpired offers of one business
    pub async fn business_offers(&self, business_id: Uuid) -> AppResult<Vec<Offer>> {
        let offers = sqlx::query_as::<_, Offer>(&format!(
            r#"
            SELECT {} FROM offers
            WHERE business_id = $1 AND is_active = true AND valid_until > NOW()
            ORDER BY created_at DESC
            "#,
            OFFER_COLUMNS
        ))
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(offers)
    }

    /// Active offers across all businesses owned by a user, with business info
    pub async fn my_offers(&self, owner_id: Uuid) -> AppResult<Vec<(Offer, Business)>> {
        let businesses = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE owner_id = $1",
            BUSINESS_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        if businesses.is_empty() {
            return Ok(Vec::new());
        }

        let business_map: HashMap<Uuid, Business> = businesses
            .into_iter()
            .map(Business::from)
            .map(|b| (b.id, b))
            .collect();
        let business_ids: Vec<Uuid> = business_map.keys().copied().collect();

        let offers = sqlx::query_as::<_, Offer>(&format!(
            r#"
            SELECT {} FROM offers
            WHERE business_id = ANY($1) AND is_active = true
            ORDER BY created_at DESC
            "#,
            OFFER_COLUMNS
        ))
        .bind(&business_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(offers
            .into_iter()
            .filter_map(|o| {
                let business = business_map.get(&o.business_id)?.clone();
                Some((o, business))
            })
            .collect())
    }

    /// Deactivate an offer; ownership is checked through the owning business
    pub async fn deactivate_offer(&self, owner_id: Uuid, offer_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE offers SET is_active = false
            WHERE id = $1
              AND business_id IN (SELECT id FROM businesses WHERE owner_id = $2)
            "#,
        )
        .bind(offer_id)
        .bind(owner_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Offer".to_string()));
        }

        Ok(())
    }

    /// Offers from businesses near a query point, sorted by distance
    pub async fn nearby_offers(&self, query: NearbyQuery) -> AppResult<NearbyOffersResponse> {
        query.validate()?;

        let rows = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE is_active = true",
            BUSINESS_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;
        let businesses: Vec<Business> = rows.into_iter().map(Business::from).collect();

        let category_set = query.category_set();
        let ranked = geo::find_nearby(
            query.origin(),
            query.radius_meters,
            category_set.as_ref(),
            &businesses,
        );

        let mut nearby: HashMap<Uuid, (Business, f64)> = HashMap::new();
        let mut business_ids = Vec::with_capacity(ranked.len());
        for (business, distance) in ranked {
            business_ids.push(business.id);
            nearby.insert(business.id, (business.clone(), distance));
        }

        if business_ids.is_empty() {
            return Ok(NearbyOffersResponse {
                total_found: 0,
                radius_meters: query.radius_meters,
                offers: Vec::new(),
            });
        }

        let offers = sqlx::query_as::<_, Offer>(&format!(
            r#"
            SELECT {} FROM offers
            WHERE business_id = ANY($1) AND is_active = true AND valid_until > NOW()
            "#,
            OFFER_COLUMNS
        ))
        .bind(&business_ids)
        .fetch_all(&self.db)
        .await?;

        let mut annotated: Vec<OfferWithBusiness> = offers
            .into_iter()
            .filter_map(|offer| {
                let (business, distance) = nearby.get(&offer.business_id)?.clone();
                Some(OfferWithBusiness {
                    offer,
                    business_info: business,
                    distance_meters: distance,
                })
            })
            .collect();

        annotated.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

        Ok(NearbyOffersResponse {
            total_found: annotated.len(),
            radius_meters: query.radius_meters,
            offers: annotated,
        })
    }
}
