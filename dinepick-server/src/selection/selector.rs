//! Random restaurant selector
//!
//! One call = one read of the candidates, a geo filter, an optional
//! open-time filter, then a uniform sample without replacement.

use chrono::NaiveTime;
use rand::Rng;
use rand::seq::SliceRandom;
use shared::models::Restaurant;
use thiserror::Error;

use super::geo::GeoPoint;
use super::source::RestaurantSource;
use crate::db::repository::RepoError;
use crate::utils::AppError;

/// Selection errors
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Restaurant source failed: {0}")]
    Source(#[from] RepoError),
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::InvalidArgument(msg) => AppError::invalid_argument(msg),
            SelectionError::Source(e) => e.into(),
        }
    }
}

/// Picks random restaurants from a [`RestaurantSource`]
///
/// Stateless apart from the source; the random generator is passed per call.
///
/// ```ignore
/// let selector = RestaurantSelector::new(SqliteRestaurantSource::new(pool));
/// let picks = selector
///     .select_random(GeoPoint::new(23.0, 120.0), 5.0, 3, &mut rng)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestaurantSelector<S> {
    source: S,
}

impl<S: RestaurantSource> RestaurantSelector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Up to `limit` enabled restaurants within `radius_km` of `center`
    ///
    /// Returned restaurants carry no open times. No match yields an empty
    /// vector.
    pub async fn select_random<R: Rng + ?Sized>(
        &self,
        center: GeoPoint,
        radius_km: f64,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<Restaurant>, SelectionError> {
        validate_args(center, radius_km, limit)?;

        let candidates = self.within_radius(center, radius_km).await?;
        let picked = sample(candidates, limit, rng);

        tracing::debug!(
            lat = center.lat,
            lng = center.lng,
            radius_km,
            limit,
            picked = picked.len(),
            "Random restaurant selection"
        );
        Ok(picked)
    }

    /// Like [`select_random`](Self::select_random), restricted to restaurants
    /// open on `day_of_week` at `time_of_day`
    ///
    /// A restaurant qualifies when one of its records has the same
    /// `day_of_week` and `open_time <= time_of_day <= close_time`. Each
    /// returned restaurant carries only its matching records.
    pub async fn select_random_with_open_time<R: Rng + ?Sized>(
        &self,
        center: GeoPoint,
        radius_km: f64,
        day_of_week: i32,
        time_of_day: NaiveTime,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<Restaurant>, SelectionError> {
        validate_args(center, radius_km, limit)?;

        let candidates = self.within_radius(center, radius_km).await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = candidates.iter().map(|r| r.id).collect();
        let mut open_times = self.source.list_open_times_for_restaurants(&ids).await?;

        let open: Vec<Restaurant> = candidates
            .into_iter()
            .filter_map(|mut restaurant| {
                let matching: Vec<_> = open_times
                    .remove(&restaurant.id)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|ot| ot.covers(day_of_week, time_of_day))
                    .collect();
                if matching.is_empty() {
                    return None;
                }
                restaurant.open_times = matching;
                Some(restaurant)
            })
            .collect();

        let picked = sample(open, limit, rng);

        tracing::debug!(
            lat = center.lat,
            lng = center.lng,
            radius_km,
            day_of_week,
            time = %time_of_day,
            limit,
            picked = picked.len(),
            "Random restaurant selection with open time"
        );
        Ok(picked)
    }

    async fn within_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<Restaurant>, SelectionError> {
        let restaurants = self.source.list_enabled_restaurants_with_positions().await?;
        Ok(restaurants
            .into_iter()
            .filter(|r| r.enabled)
            .filter(|r| center.distance_km(&GeoPoint::from(r.position())) <= radius_km)
            .map(|mut r| {
                r.open_times.clear();
                r
            })
            .collect())
    }
}

fn validate_args(center: GeoPoint, radius_km: f64, limit: usize) -> Result<(), SelectionError> {
    if !center.is_finite() {
        return Err(SelectionError::InvalidArgument(
            "center coordinates must be finite".into(),
        ));
    }
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(SelectionError::InvalidArgument(format!(
            "radius must be a positive number of kilometres, got {radius_km}"
        )));
    }
    if limit < 1 {
        return Err(SelectionError::InvalidArgument(
            "limit must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Uniform sample of `min(limit, len)` items without replacement
fn sample<R: Rng + ?Sized>(items: Vec<Restaurant>, limit: usize, rng: &mut R) -> Vec<Restaurant> {
    if items.len() <= limit {
        let mut items = items;
        items.shuffle(rng);
        return items;
    }
    items.choose_multiple(rng, limit).cloned().collect()
}
