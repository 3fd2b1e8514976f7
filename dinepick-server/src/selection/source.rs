//! Candidate source for the selector

use std::collections::HashMap;

use shared::models::{OpenTime, Restaurant};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, open_time, restaurant};

/// Read access the selector needs
///
/// Implementations only read; nothing here mutates storage.
#[allow(async_fn_in_trait)]
pub trait RestaurantSource {
    /// All enabled restaurants (with their positions)
    async fn list_enabled_restaurants_with_positions(&self) -> RepoResult<Vec<Restaurant>>;

    /// Open times of the given restaurants, keyed by restaurant id
    async fn list_open_times_for_restaurants(
        &self,
        restaurant_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<OpenTime>>>;
}

/// [`RestaurantSource`] backed by the SQLite repositories
#[derive(Clone, Debug)]
pub struct SqliteRestaurantSource {
    pool: SqlitePool,
}

impl SqliteRestaurantSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RestaurantSource for SqliteRestaurantSource {
    async fn list_enabled_restaurants_with_positions(&self) -> RepoResult<Vec<Restaurant>> {
        restaurant::list_enabled(&self.pool).await
    }

    async fn list_open_times_for_restaurants(
        &self,
        restaurant_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<OpenTime>>> {
        open_time::find_by_restaurant_ids(&self.pool, restaurant_ids).await
    }
}
