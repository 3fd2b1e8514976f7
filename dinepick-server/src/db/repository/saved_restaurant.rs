//! Saved Restaurant Repository (user ↔ restaurant)

use super::{RepoError, RepoResult};
use shared::models::Restaurant;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Restaurants saved by a user, most recently saved first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Restaurant>> {
    let restaurants = sqlx::query_as::<_, Restaurant>(
        "SELECT r.id, r.name, r.address, r.lat, r.lng, r.phone, r.enabled, r.created_at, r.updated_at \
         FROM user_restaurant ur JOIN restaurant r ON r.id = ur.restaurant_id \
         WHERE ur.user_id = ? ORDER BY ur.created_at DESC, r.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(restaurants)
}

/// Save a restaurant for a user. Saving twice is a no-op.
pub async fn save(pool: &SqlitePool, user_id: i64, restaurant_id: i64) -> RepoResult<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM restaurant WHERE id = ?")
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(RepoError::NotFound(format!(
            "Restaurant {restaurant_id} not found"
        )));
    }

    sqlx::query(
        "INSERT INTO user_restaurant (user_id, restaurant_id, created_at) VALUES (?, ?, ?) \
         ON CONFLICT (user_id, restaurant_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(restaurant_id)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

/// Remove a saved restaurant; returns whether an entry existed
pub async fn remove(pool: &SqlitePool, user_id: i64, restaurant_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM user_restaurant WHERE user_id = ? AND restaurant_id = ?")
        .bind(user_id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{restaurant, test_pool, user};
    use shared::models::RestaurantCreate;

    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let u = user::create(pool, "test", "test@test.com", "h").await.unwrap();
        let r = restaurant::create(
            pool,
            RestaurantCreate {
                name: "A".into(),
                address: "addr".into(),
                lat: 23.0,
                lng: 120.0,
                phone: None,
                enabled: None,
            },
        )
        .await
        .unwrap();
        (u.id, r.id)
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let pool = test_pool().await;
        let (uid, rid) = seed(&pool).await;

        save(&pool, uid, rid).await.unwrap();
        save(&pool, uid, rid).await.unwrap();

        let saved = find_by_user(&pool, uid).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, rid);
    }

    #[tokio::test]
    async fn test_save_unknown_restaurant() {
        let pool = test_pool().await;
        let (uid, _) = seed(&pool).await;
        assert!(matches!(
            save(&pool, uid, 999).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let pool = test_pool().await;
        let (uid, rid) = seed(&pool).await;
        save(&pool, uid, rid).await.unwrap();

        assert!(remove(&pool, uid, rid).await.unwrap());
        assert!(!remove(&pool, uid, rid).await.unwrap());
        assert!(find_by_user(&pool, uid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restaurant_delete_cascades() {
        let pool = test_pool().await;
        let (uid, rid) = seed(&pool).await;
        save(&pool, uid, rid).await.unwrap();

        restaurant::delete(&pool, rid).await.unwrap();
        assert!(find_by_user(&pool, uid).await.unwrap().is_empty());
    }
}
