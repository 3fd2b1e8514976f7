//! Open Time Repository

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use shared::models::{OpenTime, OpenTimeCreate, OpenTimeUpdate};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const OPEN_TIME_SELECT: &str = "SELECT id, restaurant_id, day_of_week, open_time, close_time, created_at, updated_at FROM restaurant_open_time";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OpenTime>> {
    let sql = format!("{OPEN_TIME_SELECT} WHERE id = ?");
    let open_time = sqlx::query_as::<_, OpenTime>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(open_time)
}

pub async fn find_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<OpenTime>> {
    let sql = format!("{OPEN_TIME_SELECT} WHERE restaurant_id = ? ORDER BY day_of_week, open_time, id");
    let open_times = sqlx::query_as::<_, OpenTime>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(open_times)
}

/// Open times of many restaurants in one `IN (...)` query, grouped by restaurant id
///
/// Restaurants without records are absent from the map.
pub async fn find_by_restaurant_ids(
    pool: &SqlitePool,
    restaurant_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<OpenTime>>> {
    let mut grouped: HashMap<i64, Vec<OpenTime>> = HashMap::new();
    if restaurant_ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(OPEN_TIME_SELECT);
    qb.push(" WHERE restaurant_id IN (");
    let mut separated = qb.separated(", ");
    for id in restaurant_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY restaurant_id, day_of_week, open_time, id");

    let rows = qb.build_query_as::<OpenTime>().fetch_all(pool).await?;
    for row in rows {
        grouped.entry(row.restaurant_id).or_default().push(row);
    }
    Ok(grouped)
}

/// Insert several open times for one restaurant atomically
pub async fn create_batch(
    pool: &SqlitePool,
    restaurant_id: i64,
    items: Vec<OpenTimeCreate>,
) -> RepoResult<Vec<OpenTime>> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM restaurant WHERE id = ?")
        .bind(restaurant_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(RepoError::NotFound(format!(
            "Restaurant {restaurant_id} not found"
        )));
    }

    let now = now_millis();
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO restaurant_open_time (restaurant_id, day_of_week, open_time, close_time, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(restaurant_id)
        .bind(item.day_of_week)
        .bind(item.open_time)
        .bind(item.close_time)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }
    tx.commit().await?;

    let mut created = Vec::with_capacity(ids.len());
    for id in ids {
        let row = find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create open time".into()))?;
        created.push(row);
    }
    Ok(created)
}

/// Partial update; absent fields keep their value
pub async fn update(pool: &SqlitePool, id: i64, data: OpenTimeUpdate) -> RepoResult<OpenTime> {
    let rows = sqlx::query(
        "UPDATE restaurant_open_time SET day_of_week = COALESCE(?1, day_of_week), open_time = COALESCE(?2, open_time), close_time = COALESCE(?3, close_time), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.day_of_week)
    .bind(data.open_time)
    .bind(data.close_time)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Open time {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Open time {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant_open_time WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Open time {id} not found")));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{restaurant, test_pool};
    use chrono::NaiveTime;
    use shared::models::RestaurantCreate;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(day: i32, open: NaiveTime, close: NaiveTime) -> OpenTimeCreate {
        OpenTimeCreate {
            day_of_week: day,
            open_time: open,
            close_time: close,
        }
    }

    async fn seed_restaurant(pool: &SqlitePool, name: &str) -> i64 {
        restaurant::create(
            pool,
            RestaurantCreate {
                name: name.to_string(),
                address: "addr".to_string(),
                lat: 23.0,
                lng: 120.0,
                phone: None,
                enabled: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_batch_and_list() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;

        let created = create_batch(
            &pool,
            rid,
            vec![slot(2, hm(11, 0), hm(14, 0)), slot(1, hm(8, 0), hm(22, 0))],
        )
        .await
        .unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].open_time, hm(11, 0));

        let listed = find_by_restaurant(&pool, rid).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].day_of_week, 1);
        assert_eq!(listed[0].close_time, hm(22, 0));
    }

    #[tokio::test]
    async fn test_create_batch_unknown_restaurant() {
        let pool = test_pool().await;
        let err = create_batch(&pool, 77, vec![slot(1, hm(8, 0), hm(9, 0))])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_by_restaurant_ids_groups() {
        let pool = test_pool().await;
        let a = seed_restaurant(&pool, "A").await;
        let b = seed_restaurant(&pool, "B").await;
        let c = seed_restaurant(&pool, "C").await;
        create_batch(
            &pool,
            a,
            vec![slot(1, hm(8, 0), hm(12, 0)), slot(1, hm(13, 0), hm(20, 0))],
        )
        .await
        .unwrap();
        create_batch(&pool, b, vec![slot(3, hm(9, 0), hm(17, 0))])
            .await
            .unwrap();

        let grouped = find_by_restaurant_ids(&pool, &[a, b, c]).await.unwrap();
        assert_eq!(grouped[&a].len(), 2);
        assert_eq!(grouped[&b].len(), 1);
        assert!(!grouped.contains_key(&c));

        let only_b = find_by_restaurant_ids(&pool, &[b]).await.unwrap();
        assert_eq!(only_b.len(), 1);

        assert!(find_by_restaurant_ids(&pool, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;
        let created = create_batch(&pool, rid, vec![slot(1, hm(8, 0), hm(22, 0))])
            .await
            .unwrap();
        let id = created[0].id;

        let updated = update(
            &pool,
            id,
            OpenTimeUpdate {
                close_time: Some(hm(23, 30)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.open_time, hm(8, 0));
        assert_eq!(updated.close_time, hm(23, 30));
        assert!(updated.updated_at.is_some());

        assert!(delete(&pool, id).await.unwrap());
        assert!(matches!(delete(&pool, id).await, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_cascade_on_restaurant_delete() {
        let pool = test_pool().await;
        let rid = seed_restaurant(&pool, "A").await;
        create_batch(&pool, rid, vec![slot(1, hm(8, 0), hm(22, 0))])
            .await
            .unwrap();

        restaurant::delete(&pool, rid).await.unwrap();
        assert!(find_by_restaurant(&pool, rid).await.unwrap().is_empty());
    }
}
