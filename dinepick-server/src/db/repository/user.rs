//! User Repository

use super::{RepoError, RepoResult};
use shared::models::User;
use shared::util::now_millis;
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, username, email, hash_pass, enabled, created_at, updated_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE email = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Insert a user with an already-hashed password
///
/// A username or email collision surfaces as [`RepoError::Duplicate`].
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    hash_pass: &str,
) -> RepoResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO user (username, email, hash_pass, enabled, created_at) VALUES (?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(hash_pass)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn set_enabled(pool: &SqlitePool, id: i64, enabled: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user SET enabled = ?, updated_at = ? WHERE id = ?")
        .bind(enabled)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;

        let user = create(&pool, "test", "test@test.com", "$argon2id$hash")
            .await
            .unwrap();
        assert!(user.enabled);
        assert!(user.updated_at.is_none());

        let by_name = find_by_username(&pool, "test").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_name.hash_pass, "$argon2id$hash");

        let by_email = find_by_email(&pool, "test@test.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(find_by_username(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        let pool = test_pool().await;
        create(&pool, "test", "test@test.com", "h").await.unwrap();

        let err = create(&pool, "test", "other@test.com", "h").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let err = create(&pool, "other", "test@test.com", "h").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_set_enabled() {
        let pool = test_pool().await;
        let user = create(&pool, "test", "test@test.com", "h").await.unwrap();

        set_enabled(&pool, user.id, false).await.unwrap();
        let user = find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(!user.enabled);
        assert!(user.updated_at.is_some());

        assert!(matches!(
            set_enabled(&pool, 999, true).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
