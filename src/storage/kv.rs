use anyhow::Result;

use super::schema::Database;

impl Database {
    // ========================================================================
    // Key-Value Operations
    // ========================================================================

    /// Get a stored string value by key.
    ///
    /// # Returns
    ///
    /// The value if the key exists, or `None` if it was never written.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a string value (UPSERT).
    ///
    /// The whole value is replaced in one statement, so readers never see a
    /// partially written value.
    pub async fn set_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_value_missing() {
        let db = test_db().await;
        let value = db.get_value("nonexistent").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_and_get_value() {
        let db = test_db().await;
        db.set_value("tldr-read-ids", "[\"a\"]").await.unwrap();

        let value = db.get_value("tldr-read-ids").await.unwrap();
        assert_eq!(value, Some("[\"a\"]".to_string()));
    }

    #[tokio::test]
    async fn test_set_value_upsert() {
        let db = test_db().await;
        db.set_value("key", "first").await.unwrap();
        db.set_value("key", "second").await.unwrap();

        let value = db.get_value("key").await.unwrap();
        assert_eq!(value, Some("second".to_string()));

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kv_store")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = test_db().await;
        db.set_value("tldr-read-ids", "[\"r\"]").await.unwrap();
        db.set_value("tldr-liked-ids", "[\"l\"]").await.unwrap();

        assert_eq!(
            db.get_value("tldr-read-ids").await.unwrap().as_deref(),
            Some("[\"r\"]")
        );
        assert_eq!(
            db.get_value("tldr-liked-ids").await.unwrap().as_deref(),
            Some("[\"l\"]")
        );
    }
}
