//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const WORD_COLUMNS: &str = r#"
    device_id, id, position, word, part_of_speech, answer_form, meaning,
    sentence, cloze_sentence, streak, last_seen, weight,
    total_attempts, total_correct, is_graduated
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Device Repository ===

    /// Create a new device with generated token
    pub async fn create_device(&self, name: Option<&str>) -> Result<Device> {
        let token = Uuid::new_v4().to_string();
        let device = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(device)
    }

    /// Get device by token
    pub async fn get_device_by_token(&self, token: &str) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM devices
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    /// Update device last_seen_at timestamp
    pub async fn update_last_seen(&self, device_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE devices
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(device_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Word Repository ===

    /// Number of words a device owns
    pub async fn count_words(&self, device_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM words WHERE device_id = $1")
            .bind(device_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// The device's whole collection in stored order
    pub async fn get_words(&self, device_id: Uuid) -> Result<Vec<WordRecord>> {
        let rows = sqlx::query_as::<_, DbWord>(&format!(
            "SELECT {} FROM words WHERE device_id = $1 ORDER BY position",
            WORD_COLUMNS
        ))
        .bind(device_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(DbWord::to_word_record).collect())
    }

    /// One word by id
    pub async fn get_word(&self, device_id: Uuid, word_id: &str) -> Result<Option<WordRecord>> {
        let row = sqlx::query_as::<_, DbWord>(&format!(
            "SELECT {} FROM words WHERE device_id = $1 AND id = $2",
            WORD_COLUMNS
        ))
        .bind(device_id)
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.to_word_record()))
    }

    /// Replace the device's collection with `words`, keeping their order
    pub async fn replace_words(&self, device_id: Uuid, words: &[WordRecord]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM words WHERE device_id = $1")
            .bind(device_id)
            .execute(&mut *tx)
            .await?;

        for (position, word) in words.iter().enumerate() {
            insert_word(&mut tx, device_id, position as i32, word).await?;
        }

        tx.commit().await?;

        tracing::debug!(%device_id, count = words.len(), "Replaced word collection");
        Ok(())
    }

    /// Store the content and progress of an existing word
    ///
    /// Returns false when the device has no word with that id.
    pub async fn update_word(&self, device_id: Uuid, word: &WordRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE words
            SET word = $3, part_of_speech = $4, answer_form = $5, meaning = $6,
                sentence = $7, cloze_sentence = $8, streak = $9, last_seen = $10,
                weight = $11, total_attempts = $12, total_correct = $13,
                is_graduated = $14, updated_at = NOW()
            WHERE device_id = $1 AND id = $2
            "#,
        )
        .bind(device_id)
        .bind(&word.id)
        .bind(&word.lemma)
        .bind(&word.part_of_speech)
        .bind(&word.answer_form)
        .bind(&word.meaning)
        .bind(&word.sentence)
        .bind(&word.cloze_sentence)
        .bind(word.streak as i32)
        .bind(word.last_seen)
        .bind(word.weight)
        .bind(word.total_attempts as i32)
        .bind(word.total_correct as i32)
        .bind(word.is_graduated)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove one word. Returns false when it did not exist.
    pub async fn delete_word(&self, device_id: Uuid, word_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM words WHERE device_id = $1 AND id = $2")
            .bind(device_id)
            .bind(word_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Backup Repository ===

    /// Record an uploaded backup
    pub async fn record_backup(
        &self,
        device_id: Uuid,
        object_key: &str,
        content_hash: &str,
        word_count: usize,
    ) -> Result<DbBackup> {
        let backup = sqlx::query_as::<_, DbBackup>(
            r#"
            INSERT INTO backups (device_id, object_key, content_hash, word_count)
            VALUES ($1, $2, $3, $4)
            RETURNING id, device_id, object_key, content_hash, word_count, created_at
            "#,
        )
        .bind(device_id)
        .bind(object_key)
        .bind(content_hash)
        .bind(word_count as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(backup)
    }

    /// Most recent backup for a device
    pub async fn latest_backup(&self, device_id: Uuid) -> Result<Option<DbBackup>> {
        let backup = sqlx::query_as::<_, DbBackup>(
            r#"
            SELECT id, device_id, object_key, content_hash, word_count, created_at
            FROM backups
            WHERE device_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(backup)
    }
}

async fn insert_word(
    tx: &mut Transaction<'_, Postgres>,
    device_id: Uuid,
    position: i32,
    word: &WordRecord,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO words (
            device_id, id, position, word, part_of_speech, answer_form, meaning,
            sentence, cloze_sentence, streak, last_seen, weight,
            total_attempts, total_correct, is_graduated
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(device_id)
    .bind(&word.id)
    .bind(position)
    .bind(&word.lemma)
    .bind(&word.part_of_speech)
    .bind(&word.answer_form)
    .bind(&word.meaning)
    .bind(&word.sentence)
    .bind(&word.cloze_sentence)
    .bind(word.streak as i32)
    .bind(word.last_seen)
    .bind(word.weight)
    .bind(word.total_attempts as i32)
    .bind(word.total_correct as i32)
    .bind(word.is_graduated)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
