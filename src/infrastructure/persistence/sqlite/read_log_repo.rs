//! SQLite Read Log Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::database::map_db_err;
use super::DbPool;
use crate::application::ports::{ReadLogRecord, ReadLogRepositoryPort, RepositoryError};

/// SQLite Read Log Repository
pub struct SqliteReadLogRepository {
    pool: DbPool,
}

impl SqliteReadLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const READ_LOG_COLUMNS: &str = "id, article_id, user_id, session_id, ip_address, \
     duration_seconds, is_completed, read_time, created_at";

#[derive(FromRow)]
struct ReadLogRow {
    id: i64,
    article_id: i64,
    user_id: i64,
    session_id: Option<String>,
    ip_address: Option<String>,
    duration_seconds: i64,
    is_completed: i64,
    read_time: String,
    created_at: String,
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<ReadLogRow> for ReadLogRecord {
    type Error = RepositoryError;

    fn try_from(row: ReadLogRow) -> Result<Self, Self::Error> {
        Ok(ReadLogRecord {
            id: row.id,
            article_id: row.article_id,
            user_id: row.user_id,
            session_id: row.session_id,
            ip_address: row.ip_address,
            duration_seconds: row.duration_seconds,
            is_completed: row.is_completed != 0,
            read_time: parse_time(&row.read_time)?,
            created_at: parse_time(&row.created_at)?,
        })
    }
}

#[async_trait]
impl ReadLogRepositoryPort for SqliteReadLogRepository {
    async fn insert(&self, log: &ReadLogRecord) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO read_logs
                (article_id, user_id, session_id, ip_address, duration_seconds,
                 is_completed, read_time, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.article_id)
        .bind(log.user_id)
        .bind(&log.session_id)
        .bind(&log.ip_address)
        .bind(log.duration_seconds)
        .bind(log.is_completed as i64)
        .bind(log.read_time.to_rfc3339())
        .bind(log.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn find_page(
        &self,
        article_id: Option<i64>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<ReadLogRecord>, u64), RepositoryError> {
        let condition = if article_id.is_some() {
            " AND article_id = ?"
        } else {
            ""
        };
        let page_sql = format!(
            "SELECT {} FROM read_logs WHERE 1=1{} ORDER BY read_time DESC LIMIT ? OFFSET ?",
            READ_LOG_COLUMNS, condition
        );
        let count_sql = format!("SELECT COUNT(*) FROM read_logs WHERE 1=1{}", condition);

        let mut page_query = sqlx::query_as::<_, ReadLogRow>(&page_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(article_id) = article_id {
            page_query = page_query.bind(article_id);
            count_query = count_query.bind(article_id);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?;

        let rows: Vec<ReadLogRow> = page_query
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        let records = rows
            .into_iter()
            .map(ReadLogRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total.max(0) as u64))
    }

    async fn count_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM read_logs WHERE read_time < ?")
            .bind(cutoff.to_rfc3339())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(count.max(0) as u64)
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM read_logs WHERE read_time < ?")
            .bind(cutoff.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected())
    }
}
