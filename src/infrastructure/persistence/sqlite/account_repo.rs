//! SQLite Account Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::database::map_db_err;
use super::DbPool;
use crate::application::ports::{AccountRecord, AccountRepositoryPort, RepositoryError};

/// SQLite Account Repository
pub struct SqliteAccountRepository {
    pool: DbPool,
}

impl SqliteAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const ACCOUNT_COLUMNS: &str =
    "id, name, app_id, app_secret, token, encoding_aes_key, description, created_at, updated_at";

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    app_id: String,
    app_secret: String,
    token: Option<String>,
    encoding_aes_key: Option<String>,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<AccountRow> for AccountRecord {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(AccountRecord {
            id: row.id,
            name: row.name,
            app_id: row.app_id,
            app_secret: row.app_secret,
            token: row.token,
            encoding_aes_key: row.encoding_aes_key,
            description: row.description,
            created_at: parse_time(&row.created_at)?,
            updated_at: parse_time(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl AccountRepositoryPort for SqliteAccountRepository {
    async fn insert(&self, account: &AccountRecord) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts
                (name, app_id, app_secret, token, encoding_aes_key, description,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.name)
        .bind(&account.app_id)
        .bind(&account.app_secret)
        .bind(&account.token)
        .bind(&account.encoding_aes_key)
        .bind(&account.description)
        .bind(account.created_at.to_rfc3339())
        .bind(account.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, account: &AccountRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                name = ?, app_secret = ?, token = ?, encoding_aes_key = ?,
                description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.name)
        .bind(&account.app_secret)
        .bind(&account.token)
        .bind(&account.encoding_aes_key)
        .bind(&account.description)
        .bind(account.updated_at.to_rfc3339())
        .bind(account.id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("account {}", account.id)));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, RepositoryError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = ?", ACCOUNT_COLUMNS);
        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn find_by_app_id(
        &self,
        app_id: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError> {
        let sql = format!("SELECT {} FROM accounts WHERE app_id = ?", ACCOUNT_COLUMNS);
        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(app_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<AccountRecord>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM accounts ORDER BY created_at DESC",
            ACCOUNT_COLUMNS
        );
        let rows: Vec<AccountRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(AccountRecord::try_from).collect()
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig,
    };

    async fn setup() -> SqliteAccountRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteAccountRepository::new(pool)
    }

    fn record(app_id: &str) -> AccountRecord {
        let now = Utc::now();
        AccountRecord {
            id: 0,
            name: "测试公众号".to_string(),
            app_id: app_id.to_string(),
            app_secret: "0123456789abcdef0123456789abcdef".to_string(),
            token: None,
            encoding_aes_key: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_app_id() {
        let repo = setup().await;
        let id = repo.insert(&record("wx1234567890abcdef")).await.unwrap();

        let found = repo
            .find_by_app_id("wx1234567890abcdef")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "测试公众号");
    }

    #[tokio::test]
    async fn test_duplicate_app_id_rejected() {
        let repo = setup().await;
        repo.insert(&record("wx1234567890abcdef")).await.unwrap();
        let err = repo.insert(&record("wx1234567890abcdef")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_app_id() {
        let repo = setup().await;
        let id = repo.insert(&record("wx1234567890abcdef")).await.unwrap();

        let mut account = repo.find_by_id(id).await.unwrap().unwrap();
        account.name = "改名".to_string();
        account.token = Some("my_token".to_string());
        repo.update(&account).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "改名");
        assert_eq!(found.app_id, "wx1234567890abcdef");
        assert_eq!(found.token.as_deref(), Some("my_token"));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup().await;
        let id = repo.insert(&record("wx1234567890abcdef")).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
