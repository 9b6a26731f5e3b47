//! SQLite Category Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::database::map_db_err;
use super::DbPool;
use crate::application::ports::{CategoryRecord, CategoryRepositoryPort, RepositoryError};

/// SQLite Category Repository
pub struct SqliteCategoryRepository {
    pool: DbPool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: Option<String>,
    sort_order: i64,
    enabled: i64,
    created_at: String,
    updated_at: String,
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<CategoryRow> for CategoryRecord {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(CategoryRecord {
            id: row.id,
            name: row.name,
            slug: row.slug,
            sort_order: row.sort_order,
            enabled: row.enabled != 0,
            created_at: parse_time(&row.created_at)?,
            updated_at: parse_time(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl CategoryRepositoryPort for SqliteCategoryRepository {
    async fn insert(&self, category: &CategoryRecord) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, slug, sort_order, enabled, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.sort_order)
        .bind(category.enabled as i64)
        .bind(category.created_at.to_rfc3339())
        .bind(category.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, category: &CategoryRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = ?, slug = ?, sort_order = ?, enabled = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.sort_order)
        .bind(category.enabled as i64)
        .bind(category.updated_at.to_rfc3339())
        .bind(category.id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "category {}",
                category.id
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRecord>, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, sort_order, enabled, created_at, updated_at \
             FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(CategoryRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<CategoryRecord>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, sort_order, enabled, created_at, updated_at \
             FROM categories ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(CategoryRecord::try_from).collect()
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // SQLite 连接级外键开关不可靠，这里显式检查引用
        let referencing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE category_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_err)?;

        if referencing > 0 {
            return Err(RepositoryError::ForeignKey(format!(
                "category {} is referenced by {} articles",
                id, referencing
            )));
        }

        sqlx::query("DELETE FROM categories WHERE id = ?")
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
    use crate::application::ports::{ArticleRecord, ArticleRepositoryPort};
    use crate::domain::ArticleStatus;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteArticleRepository,
    };

    async fn setup() -> (SqliteCategoryRepository, SqliteArticleRepository) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (
            SqliteCategoryRepository::new(pool.clone()),
            SqliteArticleRepository::new(pool),
        )
    }

    fn record(name: &str, sort_order: i64) -> CategoryRecord {
        let now = Utc::now();
        CategoryRecord {
            id: 0,
            name: name.to_string(),
            slug: None,
            sort_order,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_all_sorted() {
        let (repo, _) = setup().await;
        repo.insert(&record("乙", 2)).await.unwrap();
        repo.insert(&record("甲", 1)).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "甲");
        assert_eq!(all[1].name, "乙");
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let (repo, _) = setup().await;
        let mut first = record("科技", 0);
        first.slug = Some("tech".to_string());
        repo.insert(&first).await.unwrap();

        let mut second = record("技术", 1);
        second.slug = Some("tech".to_string());
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_delete_referenced_category_blocked() {
        let (categories, articles) = setup().await;
        let category_id = categories.insert(&record("科技", 0)).await.unwrap();

        let now = Utc::now();
        articles
            .insert(&ArticleRecord {
                id: 0,
                title: "引用栏目".to_string(),
                summary: None,
                content: "正文".to_string(),
                category_id: Some(category_id),
                cover_url: None,
                source_url: None,
                author: None,
                status: ArticleStatus::Active,
                release_time: None,
                view_count: 0,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let err = categories.delete(category_id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn test_delete_unreferenced_category() {
        let (repo, _) = setup().await;
        let id = repo.insert(&record("闲置", 0)).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
