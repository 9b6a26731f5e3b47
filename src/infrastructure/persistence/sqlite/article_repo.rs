//! SQLite Article Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::database::map_db_err;
use super::DbPool;
use crate::application::ports::{
    ArticleFilter, ArticleRecord, ArticleRepositoryPort, RepositoryError,
};
use crate::domain::ArticleStatus;

/// SQLite Article Repository
pub struct SqliteArticleRepository {
    pool: DbPool,
}

impl SqliteArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const ARTICLE_COLUMNS: &str = "id, title, summary, content, category_id, cover_url, \
     source_url, author, status, release_time, view_count, created_at, updated_at";

#[derive(FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    summary: Option<String>,
    content: String,
    category_id: Option<i64>,
    cover_url: Option<String>,
    source_url: Option<String>,
    author: Option<String>,
    status: i64,
    release_time: Option<String>,
    view_count: i64,
    created_at: String,
    updated_at: String,
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<ArticleRow> for ArticleRecord {
    type Error = RepositoryError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(ArticleRecord {
            id: row.id,
            title: row.title,
            summary: row.summary,
            content: row.content,
            category_id: row.category_id,
            cover_url: row.cover_url,
            source_url: row.source_url,
            author: row.author,
            status: ArticleStatus::from_i32(row.status as i32).unwrap_or_default(),
            release_time: row.release_time.as_deref().map(parse_time).transpose()?,
            view_count: row.view_count,
            created_at: parse_time(&row.created_at)?,
            updated_at: parse_time(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl ArticleRepositoryPort for SqliteArticleRepository {
    async fn insert(&self, article: &ArticleRecord) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles
                (title, summary, content, category_id, cover_url, source_url,
                 author, status, release_time, view_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(article.category_id)
        .bind(&article.cover_url)
        .bind(&article.source_url)
        .bind(&article.author)
        .bind(article.status.as_i32())
        .bind(article.release_time.map(|t| t.to_rfc3339()))
        .bind(article.view_count)
        .bind(article.created_at.to_rfc3339())
        .bind(article.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, article: &ArticleRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE articles SET
                title = ?, summary = ?, content = ?, category_id = ?, cover_url = ?,
                source_url = ?, author = ?, status = ?, release_time = ?,
                view_count = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(article.category_id)
        .bind(&article.cover_url)
        .bind(&article.source_url)
        .bind(&article.author)
        .bind(article.status.as_i32())
        .bind(article.release_time.map(|t| t.to_rfc3339()))
        .bind(article.view_count)
        .bind(article.updated_at.to_rfc3339())
        .bind(article.id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "article {}",
                article.id
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ArticleRecord>, RepositoryError> {
        let sql = format!("SELECT {} FROM articles WHERE id = ?", ARTICLE_COLUMNS);
        let row: Option<ArticleRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.map(ArticleRecord::try_from).transpose()
    }

    async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Option<ArticleRecord>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM articles WHERE source_url = ? LIMIT 1",
            ARTICLE_COLUMNS
        );
        let row: Option<ArticleRow> = sqlx::query_as(&sql)
            .bind(source_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.map(ArticleRecord::try_from).transpose()
    }

    async fn find_page(
        &self,
        filter: &ArticleFilter,
        order_by: &str,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<ArticleRecord>, u64), RepositoryError> {
        let mut conditions = String::new();
        if filter.status.is_some() {
            conditions.push_str(" AND status = ?");
        }
        if filter.category_id.is_some() {
            conditions.push_str(" AND category_id = ?");
        }
        if filter.keyword.is_some() {
            conditions.push_str(" AND title LIKE ?");
        }

        // order_by 已由上游经允许列表校验
        let page_sql = format!(
            "SELECT {} FROM articles WHERE 1=1{} ORDER BY {} LIMIT ? OFFSET ?",
            ARTICLE_COLUMNS, conditions, order_by
        );
        let count_sql = format!("SELECT COUNT(*) FROM articles WHERE 1=1{}", conditions);

        let keyword_pattern = filter.keyword.as_ref().map(|k| format!("%{}%", k));

        let mut page_query = sqlx::query_as::<_, ArticleRow>(&page_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(status) = filter.status {
            page_query = page_query.bind(status.as_i32());
            count_query = count_query.bind(status.as_i32());
        }
        if let Some(category_id) = filter.category_id {
            page_query = page_query.bind(category_id);
            count_query = count_query.bind(category_id);
        }
        if let Some(pattern) = &keyword_pattern {
            page_query = page_query.bind(pattern);
            count_query = count_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?;

        let rows: Vec<ArticleRow> = page_query
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        let records = rows
            .into_iter()
            .map(ArticleRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total.max(0) as u64))
    }

    async fn update_status(
        &self,
        ids: &[i64],
        status: ArticleStatus,
    ) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE articles SET status = ?, updated_at = ? WHERE id IN ({})",
            placeholders
        );

        let mut query = sqlx::query(&sql)
            .bind(status.as_i32())
            .bind(Utc::now().to_rfc3339());
        for id in ids {
            query = query.bind(id);
        }

        let result = query.execute(&self.pool).await.map_err(map_db_err)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        // 级联删除阅读日志后删除文章
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        sqlx::query("DELETE FROM read_logs WHERE article_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig,
    };

    async fn setup() -> SqliteArticleRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteArticleRepository::new(pool)
    }

    fn record(title: &str, status: ArticleStatus) -> ArticleRecord {
        let now = Utc::now();
        ArticleRecord {
            id: 0,
            title: title.to_string(),
            summary: None,
            content: "正文".to_string(),
            category_id: None,
            cover_url: None,
            source_url: None,
            author: Some("编辑部".to_string()),
            status,
            release_time: Some(now),
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = setup().await;
        let id = repo
            .insert(&record("第一篇", ArticleStatus::Active))
            .await
            .unwrap();
        assert!(id > 0);

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.title, "第一篇");
        assert_eq!(found.status, ArticleStatus::Active);
        assert!(found.release_time.is_some());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = setup().await;
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_returns_not_found() {
        let repo = setup().await;
        let mut article = record("不存在", ArticleStatus::Pending);
        article.id = 999;
        let err = repo.update(&article).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_page_with_filter_and_order() {
        let repo = setup().await;
        for i in 0..5 {
            let status = if i % 2 == 0 {
                ArticleStatus::Active
            } else {
                ArticleStatus::Pending
            };
            repo.insert(&record(&format!("新闻 {}", i), status))
                .await
                .unwrap();
        }

        let filter = ArticleFilter {
            status: Some(ArticleStatus::Active),
            ..Default::default()
        };
        let (items, total) = repo.find_page(&filter, "id ASC", 0, 10).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items.len(), 3);
        assert!(items.windows(2).all(|w| w[0].id < w[1].id));

        // 分页窗口
        let (items, total) = repo
            .find_page(&ArticleFilter::default(), "id ASC", 2, 2)
            .await
            .unwrap();
        assert_eq!(total, 5);
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_find_page_keyword() {
        let repo = setup().await;
        repo.insert(&record("科技周报", ArticleStatus::Active))
            .await
            .unwrap();
        repo.insert(&record("财经早读", ArticleStatus::Active))
            .await
            .unwrap();

        let filter = ArticleFilter {
            keyword: Some("科技".to_string()),
            ..Default::default()
        };
        let (items, total) = repo.find_page(&filter, "id ASC", 0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].title, "科技周报");
    }

    #[tokio::test]
    async fn test_update_status_batch() {
        let repo = setup().await;
        let mut ids = Vec::new();
        for i in 0..3 {
            ids.push(
                repo.insert(&record(&format!("批量 {}", i), ArticleStatus::Pending))
                    .await
                    .unwrap(),
            );
        }

        let updated = repo
            .update_status(&ids, ArticleStatus::Deleted)
            .await
            .unwrap();
        assert_eq!(updated, 3);

        let found = repo.find_by_id(ids[0]).await.unwrap().unwrap();
        assert_eq!(found.status, ArticleStatus::Deleted);

        // 空列表不报错
        assert_eq!(repo.update_status(&[], ArticleStatus::Active).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup().await;
        let id = repo
            .insert(&record("待删除", ArticleStatus::Pending))
            .await
            .unwrap();
        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
