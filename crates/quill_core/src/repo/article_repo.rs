//! Article store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `articles` table.
//! - Own server-side timestamps (`created_at`, `updated_at`).
//!
//! # Invariants
//! - `update_article` only touches `title`, `body` and `updated_at`.
//! - `delete_article` is a hard delete; a second delete reports `NotFound`.
//! - Listing order is `created_at DESC`, newest insert first on ties.
//! - Mutations run in `BEGIN IMMEDIATE` transactions: the write lock is
//!   taken up front, so concurrent writers on other connections wait on the
//!   busy timeout instead of deadlocking.

use super::{ensure_connection_ready, is_constraint_violation, parse_uuid, RepoError, RepoResult};
use crate::model::article::{Article, ArticleFields, ArticleId};
use crate::model::user::UserId;
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use uuid::Uuid;

const ARTICLE_SELECT_SQL: &str = "SELECT
    uuid,
    owner_uuid,
    title,
    body,
    created_at,
    updated_at
FROM articles";

/// Query options for listing articles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    /// Restrict to articles owned by this user.
    pub owner_id: Option<UserId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for the article store.
pub trait ArticleRepository {
    /// Persists a new article owned by `owner_id` and returns the stored record.
    fn create_article(&self, fields: &ArticleFields, owner_id: UserId) -> RepoResult<Article>;
    /// Replaces title and body in place and returns the stored record.
    fn update_article(&self, id: ArticleId, fields: &ArticleFields) -> RepoResult<Article>;
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>>;
    fn delete_article(&self, id: ArticleId) -> RepoResult<()>;
    fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>>;
    fn count_articles(&self) -> RepoResult<u64>;

    fn list_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Article>> {
        self.list_articles(&ArticleListQuery {
            owner_id: Some(owner_id),
            ..ArticleListQuery::default()
        })
    }
}

/// SQLite-backed article store.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn read_back(&self, id: ArticleId) -> RepoResult<Article> {
        self.get_article(id)?
            .ok_or(RepoError::NotFound {
                entity: "article",
                id,
            })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create_article(&self, fields: &ArticleFields, owner_id: UserId) -> RepoResult<Article> {
        let id = Uuid::new_v4();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let inserted = tx.execute(
            "INSERT INTO articles (uuid, owner_uuid, title, body)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                owner_id.to_string(),
                fields.title(),
                fields.body(),
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => {
                return Err(RepoError::UnknownOwner(owner_id));
            }
            Err(err) => return Err(err.into()),
        }

        let article = self.read_back(id)?;
        tx.commit()?;
        Ok(article)
    }

    fn update_article(&self, id: ArticleId, fields: &ArticleFields) -> RepoResult<Article> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE articles
             SET
                title = ?2,
                body = ?3,
                updated_at = max(created_at, strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), fields.title(), fields.body()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "article",
                id,
            });
        }

        let article = self.read_back(id)?;
        tx.commit()?;
        Ok(article)
    }

    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let article = self
            .conn
            .query_row(
                &format!("{ARTICLE_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_article_row(row)),
            )
            .optional()?;

        article.transpose()
    }

    fn delete_article(&self, id: ArticleId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM articles WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "article",
                id,
            });
        }

        tx.commit()?;
        Ok(())
    }

    fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>> {
        let mut sql = format!("{ARTICLE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(owner_id) = query.owner_id {
            sql.push_str(" AND owner_uuid = ?");
            bind_values.push(Value::Text(owner_id.to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut articles = Vec::new();

        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }

        Ok(articles)
    }

    fn count_articles(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative article count `{count}`")))
    }
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let id_text: String = row.get("uuid")?;
    let owner_text: String = row.get("owner_uuid")?;

    let article = Article {
        id: parse_uuid(&id_text, "articles.uuid")?,
        owner_id: parse_uuid(&owner_text, "articles.owner_uuid")?,
        title: row.get("title")?,
        body: row.get("body")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    if article.title.trim().is_empty() || article.body.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "article {} has empty title or body",
            article.id
        )));
    }

    Ok(article)
}
