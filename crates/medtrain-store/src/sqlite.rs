//! SQLite storage implementation.
//!
//! This module provides the `SqliteStore` implementation of the `Store` trait.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};
use sqlx::{QueryBuilder, Sqlite};

use medtrain_core::{
    CardFields, CardId, CardView, CatalogStats, Category, CategoryId, CategoryInput, Comment,
    CommentId, CommentInput, LikeOutcome, LikeToggle, TopCard, TOP_CARDS_LIMIT,
};

use crate::error::{Result, StoreError};
use crate::schema::{DEFAULT_CATEGORIES, MIGRATOR};
use crate::{CardFilter, Store};

/// Maximum pooled connections for a file-backed store.
const MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits for the database lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Card columns joined with category display names and the comment count.
const CARD_VIEW_SELECT: &str = "\
    SELECT tc.*, \
           c.name AS category_name, \
           c.name_swahili AS category_name_swahili, \
           c.name_korean AS category_name_korean, \
           (SELECT COUNT(*) FROM comments cm WHERE cm.card_id = tc.id) AS comment_count \
    FROM training_cards tc \
    LEFT JOIN categories c ON tc.category_id = c.id";

/// SQLite-backed storage implementation.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open or create a database file at the given path, then migrate and seed it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created, opened, or migrated.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), "Catalog database opened");

        Self::init(pool).await
    }

    /// Open a private in-memory database (for tests).
    ///
    /// The pool holds exactly one connection that never expires, since every
    /// in-memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or migrated.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self> {
        MIGRATOR.run(&pool).await?;
        tracing::debug!("Catalog migrations complete");

        let store = Self { pool };
        store.seed_default_categories().await?;
        Ok(store)
    }

    /// Insert the default categories that are not present yet.
    async fn seed_default_categories(&self) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for (name, swahili, korean, description) in DEFAULT_CATEGORIES {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO categories \
                 (name, name_swahili, name_korean, description, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(name)
            .bind(swahili)
            .bind(korean)
            .bind(description)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;

        if inserted > 0 {
            tracing::info!(inserted, "Seeded default categories");
        }
        Ok(())
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Bind the editable card columns in table order.
fn bind_card_fields<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    fields: &'q CardFields,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(&fields.title)
        .bind(&fields.title_swahili)
        .bind(&fields.title_korean)
        .bind(fields.category_id)
        .bind(&fields.content_provider)
        .bind(&fields.target_audience)
        .bind(&fields.difficulty_level)
        .bind(&fields.markdown_text)
        .bind(&fields.html_content)
        .bind(&fields.image_url)
        .bind(&fields.video_url)
        .bind(&fields.audio_url)
        .bind(&fields.pdf_url)
        .bind(fields.video_urls.to_column())
        .bind(fields.audio_urls.to_column())
}

/// Build a LIKE pattern matching `term` literally anywhere in the column.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Turn a foreign-key failure on a card child row into `NotFound` for the card.
fn missing_parent_card(card_id: CardId) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |err| match StoreError::from(err) {
        StoreError::InvalidReference(_) => StoreError::card_not_found(card_id),
        other => other,
    }
}

/// Turn a foreign-key failure on a card row into a readable message.
fn unknown_category(fields: &CardFields) -> impl FnOnce(sqlx::Error) -> StoreError + '_ {
    move |err| match StoreError::from(err) {
        StoreError::InvalidReference(_) => StoreError::InvalidReference(format!(
            "category {} does not exist",
            fields
                .category_id
                .map_or_else(|| "null".to_string(), |id| id.to_string())
        )),
        other => other,
    }
}

#[async_trait]
impl Store for SqliteStore {
    // =========================================================================
    // Category Operations
    // =========================================================================

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn create_category(&self, input: &CategoryInput) -> Result<CategoryId> {
        let input = input.clone().validated()?;
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO categories \
             (name, name_swahili, name_korean, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.name_swahili)
        .bind(&input.name_korean)
        .bind(&input.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::DuplicateKey(_) => {
                StoreError::DuplicateKey(format!("category {:?} already exists", input.name))
            }
            other => other,
        })?;

        let id = CategoryId::new(result.last_insert_rowid());
        tracing::info!(category_id = %id, name = %input.name, "Category created");
        Ok(id)
    }

    async fn update_category(&self, id: CategoryId, input: &CategoryInput) -> Result<()> {
        let input = input.clone().validated()?;

        let result = sqlx::query(
            "UPDATE categories \
             SET name = ?, name_swahili = ?, name_korean = ?, description = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.name_swahili)
        .bind(&input.name_korean)
        .bind(&input.description)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::DuplicateKey(_) => {
                StoreError::DuplicateKey(format!("category {:?} already exists", input.name))
            }
            other => other,
        })?;

        tracing::info!(category_id = %id, updated = result.rows_affected(), "Category updated");
        Ok(())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(category_id = %id, deleted = result.rows_affected(), "Category deleted");
        Ok(())
    }

    // =========================================================================
    // Card Operations
    // =========================================================================

    async fn list_cards(&self, filter: &CardFilter) -> Result<Vec<CardView>> {
        let mut query = QueryBuilder::<Sqlite>::new(CARD_VIEW_SELECT);
        query.push(" WHERE 1 = 1");

        if let Some(category_id) = filter.effective_category() {
            query.push(" AND tc.category_id = ").push_bind(category_id);
        }

        if let Some(term) = filter.search_term() {
            let pattern = contains_pattern(term);
            query
                .push(" AND (tc.title LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR tc.markdown_text LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        query.push(" ORDER BY tc.created_at DESC, tc.id DESC");

        let cards = query
            .build_query_as::<CardView>()
            .fetch_all(&self.pool)
            .await?;
        Ok(cards)
    }

    async fn get_card(&self, id: CardId) -> Result<CardView> {
        let mut tx = self.pool.begin().await?;

        // The increment comes first so the transaction takes the write lock
        // before it reads.
        let updated = sqlx::query("UPDATE training_cards SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::card_not_found(id));
        }

        let sql = format!("{CARD_VIEW_SELECT} WHERE tc.id = ?");
        let view = sqlx::query_as::<_, CardView>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(view)
    }

    async fn create_card(&self, fields: &CardFields) -> Result<CardId> {
        let now = Utc::now();

        let query = sqlx::query(
            "INSERT INTO training_cards \
             (title, title_swahili, title_korean, category_id, content_provider, \
              target_audience, difficulty_level, markdown_text, html_content, image_url, \
              video_url, audio_url, pdf_url, video_urls, audio_urls, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        );

        let result = bind_card_fields(query, fields)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(unknown_category(fields))?;

        let id = CardId::new(result.last_insert_rowid());
        tracing::info!(card_id = %id, title = %fields.title, "Card created");
        Ok(id)
    }

    async fn update_card(&self, id: CardId, fields: &CardFields) -> Result<()> {
        let query = sqlx::query(
            "UPDATE training_cards \
             SET title = ?, title_swahili = ?, title_korean = ?, category_id = ?, \
                 content_provider = ?, target_audience = ?, difficulty_level = ?, \
                 markdown_text = ?, html_content = ?, image_url = ?, video_url = ?, \
                 audio_url = ?, pdf_url = ?, video_urls = ?, audio_urls = ?, updated_at = ? \
             WHERE id = ?",
        );

        let result = bind_card_fields(query, fields)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unknown_category(fields))?;

        tracing::info!(card_id = %id, updated = result.rows_affected(), "Card updated");
        Ok(())
    }

    async fn delete_card(&self, id: CardId) -> Result<()> {
        let result = sqlx::query("DELETE FROM training_cards WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(card_id = %id, deleted = result.rows_affected(), "Card deleted");
        Ok(())
    }

    // =========================================================================
    // Engagement Operations
    // =========================================================================

    async fn toggle_like(&self, card_id: CardId, user_identifier: &str) -> Result<LikeToggle> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO card_likes (card_id, user_identifier, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (card_id, user_identifier) DO NOTHING",
        )
        .bind(card_id)
        .bind(user_identifier)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(missing_parent_card(card_id))?;

        let status = if inserted.rows_affected() > 0 {
            LikeOutcome::Liked
        } else {
            sqlx::query("DELETE FROM card_likes WHERE card_id = ? AND user_identifier = ?")
                .bind(card_id)
                .bind(user_identifier)
                .execute(&mut *tx)
                .await?;
            LikeOutcome::Unliked
        };

        // The counter is rewritten from the like rows, so it cannot drift.
        let like_count: i64 = sqlx::query_scalar(
            "UPDATE training_cards \
             SET like_count = (SELECT COUNT(*) FROM card_likes WHERE card_id = ?) \
             WHERE id = ? \
             RETURNING like_count",
        )
        .bind(card_id)
        .bind(card_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::card_not_found(card_id))?;

        tx.commit().await?;

        tracing::info!(
            card_id = %card_id,
            user = %user_identifier,
            status = ?status,
            like_count,
            "Like toggled"
        );

        Ok(LikeToggle { status, like_count })
    }

    async fn list_comments(&self, card_id: CardId) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE card_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn add_comment(&self, card_id: CardId, input: &CommentInput) -> Result<CommentId> {
        let input = input.clone().validated()?;

        let result = sqlx::query(
            "INSERT INTO comments (card_id, user_name, comment_text, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(card_id)
        .bind(&input.user_name)
        .bind(&input.comment_text)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(missing_parent_card(card_id))?;

        let id = CommentId::new(result.last_insert_rowid());
        tracing::info!(card_id = %card_id, comment_id = %id, "Comment added");
        Ok(id)
    }

    async fn stats(&self) -> Result<CatalogStats> {
        let mut tx = self.pool.begin().await?;

        let (total_cards, total_views, total_likes): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(view_count), 0), COALESCE(SUM(like_count), 0) \
             FROM training_cards",
        )
        .fetch_one(&mut *tx)
        .await?;

        let total_comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&mut *tx)
            .await?;

        let top_cards = sqlx::query_as::<_, TopCard>(
            "SELECT tc.id, tc.title, tc.view_count, tc.like_count, \
                    (SELECT COUNT(*) FROM comments cm WHERE cm.card_id = tc.id) AS comment_count \
             FROM training_cards tc \
             ORDER BY tc.view_count DESC, tc.id ASC \
             LIMIT ?",
        )
        .bind(TOP_CARDS_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CatalogStats {
            total_cards,
            total_views,
            total_likes,
            total_comments,
            top_cards,
        })
    }
}
