//! Mailing list repository.
//!
//! Lists are addressed by name everywhere outside this crate; the integer id
//! only links subscriptions to their list.

use crate::repositories::timestamp_column;
use crate::{DbError, Result as DbErrorResult};

use ml_core::{MailingList, MailingListSummary};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool};

pub struct MailingListRepository {
    pool: SqlitePool,
}

impl MailingListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a list id by name. `None` when no such list exists.
    pub async fn find_id_by_name(&self, name: &str) -> DbErrorResult<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM mailing_lists WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }

    /// Like [`Self::find_id_by_name`] but a missing list is an error
    pub async fn require_id_by_name(&self, name: &str) -> DbErrorResult<i64> {
        self.find_id_by_name(name)
            .await?
            .ok_or_else(|| DbError::ListNotFound {
                name: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn find_by_name(&self, name: &str) -> DbErrorResult<Option<MailingList>> {
        let row = sqlx::query(
            r#"
                SELECT id, name, description, created_at
                FROM mailing_lists
                WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| -> DbErrorResult<MailingList> {
            Ok(MailingList {
                id: r.try_get("id")?,
                name: r.try_get("name")?,
                description: r.try_get("description")?,
                created_at: timestamp_column(r.try_get("created_at")?, "mailing_lists.created_at")?,
            })
        })
        .transpose()
    }

    /// Create a list, or return the id of the existing list with this name
    pub async fn create(&self, name: &str, description: &str) -> DbErrorResult<i64> {
        if let Some(existing) = self.find_id_by_name(name).await? {
            log::debug!("Mailing list '{}' already exists ({})", name, existing);
            return Ok(existing);
        }

        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            "INSERT INTO mailing_lists (name, description, created_at) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        log::info!("Created mailing list '{}' ({})", name, id);
        Ok(id)
    }

    /// Every list with its current subscriber count, ordered by name
    pub async fn find_all_summaries(&self) -> DbErrorResult<Vec<MailingListSummary>> {
        let rows = sqlx::query(
            r#"
                SELECT ml.name, ml.description, ml.created_at, COUNT(s.email) AS subscriber_count
                FROM mailing_lists ml
                LEFT JOIN subscriptions s ON ml.id = s.list_id
                GROUP BY ml.id
                ORDER BY ml.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| -> DbErrorResult<MailingListSummary> {
                Ok(MailingListSummary {
                    name: r.try_get("name")?,
                    description: r.try_get("description")?,
                    created_at: timestamp_column(
                        r.try_get("created_at")?,
                        "mailing_lists.created_at",
                    )?,
                    subscriber_count: r.try_get("subscriber_count")?,
                })
            })
            .collect::<DbErrorResult<Vec<_>>>()
    }
}
