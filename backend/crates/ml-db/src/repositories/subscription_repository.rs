use crate::repositories::timestamp_column;
use crate::{DbError, Result as DbErrorResult};

use ml_core::Subscriber;

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct SubscriptionRepository {
    pool: SqlitePool,
}

impl SubscriptionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Subscribe `email` to the list, issuing a fresh unsubscribe token
    pub async fn subscribe(&self, list_id: i64, email: &str) -> DbErrorResult<Subscriber> {
        let unsub_token = Uuid::new_v4().to_string();
        let joined_at = Utc::now();

        let result = sqlx::query(
            r#"
                INSERT INTO subscriptions (list_id, email, unsub_token, joined_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(list_id)
        .bind(email)
        .bind(&unsub_token)
        .bind(joined_at.timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DbError::AlreadySubscribed {
                    list_id,
                    email: email.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Err(e) => return Err(e.into()),
        }

        log::info!("Subscribed {} to list {}", email, list_id);

        Ok(Subscriber {
            email: email.to_string(),
            unsub_token,
            joined_at,
        })
    }

    /// Remove a subscription after checking its unsubscribe token
    pub async fn unsubscribe(&self, list_id: i64, email: &str, token: &str) -> DbErrorResult<()> {
        let actual = sqlx::query_scalar::<_, String>(
            "SELECT unsub_token FROM subscriptions WHERE list_id = ? AND email = ?",
        )
        .bind(list_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::SubscriberNotFound {
            list_id,
            email: email.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if actual != token {
            return Err(DbError::BadUnsubscribeToken {
                email: email.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        sqlx::query("DELETE FROM subscriptions WHERE list_id = ? AND email = ?")
            .bind(list_id)
            .bind(email)
            .execute(&self.pool)
            .await?;

        log::info!("Unsubscribed {} from list {}", email, list_id);
        Ok(())
    }

    /// Current subscribers of a list in join order
    pub async fn list_subscribers(&self, list_id: i64) -> DbErrorResult<Vec<Subscriber>> {
        let rows = sqlx::query(
            r#"
                SELECT email, unsub_token, joined_at
                FROM subscriptions
                WHERE list_id = ?
                ORDER BY joined_at, rowid
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| -> DbErrorResult<Subscriber> {
                Ok(Subscriber {
                    email: r.try_get("email")?,
                    unsub_token: r.try_get("unsub_token")?,
                    joined_at: timestamp_column(r.try_get("joined_at")?, "subscriptions.joined_at")?,
                })
            })
            .collect::<DbErrorResult<Vec<_>>>()
    }

    pub async fn count(&self, list_id: i64) -> DbErrorResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscriptions WHERE list_id = ?")
                .bind(list_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
