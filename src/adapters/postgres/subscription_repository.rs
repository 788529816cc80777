//! PostgreSQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{
    already_cancelled, Category, Currency, Frequency, PaymentMethod, Price, RenewalWindow,
    Subscription, SubscriptionName, SubscriptionStatus,
};
use crate::ports::{OwnerSummary, SubscriptionRepository, SubscriptionWithOwner};

use super::user_repository::corrupt;

/// Database row representation for subscriptions.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    price: f64,
    currency: String,
    frequency: String,
    category: String,
    payment_method: String,
    start_date: DateTime<Utc>,
    renewal_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription::reconstitute(
            SubscriptionId::from_uuid(row.id),
            UserId::from_uuid(row.user_id),
            SubscriptionName::parse(&row.name).map_err(|e| corrupt("name", e))?,
            Price::new(row.price).map_err(|e| corrupt("price", e))?,
            row.currency.parse::<Currency>().map_err(|e| corrupt("currency", e))?,
            row.frequency.parse::<Frequency>().map_err(|e| corrupt("frequency", e))?,
            row.category.parse::<Category>().map_err(|e| corrupt("category", e))?,
            PaymentMethod::parse(&row.payment_method).map_err(|e| corrupt("payment_method", e))?,
            Timestamp::from_datetime(row.start_date),
            Timestamp::from_datetime(row.renewal_date),
            parse_status(&row.status)?,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

/// Subscription joined with its owner's public columns.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionWithOwnerRow {
    #[sqlx(flatten)]
    subscription: SubscriptionRow,
    owner_name: String,
    owner_email: String,
}

impl TryFrom<SubscriptionWithOwnerRow> for SubscriptionWithOwner {
    type Error = DomainError;

    fn try_from(row: SubscriptionWithOwnerRow) -> Result<Self, Self::Error> {
        let subscription = Subscription::try_from(row.subscription)?;
        Ok(SubscriptionWithOwner {
            owner: OwnerSummary {
                id: *subscription.user_id(),
                name: row.owner_name,
                email: row.owner_email,
            },
            subscription,
        })
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s {
        "active" => Ok(SubscriptionStatus::Active),
        "cancelled" => Ok(SubscriptionStatus::Cancelled),
        other => Err(corrupt("status", other)),
    }
}

const SUBSCRIPTION_COLUMNS: &str = r#"
    s.id, s.user_id, s.name, s.price, s.currency, s.frequency, s.category,
    s.payment_method, s.start_date, s.renewal_date, s.status, s.created_at, s.updated_at
"#;

/// Removes every subscription owned by `owner`. Shared by the unit of work.
pub(super) async fn delete_by_owner<'e, E: PgExecutor<'e>>(
    executor: E,
    owner: &UserId,
) -> Result<u64, DomainError> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1")
        .bind(owner.as_uuid())
        .execute(executor)
        .await
        .map_err(|e| DomainError::database(format!("Failed to delete subscriptions: {}", e)))?;
    Ok(result.rows_affected())
}

fn not_found(id: &SubscriptionId) -> DomainError {
    DomainError::new(
        ErrorCode::SubscriptionNotFound,
        format!("Subscription not found: {}", id),
    )
}

/// PostgreSQL implementation of SubscriptionRepository.
#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, name, price, currency, frequency, category,
                payment_method, start_date, renewal_date, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(subscription.id().as_uuid())
        .bind(subscription.user_id().as_uuid())
        .bind(subscription.name().as_str())
        .bind(subscription.price().amount())
        .bind(subscription.currency().as_str())
        .bind(subscription.frequency().as_str())
        .bind(subscription.category().as_str())
        .bind(subscription.payment_method().as_str())
        .bind(subscription.start_date().as_datetime())
        .bind(subscription.renewal_date().as_datetime())
        .bind(subscription.status().as_str())
        .bind(subscription.created_at().as_datetime())
        .bind(subscription.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("subscriptions_user_id_fkey") {
                    return DomainError::new(ErrorCode::UserNotFound, "User not found")
                        .with_detail("user_id", subscription.user_id().to_string());
                }
            }
            DomainError::database(format!("Failed to insert subscription: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            r#"
            UPDATE subscriptions AS s SET
                name = $2,
                price = $3,
                currency = $4,
                frequency = $5,
                category = $6,
                payment_method = $7,
                start_date = $8,
                renewal_date = $9,
                updated_at = $10
            WHERE s.id = $1
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(subscription.id().as_uuid())
        .bind(subscription.name().as_str())
        .bind(subscription.price().amount())
        .bind(subscription.currency().as_str())
        .bind(subscription.frequency().as_str())
        .bind(subscription.category().as_str())
        .bind(subscription.payment_method().as_str())
        .bind(subscription.start_date().as_datetime())
        .bind(subscription.renewal_date().as_datetime())
        .bind(subscription.updated_at().as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update subscription: {}", e)))?;

        row.map(Subscription::try_from)
            .transpose()?
            .ok_or_else(|| not_found(subscription.id()))
    }

    async fn mark_cancelled(
        &self,
        id: &SubscriptionId,
        cancelled_at: &Timestamp,
    ) -> Result<Subscription, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            r#"
            UPDATE subscriptions AS s SET status = 'cancelled', updated_at = $2
            WHERE s.id = $1 AND s.status = 'active'
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(cancelled_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to cancel subscription: {}", e)))?;

        if let Some(row) = row {
            return Subscription::try_from(row);
        }

        // Nothing matched: either the row is gone or it is no longer active
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM subscriptions WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to fetch subscription: {}", e))
                })?;

        Err(if exists {
            already_cancelled(id)
        } else {
            not_found(id)
        })
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions s WHERE s.id = $1",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch subscription: {}", e)))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions s WHERE s.user_id = $1 ORDER BY s.created_at DESC, s.id",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list subscriptions: {}", e)))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn list_all_with_owner(&self) -> Result<Vec<SubscriptionWithOwner>, DomainError> {
        let rows: Vec<SubscriptionWithOwnerRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, u.name AS owner_name, u.email AS owner_email
            FROM subscriptions s
            JOIN users u ON u.id = s.user_id
            ORDER BY s.created_at DESC, s.id
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list subscriptions: {}", e)))?;

        rows.into_iter().map(SubscriptionWithOwner::try_from).collect()
    }

    async fn find_renewing_within(
        &self,
        window: &RenewalWindow,
        owner: Option<&UserId>,
    ) -> Result<Vec<Subscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM subscriptions s
            WHERE s.status = 'active'
              AND s.renewal_date BETWEEN $1 AND $2
              AND ($3::uuid IS NULL OR s.user_id = $3)
            ORDER BY s.renewal_date ASC, s.id ASC
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(window.start.as_datetime())
        .bind(window.end.as_datetime())
        .bind(owner.map(|o| *o.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query renewals: {}", e)))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SubscriptionRow {
        let start = Utc::now() - chrono::Duration::days(3);
        SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Spotify".to_string(),
            price: 9.99,
            currency: "EUR".to_string(),
            frequency: "monthly".to_string(),
            category: "entertainment".to_string(),
            payment_method: "Debit".to_string(),
            start_date: start,
            renewal_date: start + chrono::Duration::days(30),
            status: "cancelled".to_string(),
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn row_converts_to_subscription() {
        let sub = Subscription::try_from(row()).unwrap();
        assert_eq!(sub.currency(), Currency::Eur);
        assert_eq!(sub.frequency(), Frequency::Monthly);
        assert_eq!(sub.category(), Category::Entertainment);
        assert_eq!(sub.status(), SubscriptionStatus::Cancelled);
        assert_eq!(sub.price().amount(), 9.99);
    }

    #[test]
    fn unknown_status_is_database_error() {
        let mut r = row();
        r.status = "paused".to_string();
        let err = Subscription::try_from(r).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn status_round_trips_through_column_text() {
        for status in [SubscriptionStatus::Active, SubscriptionStatus::Cancelled] {
            assert_eq!(parse_status(status.as_str()).unwrap(), status);
        }
    }
}
