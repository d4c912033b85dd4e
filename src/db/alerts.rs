use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::alerts::{self, AlertListQuery, CreateAlert};

/// Publish an advisory. The payload variant determines the `kind` column.
pub async fn insert_alert(
    db: &DatabaseConnection,
    created_by: Uuid,
    input: CreateAlert,
) -> Result<alerts::Model, ApiError> {
    let payload = serde_json::to_value(&input.payload)
        .map_err(|e| ApiError::Validation(format!("Invalid alert payload: {e}")))?;

    let new_alert = alerts::ActiveModel {
        id: Set(Uuid::new_v4()),
        kind: Set(input.payload.kind()),
        payload: Set(payload),
        is_active: Set(true),
        expires_at: Set(input.expires_at),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_alert.insert(db).await?)
}

/// Active advisories, optionally narrowed by kind, newest first. Expired
/// alerts are filtered out at read time.
pub async fn list_active(
    db: &DatabaseConnection,
    query: &AlertListQuery,
) -> Result<Vec<alerts::Model>, DbErr> {
    let mut find = alerts::Entity::find().filter(alerts::Column::IsActive.eq(true));
    if let Some(kind) = query.kind {
        find = find.filter(alerts::Column::Kind.eq(kind));
    }

    let now = chrono::Utc::now();
    find.filter(
        Condition::any()
            .add(alerts::Column::ExpiresAt.is_null())
            .add(alerts::Column::ExpiresAt.gt(now)),
    )
    .order_by_desc(alerts::Column::CreatedAt)
    .all(db)
    .await
}
