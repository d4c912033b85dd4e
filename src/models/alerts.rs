use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Advisory kind stored as a lowercase string; the matching payload variant
/// lives in the `payload` JSON column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    #[sea_orm(string_value = "weather")]
    Weather,
    #[sea_orm(string_value = "mandi_price")]
    MandiPrice,
    #[sea_orm(string_value = "notification")]
    Notification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// One variant per alert kind, instead of a single record with mostly-null
/// fields. The serde tag mirrors the `kind` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertPayload {
    Weather {
        district: String,
        state: String,
        severity: AlertSeverity,
        message: String,
    },
    MandiPrice {
        crop: String,
        market: String,
        district: String,
        state: String,
        price: f64,
        unit: String,
    },
    Notification {
        title: String,
        message: String,
        target_role: Option<super::users::Role>,
        related_contract: Option<Uuid>,
    },
}

impl AlertPayload {
    pub fn kind(&self) -> AlertKind {
        match self {
            AlertPayload::Weather { .. } => AlertKind::Weather,
            AlertPayload::MandiPrice { .. } => AlertKind::MandiPrice,
            AlertPayload::Notification { .. } => AlertKind::Notification,
        }
    }
}

/// SeaORM entity for the `alerts` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: AlertKind,
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: Json,
    pub is_active: bool,
    pub expires_at: Option<DateTimeUtc>,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlert {
    #[serde(flatten)]
    pub payload: AlertPayload,
    pub expires_at: Option<DateTimeUtc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertListQuery {
    pub kind: Option<AlertKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_with_kind_tag() {
        let payload = AlertPayload::MandiPrice {
            crop: "onion".into(),
            market: "Lasalgaon".into(),
            district: "Nashik".into(),
            state: "Maharashtra".into(),
            price: 2400.0,
            unit: "quintal".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "mandi_price");

        let back: AlertPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.kind(), AlertKind::MandiPrice);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_value::<AlertPayload>(serde_json::json!({
            "kind": "horoscope",
            "message": "?",
        }));
        assert!(err.is_err());
    }
}
