use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dispute triage status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum DisputePriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

/// Which side of the contract raised the dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RaisedByRole {
    #[sea_orm(string_value = "farmer")]
    Farmer,
    #[sea_orm(string_value = "company")]
    Company,
}

/// SeaORM entity for the `contract_disputes` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract_disputes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub raised_by: Uuid,
    pub raised_by_role: RaisedByRole,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: DisputeStatus,
    pub priority: DisputePriority,
    pub admin_remarks: String,
    pub action_taken: String,
    pub assigned_to: Option<Uuid>,
    pub resolved_at: Option<DateTimeUtc>,
    pub closed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RaisedBy",
        to = "super::users::Column::Id"
    )]
    Raiser,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Raiser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Resolution/closure timestamps are stamped on the first entry into their
/// state and never overwritten by a repeat transition.
pub fn stamp_once(existing: Option<DateTimeUtc>, now: DateTimeUtc) -> DateTimeUtc {
    existing.unwrap_or(now)
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct RaiseDispute {
    pub contract_id: Uuid,
    pub subject: String,
    pub message: String,
    pub priority: Option<DisputePriority>,
}

impl RaiseDispute {
    pub fn validate(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("subject is required".into());
        }
        if self.message.trim().is_empty() {
            return Err("message is required".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDisputeStatus {
    pub status: DisputeStatus,
    pub admin_remarks: Option<String>,
    pub action_taken: Option<String>,
}

/// Query params for the admin dispute listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DisputeListQuery {
    pub status: Option<DisputeStatus>,
    pub priority: Option<DisputePriority>,
}

/// Dispute enriched with a contract summary for list/detail views.
#[derive(Debug, Clone, Serialize)]
pub struct DisputeWithContract {
    #[serde(flatten)]
    pub dispute: Model,
    pub contract: Option<super::applications::ContractSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn resolution_timestamp_is_stamped_once() {
        let first = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

        // First entry into the state stamps the clock.
        let stamped = stamp_once(None, first);
        assert_eq!(stamped, first);

        // A repeat transition keeps the original timestamp.
        let restamped = stamp_once(Some(stamped), second);
        assert_eq!(restamped, first);
    }

    #[test]
    fn raise_dispute_requires_subject_and_message() {
        let mut input = RaiseDispute {
            contract_id: Uuid::new_v4(),
            subject: "Late delivery".into(),
            message: "Second instalment is a week overdue".into(),
            priority: None,
        };
        assert!(input.validate().is_ok());

        input.subject = "".into();
        assert!(input.validate().is_err());

        input.subject = "Late delivery".into();
        input.message = "   ".into();
        assert!(input.validate().is_err());
    }
}
