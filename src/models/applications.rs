use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `contract_applications` table. A unique index on
/// (contract_id, farmer_id) backs the one-application-per-farmer rule.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub farmer_id: Uuid,
    pub proposed_quantity: f64,
    // Farmer location override for this application
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Text")]
    pub experience: String,
    pub status: ApplicationStatus,
    pub company_remarks: String,
    pub accepted_at: Option<DateTimeUtc>,
    pub rejected_at: Option<DateTimeUtc>,
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
        from = "Column::FarmerId",
        to = "super::users::Column::Id"
    )]
    Farmer,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farmer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyToContract {
    pub proposed_quantity: f64,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub message: Option<String>,
    pub experience: Option<String>,
}

impl ApplyToContract {
    pub fn validate(&self) -> Result<(), String> {
        if self.proposed_quantity <= 0.0 {
            return Err("proposedQuantity must be positive".into());
        }
        Ok(())
    }
}

/// Legacy single-application decision (no bulk reject). Refused once the
/// contract has a selected farmer.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateApplicationStatus {
    pub status: ApplicationStatus,
    pub company_remarks: Option<String>,
}

/// Application enriched with the applicant's public profile, returned to the
/// owning company.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithFarmer {
    #[serde(flatten)]
    pub application: Model,
    pub farmer: Option<super::users::FarmerProfile>,
}

/// Application enriched with a contract summary, returned to the farmer.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithContract {
    #[serde(flatten)]
    pub application: Model,
    pub contract: Option<ContractSummary>,
}

/// The subset of contract fields a farmer sees alongside their application.
#[derive(Debug, Clone, Serialize)]
pub struct ContractSummary {
    pub id: Uuid,
    pub crop_type: String,
    pub quantity: f64,
    pub unit: String,
    pub agreed_price: f64,
    pub status: super::contracts::ContractStatus,
    pub district: String,
    pub state: String,
}

impl From<super::contracts::Model> for ContractSummary {
    fn from(c: super::contracts::Model) -> Self {
        Self {
            id: c.id,
            crop_type: c.crop_type,
            quantity: c.quantity,
            unit: c.unit,
            agreed_price: c.agreed_price,
            status: c.status,
            district: c.district,
            state: c.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_requires_positive_quantity() {
        let mut input = ApplyToContract {
            proposed_quantity: 80.0,
            village: None,
            district: None,
            state: None,
            message: None,
            experience: None,
        };
        assert!(input.validate().is_ok());

        input.proposed_quantity = 0.0;
        assert!(input.validate().is_err());

        input.proposed_quantity = -5.0;
        assert!(input.validate().is_err());
    }
}
