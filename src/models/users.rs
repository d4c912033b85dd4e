use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `Role` enum maps to a Postgres TEXT column stored as lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Role {
    #[sea_orm(string_value = "farmer")]
    Farmer,
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Company accounts start `pending` and may only create contracts once an
/// admin moves them to `verified`. Farmers and admins are created `verified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum VerificationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "blocked")]
    Blocked,
}

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub verification_remarks: String,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTimeUtc>,
    pub is_active: bool,
    // Farmer profile
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub land_size: Option<f64>,
    // Company profile
    pub company_name: Option<String>,
    pub registration_number: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Admin decision on a pending company account.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyCompany {
    pub status: VerificationStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockUser {
    pub reason: Option<String>,
}

/// A safe user representation for API responses (never leaks internal fields).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub is_active: bool,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            role: m.role,
            verification_status: m.verification_status,
            is_active: m.is_active,
            village: m.village,
            district: m.district,
            state: m.state,
            company_name: m.company_name,
            created_at: m.created_at,
        }
    }
}

/// Public farmer profile attached to application listings.
#[derive(Debug, Clone, Serialize)]
pub struct FarmerProfile {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub land_size: Option<f64>,
}

impl From<Model> for FarmerProfile {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            village: m.village,
            district: m.district,
            state: m.state,
            land_size: m.land_size,
        }
    }
}
