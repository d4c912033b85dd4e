use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract lifecycle status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl ContractStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ContractStatus::Completed | ContractStatus::Cancelled)
    }

    /// The single authoritative transition table. Forward-only along
    /// pending → approved → active → in_progress → completed; `cancelled` is
    /// reachable from every non-terminal state. Anything else is rejected.
    pub fn can_transition(self, next: ContractStatus) -> bool {
        use ContractStatus::*;
        matches!(
            (self, next),
            (Pending, Approved | Active | InProgress | Completed | Cancelled)
                | (Approved, Active | InProgress | Completed | Cancelled)
                | (Active, InProgress | Completed | Cancelled)
                | (InProgress, Completed | Cancelled)
        )
    }
}

/// Payment slot status for the advance and final payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Admin verdict on the uploaded legal document. Independent of the parent
/// contract's lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum LegalVerification {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `contracts` table. The legal, payment and delivery
/// sub-records of the aggregate are flattened into columns; individual
/// delivery entries live in the `deliveries` child table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub crop_type: String,
    pub quantity: f64,
    pub unit: String,
    pub agreed_price: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub terms: String,
    pub district: String,
    pub state: String,
    pub pincode: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    /// Set exactly once, by the selection transaction.
    pub selected_farmer_id: Option<Uuid>,
    // Legal document sub-record
    pub legal_file: Option<String>,
    pub legal_uploaded_at: Option<DateTimeUtc>,
    pub legal_verification_status: LegalVerification,
    pub legal_verified_by: Option<Uuid>,
    pub legal_verified_at: Option<DateTimeUtc>,
    pub legal_remarks: String,
    // Payment sub-record
    pub advance_amount: f64,
    pub advance_status: PaymentStatus,
    pub advance_paid_date: Option<DateTimeUtc>,
    pub final_amount: f64,
    pub final_status: PaymentStatus,
    pub final_paid_date: Option<DateTimeUtc>,
    /// Derived: sum of slot amounts currently `paid`. Recomputed on every
    /// payment update, never incremented.
    pub total_paid: f64,
    // Delivery sub-record
    pub quantity_delivered: f64,
    pub status: ContractStatus,
    pub is_active: bool,
    /// Monotonic: incremented on every application, never decremented.
    pub applications_count: i32,
    pub completed_at: Option<DateTimeUtc>,
    pub cancelled_at: Option<DateTimeUtc>,
    pub cancellation_reason: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CompanyId",
        to = "super::users::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::deliveries::Entity")]
    Deliveries,
    #[sea_orm(has_many = "super::disputes::Entity")]
    Disputes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::deliveries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliveries.def()
    }
}

impl Related<super::disputes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Disputes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A contract accepts farmer applications while it is live and not yet
    /// terminal. Selection does not close applications by itself.
    pub fn open_for_applications(&self) -> bool {
        self.is_active && !self.status.is_terminal()
    }
}

/// Sum of the payment slots currently marked `paid`. Call-order independent.
pub fn derive_total_paid(
    advance_amount: f64,
    advance_status: PaymentStatus,
    final_amount: f64,
    final_status: PaymentStatus,
) -> f64 {
    let mut total = 0.0;
    if advance_status == PaymentStatus::Paid {
        total += advance_amount;
    }
    if final_status == PaymentStatus::Paid {
        total += final_amount;
    }
    total
}

/// Status a contract lands in after a delivery brings the running total to
/// `delivered`: `completed` once the contracted quantity is reached, else
/// `in_progress`. The only automatic path to `completed`.
pub fn status_after_delivery(delivered: f64, contracted: f64) -> ContractStatus {
    if delivered >= contracted {
        ContractStatus::Completed
    } else {
        ContractStatus::InProgress
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct LocationInput {
    pub district: String,
    pub state: String,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DurationInput {
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub crop_type: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub agreed_price: f64,
    pub description: String,
    pub terms: Option<String>,
    pub location: LocationInput,
    pub duration: DurationInput,
}

impl CreateContract {
    pub fn validate(&self) -> Result<(), String> {
        if self.crop_type.trim().is_empty() {
            return Err("cropType is required".into());
        }
        if self.description.trim().is_empty() {
            return Err("description is required".into());
        }
        if self.location.district.trim().is_empty() || self.location.state.trim().is_empty() {
            return Err("location district and state are required".into());
        }
        if self.quantity <= 0.0 {
            return Err("quantity must be positive".into());
        }
        if self.agreed_price <= 0.0 {
            return Err("agreedPrice must be positive".into());
        }
        Ok(())
    }
}

/// Query params for GET /api/contracts.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractListQuery {
    pub crop_type: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub status: Option<ContractStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ContractListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }
}

/// Which payment slot an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Advance,
    Final,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePayment {
    pub payment_type: PaymentType,
    pub amount: f64,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddDelivery {
    pub quantity: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelContract {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContractStatus {
    pub status: ContractStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyLegalContract {
    pub status: LegalVerification,
    pub remarks: Option<String>,
}

/// Full contract view with its delivery entries, used by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ContractDetail {
    #[serde(flatten)]
    pub contract: Model,
    pub deliveries: Vec<super::deliveries::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_is_forward_only() {
        use ContractStatus::*;
        // The monotonic path.
        assert!(Pending.can_transition(Approved));
        assert!(Approved.can_transition(Active));
        assert!(Active.can_transition(InProgress));
        assert!(InProgress.can_transition(Completed));
        // Jumps forward are allowed (manual escape hatch).
        assert!(Pending.can_transition(Completed));
        assert!(Approved.can_transition(InProgress));
        // No reversals.
        assert!(!Approved.can_transition(Pending));
        assert!(!InProgress.can_transition(Active));
        assert!(!Completed.can_transition(InProgress));
        // Self-loops are not transitions.
        assert!(!InProgress.can_transition(InProgress));
    }

    #[test]
    fn cancelled_reachable_from_every_non_terminal_state() {
        use ContractStatus::*;
        for s in [Pending, Approved, Active, InProgress] {
            assert!(s.can_transition(Cancelled), "{s:?} should be cancellable");
        }
        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Cancelled));
    }

    #[test]
    fn terminal_states_admit_no_transitions() {
        use ContractStatus::*;
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Pending, Approved, Active, InProgress, Completed, Cancelled] {
                assert!(!terminal.can_transition(next));
            }
        }
    }

    #[test]
    fn total_paid_counts_only_paid_slots() {
        use PaymentStatus::*;
        assert_eq!(derive_total_paid(50_000.0, Pending, 150_000.0, Pending), 0.0);
        assert_eq!(
            derive_total_paid(50_000.0, Paid, 150_000.0, Pending),
            50_000.0
        );
        assert_eq!(
            derive_total_paid(50_000.0, Pending, 150_000.0, Paid),
            150_000.0
        );
        assert_eq!(derive_total_paid(50_000.0, Paid, 150_000.0, Paid), 200_000.0);
    }

    #[test]
    fn total_paid_is_recomputed_not_accumulated() {
        use PaymentStatus::*;
        // Re-running the derivation after an amount correction must reflect
        // the new amount, not add to a prior total.
        let first = derive_total_paid(60_000.0, Paid, 0.0, Pending);
        let corrected = derive_total_paid(50_000.0, Paid, 0.0, Pending);
        assert_eq!(first, 60_000.0);
        assert_eq!(corrected, 50_000.0);
    }

    #[test]
    fn delivery_derives_in_progress_until_quantity_reached() {
        assert_eq!(status_after_delivery(40.0, 100.0), ContractStatus::InProgress);
        assert_eq!(status_after_delivery(80.0, 100.0), ContractStatus::InProgress);
        assert_eq!(status_after_delivery(100.0, 100.0), ContractStatus::Completed);
        assert_eq!(status_after_delivery(120.0, 100.0), ContractStatus::Completed);
    }

    #[test]
    fn create_contract_validation() {
        let valid = CreateContract {
            crop_type: "wheat".into(),
            quantity: 100.0,
            unit: None,
            agreed_price: 2000.0,
            description: "Rabi season supply".into(),
            terms: None,
            location: LocationInput {
                district: "Nashik".into(),
                state: "Maharashtra".into(),
                pincode: None,
            },
            duration: DurationInput {
                start_date: Date::from_ymd_opt(2025, 11, 1).unwrap(),
                end_date: Date::from_ymd_opt(2026, 3, 31).unwrap(),
            },
        };
        assert!(valid.validate().is_ok());

        let mut zero_quantity = valid.clone();
        zero_quantity.quantity = 0.0;
        assert!(zero_quantity.validate().is_err());

        let mut negative_price = valid.clone();
        negative_price.agreed_price = -1.0;
        assert!(negative_price.validate().is_err());

        let mut blank_crop = valid.clone();
        blank_crop.crop_type = "  ".into();
        assert!(blank_crop.validate().is_err());
    }
}
