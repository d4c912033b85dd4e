use sea_orm::prelude::Expr;
use sea_orm::ExprTrait;
use sea_orm::*;
use uuid::Uuid;

use crate::db::flatten_txn;
use crate::error::ApiError;
use crate::models::applications::{
    self, ApplicationStatus, ApplicationWithContract, ApplicationWithFarmer, ApplyToContract,
    ContractSummary, UpdateApplicationStatus,
};
use crate::models::contracts::{self, ContractStatus};
use crate::models::users::FarmerProfile;

/// Create a farmer's application and bump the contract's application counter
/// with an atomic SQL increment, in one transaction. The (contract, farmer)
/// unique index backs the duplicate pre-check.
pub async fn insert_application(
    db: &DatabaseConnection,
    contract_id: Uuid,
    farmer_id: Uuid,
    input: ApplyToContract,
) -> Result<applications::Model, ApiError> {
    let result = db
        .transaction::<_, applications::Model, ApiError>(move |txn| {
            Box::pin(async move {
                let contract = contracts::Entity::find_by_id(contract_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

                if !contract.open_for_applications() {
                    return Err(ApiError::Conflict(
                        "Contract is not available for applications".into(),
                    ));
                }

                let duplicate = applications::Entity::find()
                    .filter(applications::Column::ContractId.eq(contract_id))
                    .filter(applications::Column::FarmerId.eq(farmer_id))
                    .one(txn)
                    .await?;
                if duplicate.is_some() {
                    return Err(ApiError::Conflict(
                        "You have already applied to this contract".into(),
                    ));
                }

                let application = applications::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    contract_id: Set(contract_id),
                    farmer_id: Set(farmer_id),
                    proposed_quantity: Set(input.proposed_quantity),
                    village: Set(input.village),
                    district: Set(input.district),
                    state: Set(input.state),
                    message: Set(input.message.unwrap_or_default()),
                    experience: Set(input.experience.unwrap_or_default()),
                    status: Set(ApplicationStatus::Pending),
                    company_remarks: Set(String::new()),
                    accepted_at: Set(None),
                    rejected_at: Set(None),
                    created_at: Set(chrono::Utc::now()),
                }
                .insert(txn)
                .await
                .map_err(|e| match e.sql_err() {
                    // Two concurrent applications from the same farmer: the
                    // unique index catches what the pre-check raced past.
                    Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::Conflict(
                        "You have already applied to this contract".into(),
                    ),
                    _ => ApiError::Database(e),
                })?;

                // count = count + 1 at the storage layer, never read-modify-write.
                contracts::Entity::update_many()
                    .filter(contracts::Column::Id.eq(contract_id))
                    .col_expr(
                        contracts::Column::ApplicationsCount,
                        Expr::col(contracts::Column::ApplicationsCount).add(1),
                    )
                    .exec(txn)
                    .await?;

                Ok(application)
            })
        })
        .await;

    flatten_txn(result)
}

/// All applications on a contract, newest first, each with the applicant's
/// public profile. Ownership is checked by the caller.
pub async fn list_for_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<ApplicationWithFarmer>, DbErr> {
    let rows = applications::Entity::find()
        .filter(applications::Column::ContractId.eq(contract_id))
        .find_also_related(crate::models::users::Entity)
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(application, farmer)| ApplicationWithFarmer {
            application,
            farmer: farmer.map(FarmerProfile::from),
        })
        .collect())
}

/// A farmer's own applications, newest first, each with a contract summary.
pub async fn list_for_farmer(
    db: &DatabaseConnection,
    farmer_id: Uuid,
) -> Result<Vec<ApplicationWithContract>, DbErr> {
    let rows = applications::Entity::find()
        .filter(applications::Column::FarmerId.eq(farmer_id))
        .find_also_related(contracts::Entity)
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(application, contract)| ApplicationWithContract {
            application,
            contract: contract.map(ContractSummary::from),
        })
        .collect())
}

/// Legacy single-application decision: accept or reject one application with
/// no bulk side effect. Refused outright once the selection transaction has
/// run, so the two paths cannot disagree about the chosen farmer.
pub async fn update_status(
    db: &DatabaseConnection,
    application_id: Uuid,
    company_id: Uuid,
    input: UpdateApplicationStatus,
) -> Result<applications::Model, ApiError> {
    if !matches!(
        input.status,
        ApplicationStatus::Accepted | ApplicationStatus::Rejected
    ) {
        return Err(ApiError::Validation(
            "Invalid status. Must be accepted or rejected".into(),
        ));
    }

    let result = db
        .transaction::<_, applications::Model, ApiError>(move |txn| {
            Box::pin(async move {
                let application = applications::Entity::find_by_id(application_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Application", application_id))?;

                let contract = contracts::Entity::find_by_id(application.contract_id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Contract", application.contract_id))?;

                if contract.company_id != company_id {
                    return Err(ApiError::Forbidden(
                        "Only the contract owner can decide applications".into(),
                    ));
                }
                if contract.selected_farmer_id.is_some() {
                    return Err(ApiError::Conflict(
                        "A farmer has already been selected for this contract".into(),
                    ));
                }

                let now = chrono::Utc::now();
                let farmer_id = application.farmer_id;

                let mut app_active: applications::ActiveModel = application.into();
                app_active.status = Set(input.status);
                app_active.company_remarks = Set(input.company_remarks.unwrap_or_default());
                match input.status {
                    ApplicationStatus::Accepted => {
                        app_active.accepted_at = Set(Some(now));
                    }
                    _ => {
                        app_active.rejected_at = Set(Some(now));
                    }
                }
                let application = app_active.update(txn).await?;

                if input.status == ApplicationStatus::Accepted {
                    let status = contract.status;
                    let mut contract_active: contracts::ActiveModel = contract.into();
                    contract_active.selected_farmer_id = Set(Some(farmer_id));
                    if status.can_transition(ContractStatus::Active) {
                        contract_active.status = Set(ContractStatus::Active);
                    }
                    contract_active.updated_at = Set(now);
                    contract_active.update(txn).await?;
                }

                Ok(application)
            })
        })
        .await;

    flatten_txn(result)
}
