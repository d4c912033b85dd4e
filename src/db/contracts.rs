use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::db::flatten_txn;
use crate::error::ApiError;
use crate::models::applications::{self, ApplicationStatus};
use crate::models::contracts::{
    self, ContractListQuery, ContractStatus, CreateContract, LegalVerification, PaymentStatus,
    PaymentType, UpdatePayment, VerifyLegalContract, derive_total_paid, status_after_delivery,
};
use crate::models::deliveries;

/// Insert a new contract offer (status `pending`, empty sub-records).
pub async fn insert_contract(
    db: &DatabaseConnection,
    company_id: Uuid,
    input: CreateContract,
) -> Result<contracts::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        crop_type: Set(input.crop_type),
        quantity: Set(input.quantity),
        unit: Set(input.unit.unwrap_or_else(|| "quintal".to_string())),
        agreed_price: Set(input.agreed_price),
        description: Set(input.description),
        terms: Set(input.terms.unwrap_or_default()),
        district: Set(input.location.district),
        state: Set(input.location.state),
        pincode: Set(input.location.pincode),
        start_date: Set(input.duration.start_date),
        end_date: Set(input.duration.end_date),
        selected_farmer_id: Set(None),
        legal_file: Set(None),
        legal_uploaded_at: Set(None),
        legal_verification_status: Set(LegalVerification::Pending),
        legal_verified_by: Set(None),
        legal_verified_at: Set(None),
        legal_remarks: Set(String::new()),
        advance_amount: Set(0.0),
        advance_status: Set(PaymentStatus::Pending),
        advance_paid_date: Set(None),
        final_amount: Set(0.0),
        final_status: Set(PaymentStatus::Pending),
        final_paid_date: Set(None),
        total_paid: Set(0.0),
        quantity_delivered: Set(0.0),
        status: Set(ContractStatus::Pending),
        is_active: Set(true),
        applications_count: Set(0),
        completed_at: Set(None),
        cancelled_at: Set(None),
        cancellation_reason: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_contract.insert(db).await
}

/// Listable contracts (`is_active` only), filtered and offset-paginated.
/// Returns the page plus the total row count for the filter.
pub async fn list_contracts(
    db: &DatabaseConnection,
    query: &ContractListQuery,
) -> Result<(Vec<contracts::Model>, u64), DbErr> {
    let mut find = contracts::Entity::find().filter(contracts::Column::IsActive.eq(true));

    if let Some(crop_type) = &query.crop_type {
        find = find.filter(contracts::Column::CropType.eq(crop_type));
    }
    if let Some(district) = &query.district {
        find = find.filter(contracts::Column::District.eq(district));
    }
    if let Some(state) = &query.state {
        find = find.filter(contracts::Column::State.eq(state));
    }
    if let Some(status) = query.status {
        find = find.filter(contracts::Column::Status.eq(status));
    }

    let paginator = find
        .order_by_desc(contracts::Column::CreatedAt)
        .paginate(db, query.limit());
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(query.page() - 1).await?;

    Ok((items, total))
}

/// Fetch a single contract by ID. Soft-deleted rows are intentionally still
/// reachable here; only the listing filters them.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// All contracts created by a company, newest first.
pub async fn get_company_contracts(
    db: &DatabaseConnection,
    company_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::CompanyId.eq(company_id))
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Delivery entries for a contract, oldest first.
pub async fn get_deliveries(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<deliveries::Model>, DbErr> {
    deliveries::Entity::find()
        .filter(deliveries::Column::ContractId.eq(contract_id))
        .order_by_asc(deliveries::Column::Date)
        .all(db)
        .await
}

/// The selection transaction: accept one application, reject the rest, and
/// record the farmer on the contract — atomically. Readers never observe a
/// contract with a selected farmer whose application is not yet accepted.
pub async fn select_farmer(
    db: &DatabaseConnection,
    contract_id: Uuid,
    application_id: Uuid,
    company_id: Uuid,
) -> Result<(contracts::Model, applications::Model), ApiError> {
    let result = db
        .transaction::<_, (contracts::Model, applications::Model), ApiError>(move |txn| {
            Box::pin(async move {
                let contract = contracts::Entity::find_by_id(contract_id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

                if contract.company_id != company_id {
                    return Err(ApiError::Forbidden(
                        "Only the contract owner can select a farmer".into(),
                    ));
                }
                if contract.selected_farmer_id.is_some() {
                    return Err(ApiError::Conflict(
                        "A farmer has already been selected for this contract".into(),
                    ));
                }

                let application = applications::Entity::find_by_id(application_id)
                    .one(txn)
                    .await?
                    .filter(|a| a.contract_id == contract_id)
                    .ok_or_else(|| ApiError::not_found("Application", application_id))?;

                let now = chrono::Utc::now();
                let farmer_id = application.farmer_id;

                let status = contract.status;
                let mut contract_active: contracts::ActiveModel = contract.into();
                contract_active.selected_farmer_id = Set(Some(farmer_id));
                // Status only ever moves forward; a manually advanced contract
                // keeps its further-along status.
                if status.can_transition(ContractStatus::Approved) {
                    contract_active.status = Set(ContractStatus::Approved);
                }
                contract_active.updated_at = Set(now);
                let contract = contract_active.update(txn).await?;

                let mut app_active: applications::ActiveModel = application.into();
                app_active.status = Set(ApplicationStatus::Accepted);
                app_active.accepted_at = Set(Some(now));
                let application = app_active.update(txn).await?;

                // Bulk-reject every sibling that is not already rejected.
                applications::Entity::update_many()
                    .filter(applications::Column::ContractId.eq(contract_id))
                    .filter(applications::Column::Id.ne(application_id))
                    .filter(applications::Column::Status.ne(ApplicationStatus::Rejected))
                    .col_expr(
                        applications::Column::Status,
                        Expr::value(ApplicationStatus::Rejected),
                    )
                    .col_expr(applications::Column::RejectedAt, Expr::value(now))
                    .col_expr(
                        applications::Column::CompanyRemarks,
                        Expr::value("Another farmer was selected"),
                    )
                    .exec(txn)
                    .await?;

                Ok((contract, application))
            })
        })
        .await;

    flatten_txn(result)
}

/// Mutate one payment slot and re-derive `total_paid` from the slots now
/// marked paid. The lock keeps concurrent slot updates from clobbering the
/// derived total.
pub async fn update_payment(
    db: &DatabaseConnection,
    contract_id: Uuid,
    company_id: Uuid,
    input: UpdatePayment,
) -> Result<contracts::Model, ApiError> {
    let result = db
        .transaction::<_, contracts::Model, ApiError>(move |txn| {
            Box::pin(async move {
                let contract = contracts::Entity::find_by_id(contract_id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

                if contract.company_id != company_id {
                    return Err(ApiError::Forbidden(
                        "Only the contract owner can update payments".into(),
                    ));
                }

                let now = chrono::Utc::now();
                let (mut advance_amount, mut advance_status) =
                    (contract.advance_amount, contract.advance_status);
                let (mut final_amount, mut final_status) =
                    (contract.final_amount, contract.final_status);

                let mut active: contracts::ActiveModel = contract.into();
                match input.payment_type {
                    PaymentType::Advance => {
                        advance_amount = input.amount;
                        advance_status = input.status;
                        active.advance_amount = Set(input.amount);
                        active.advance_status = Set(input.status);
                        if input.status == PaymentStatus::Paid {
                            active.advance_paid_date = Set(Some(now));
                        }
                    }
                    PaymentType::Final => {
                        final_amount = input.amount;
                        final_status = input.status;
                        active.final_amount = Set(input.amount);
                        active.final_status = Set(input.status);
                        if input.status == PaymentStatus::Paid {
                            active.final_paid_date = Set(Some(now));
                        }
                    }
                }
                active.total_paid = Set(derive_total_paid(
                    advance_amount,
                    advance_status,
                    final_amount,
                    final_status,
                ));
                active.updated_at = Set(now);

                Ok(active.update(txn).await?)
            })
        })
        .await;

    flatten_txn(result)
}

/// Append a delivery entry and advance the running total, deriving the
/// contract status. The only automatic path to `completed`.
pub async fn add_delivery(
    db: &DatabaseConnection,
    contract_id: Uuid,
    quantity: f64,
    notes: String,
) -> Result<(contracts::Model, deliveries::Model), ApiError> {
    let result = db
        .transaction::<_, (contracts::Model, deliveries::Model), ApiError>(move |txn| {
            Box::pin(async move {
                let contract = contracts::Entity::find_by_id(contract_id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

                if contract.status.is_terminal() {
                    return Err(ApiError::Conflict(format!(
                        "Contract is {:?} and no longer accepts deliveries",
                        contract.status
                    )));
                }

                let delivered = contract.quantity_delivered + quantity;
                if delivered > contract.quantity {
                    return Err(ApiError::Conflict(format!(
                        "Delivery of {quantity} exceeds the remaining quantity of {}",
                        contract.quantity - contract.quantity_delivered
                    )));
                }

                let now = chrono::Utc::now();
                let entry = deliveries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    contract_id: Set(contract_id),
                    quantity: Set(quantity),
                    date: Set(now),
                    notes: Set(notes),
                }
                .insert(txn)
                .await?;

                let current = contract.status;
                let next = status_after_delivery(delivered, contract.quantity);

                let mut active: contracts::ActiveModel = contract.into();
                active.quantity_delivered = Set(delivered);
                if next != current && current.can_transition(next) {
                    active.status = Set(next);
                    if next == ContractStatus::Completed {
                        active.completed_at = Set(Some(now));
                    }
                }
                active.updated_at = Set(now);
                let contract = active.update(txn).await?;

                Ok((contract, entry))
            })
        })
        .await;

    flatten_txn(result)
}

/// Explicit status change through the transition table. Stamps terminal
/// metadata on entry into `completed` / `cancelled`.
pub async fn transition_status(
    db: &DatabaseConnection,
    contract_id: Uuid,
    next: ContractStatus,
    cancellation_reason: Option<String>,
) -> Result<contracts::Model, ApiError> {
    let contract = contracts::Entity::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

    if !contract.status.can_transition(next) {
        return Err(ApiError::Conflict(format!(
            "Cannot move contract from {:?} to {:?}",
            contract.status, next
        )));
    }

    let now = chrono::Utc::now();
    let mut active: contracts::ActiveModel = contract.into();
    active.status = Set(next);
    match next {
        ContractStatus::Completed => {
            active.completed_at = Set(Some(now));
        }
        ContractStatus::Cancelled => {
            active.cancelled_at = Set(Some(now));
            active.cancellation_reason = Set(cancellation_reason.unwrap_or_default());
        }
        _ => {}
    }
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}

/// Record the uploaded legal document reference. Requires a selected farmer;
/// re-uploading resets the verification verdict to pending.
pub async fn set_legal_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
    company_id: Uuid,
    file_ref: String,
) -> Result<contracts::Model, ApiError> {
    let contract = contracts::Entity::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

    if contract.company_id != company_id {
        return Err(ApiError::Forbidden(
            "Only the contract owner can upload the legal contract".into(),
        ));
    }
    if contract.selected_farmer_id.is_none() {
        return Err(ApiError::Conflict(
            "Select a farmer before uploading the legal contract".into(),
        ));
    }

    let now = chrono::Utc::now();
    let mut active: contracts::ActiveModel = contract.into();
    active.legal_file = Set(Some(file_ref));
    active.legal_uploaded_at = Set(Some(now));
    active.legal_verification_status = Set(LegalVerification::Pending);
    active.legal_verified_by = Set(None);
    active.legal_verified_at = Set(None);
    active.legal_remarks = Set(String::new());
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}

/// Admin verdict on the uploaded document. Never touches the parent
/// contract's lifecycle status.
pub async fn verify_legal_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
    admin_id: Uuid,
    input: VerifyLegalContract,
) -> Result<contracts::Model, ApiError> {
    if !matches!(
        input.status,
        LegalVerification::Verified | LegalVerification::Rejected
    ) {
        return Err(ApiError::Validation(
            "Invalid status. Must be verified or rejected".into(),
        ));
    }

    let contract = contracts::Entity::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;

    if contract.legal_file.is_none() {
        return Err(ApiError::Conflict(
            "No legal contract file uploaded".into(),
        ));
    }

    let now = chrono::Utc::now();
    let mut active: contracts::ActiveModel = contract.into();
    active.legal_verification_status = Set(input.status);
    active.legal_verified_by = Set(Some(admin_id));
    active.legal_verified_at = Set(Some(now));
    active.legal_remarks = Set(input.remarks.unwrap_or_default());
    active.updated_at = Set(now);

    Ok(active.update(db).await?)
}
