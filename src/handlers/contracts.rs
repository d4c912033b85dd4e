use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_contract_owner, require_contract_party, require_role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::error::ApiError;
use crate::models::Paginated;
use crate::models::contracts::{
    AddDelivery, CancelContract, ContractDetail, ContractListQuery, ContractStatus, CreateContract,
    UpdateContractStatus, UpdatePayment, VerifyLegalContract,
};
use crate::models::users::Role;
use crate::storage::BlobStore;

/// POST /api/contracts — a verified company publishes a contract offer.
pub async fn create_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContract>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;

    let input = body.into_inner();
    input.validate().map_err(ApiError::Validation)?;

    let contract = contract_db::insert_contract(db.get_ref(), user.0.id, input).await?;
    tracing::info!(contract_id = %contract.id, company_id = %user.0.id, "contract created");

    Ok(HttpResponse::Created().json(contract))
}

/// GET /api/contracts — browse live contracts, filtered and paginated.
pub async fn list_contracts(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ContractListQuery>,
) -> Result<HttpResponse, ApiError> {
    let (items, total) = contract_db::list_contracts(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(Paginated::new(items, total, query.page(), query.limit())))
}

/// GET /api/contracts/{id} — full contract view with delivery entries.
/// Soft-deleted contracts are still reachable by id.
pub async fn get_contract(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", id))?;
    let deliveries = contract_db::get_deliveries(db.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(ContractDetail {
        contract,
        deliveries,
    }))
}

/// GET /api/contracts/my-contracts — the company's own offers.
pub async fn my_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;
    let contracts = contract_db::get_company_contracts(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(contracts))
}

/// PUT /api/contracts/{id}/payment — company records an advance or final
/// payment; `total_paid` is re-derived from the paid slots.
pub async fn update_payment(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePayment>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;

    let input = body.into_inner();
    if input.amount < 0.0 {
        return Err(ApiError::Validation("amount must not be negative".into()));
    }

    let contract =
        contract_db::update_payment(db.get_ref(), path.into_inner(), user.0.id, input).await?;
    Ok(HttpResponse::Ok().json(contract))
}

/// POST /api/contracts/{id}/delivery — either contracting party appends a
/// delivery entry; status derives from the running total.
pub async fn add_delivery(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<AddDelivery>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company, Role::Farmer])?;

    let contract_id = path.into_inner();
    let input = body.into_inner();
    if input.quantity <= 0.0 {
        return Err(ApiError::Validation("quantity must be positive".into()));
    }

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;
    require_contract_party(&contract, &user.0)?;

    let (contract, delivery) = contract_db::add_delivery(
        db.get_ref(),
        contract_id,
        input.quantity,
        input.notes.unwrap_or_default(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "contract": contract,
        "delivery": delivery,
    })))
}

/// PUT /api/contracts/{id}/mark-in-progress — manual override by a party.
pub async fn mark_in_progress(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    mark_status(user, db, path.into_inner(), ContractStatus::InProgress).await
}

/// PUT /api/contracts/{id}/mark-completed — manual override by a party; does
/// not validate delivered quantities.
pub async fn mark_completed(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    mark_status(user, db, path.into_inner(), ContractStatus::Completed).await
}

async fn mark_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    contract_id: Uuid,
    next: ContractStatus,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company, Role::Farmer])?;

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;
    require_contract_party(&contract, &user.0)?;

    let contract = contract_db::transition_status(db.get_ref(), contract_id, next, None).await?;
    Ok(HttpResponse::Ok().json(contract))
}

/// PUT /api/contracts/{id}/cancel — owning company or an admin cancels from
/// any non-terminal state. Applications and disputes stay as history.
pub async fn cancel_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CancelContract>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company, Role::Admin])?;

    let contract_id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;
    if user.0.role != Role::Admin {
        require_contract_owner(&contract, &user.0)?;
    }

    let contract = contract_db::transition_status(
        db.get_ref(),
        contract_id,
        ContractStatus::Cancelled,
        Some(body.into_inner().reason.unwrap_or_default()),
    )
    .await?;
    tracing::info!(contract_id = %contract.id, "contract cancelled");

    Ok(HttpResponse::Ok().json(contract))
}

/// PUT /api/contracts/{id}/status — admin override, still bound by the
/// transition table.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateContractStatus>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let next = body.into_inner().status;
    let contract =
        contract_db::transition_status(db.get_ref(), path.into_inner(), next, None).await?;
    Ok(HttpResponse::Ok().json(contract))
}

/// POST /api/contracts/{id}/upload-legal-contract — the owning company
/// uploads the binding PDF once a farmer has been selected. Re-uploading
/// resets the verification verdict.
pub async fn upload_legal_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    store: web::Data<BlobStore>,
    path: web::Path<Uuid>,
    payload: web::Bytes,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;

    let contract_id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;
    require_contract_owner(&contract, &user.0)?;
    if contract.selected_farmer_id.is_none() {
        return Err(ApiError::Conflict(
            "Select a farmer before uploading the legal contract".into(),
        ));
    }

    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let reference = store.store_pdf(&payload, content_type).await?;

    let contract =
        contract_db::set_legal_contract(db.get_ref(), contract_id, user.0.id, reference.clone())
            .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "contract": contract,
        "file_url": store.url_for(&reference),
    })))
}

/// PUT /api/contracts/{id}/verify-legal — admin verdict on the uploaded
/// document. The contract's own status is untouched.
pub async fn verify_legal_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<VerifyLegalContract>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let contract = contract_db::verify_legal_contract(
        db.get_ref(),
        path.into_inner(),
        user.0.id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(contract))
}
