use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_contract_party, require_role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::db::disputes as dispute_db;
use crate::error::ApiError;
use crate::models::applications::ContractSummary;
use crate::models::disputes::{
    DisputeListQuery, DisputeWithContract, RaiseDispute, RaisedByRole, UpdateDisputeStatus,
};
use crate::models::users::Role;

/// POST /api/disputes — a contracting party raises a dispute. Restricted to
/// the owning company or the selected farmer of the named contract.
pub async fn raise_dispute(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<RaiseDispute>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Farmer, Role::Company])?;

    let input = body.into_inner();
    input.validate().map_err(ApiError::Validation)?;

    let contract = contract_db::get_contract_by_id(db.get_ref(), input.contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", input.contract_id))?;
    require_contract_party(&contract, &user.0)?;

    let role = match user.0.role {
        Role::Farmer => RaisedByRole::Farmer,
        _ => RaisedByRole::Company,
    };

    let dispute = dispute_db::insert_dispute(db.get_ref(), user.0.id, role, input).await?;
    tracing::info!(dispute_id = %dispute.id, contract_id = %dispute.contract_id, "dispute raised");

    Ok(HttpResponse::Created().json(dispute))
}

/// GET /api/disputes — admin triage view, filterable by status/priority.
pub async fn list_disputes(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<DisputeListQuery>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let disputes = dispute_db::list_all(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(disputes))
}

/// GET /api/disputes/my-disputes — disputes the caller raised.
pub async fn my_disputes(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Farmer, Role::Company])?;

    let disputes = dispute_db::list_for_raiser(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(disputes))
}

/// GET /api/disputes/{id} — admins see everything; others only what they
/// raised.
pub async fn get_dispute(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let dispute = dispute_db::get_dispute_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("Dispute", id))?;

    if user.0.role != Role::Admin && dispute.raised_by != user.0.id {
        return Err(ApiError::Forbidden(
            "You can only view disputes you raised".into(),
        ));
    }

    let contract = contract_db::get_contract_by_id(db.get_ref(), dispute.contract_id).await?;
    Ok(HttpResponse::Ok().json(DisputeWithContract {
        dispute,
        contract: contract.map(ContractSummary::from),
    }))
}

/// PUT /api/disputes/{id}/status — admin triage: transition, assignment,
/// remarks. Resolution/closure timestamps stamp once.
pub async fn update_dispute_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDisputeStatus>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let dispute = dispute_db::update_status(
        db.get_ref(),
        path.into_inner(),
        user.0.id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(dispute))
}
