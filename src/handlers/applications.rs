use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_contract_owner, require_role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::contracts as contract_db;
use crate::error::ApiError;
use crate::models::applications::{ApplyToContract, UpdateApplicationStatus};
use crate::models::users::Role;

/// POST /api/contracts/{id}/apply — a farmer bids on an open contract.
/// One application per farmer per contract.
pub async fn apply_to_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ApplyToContract>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Farmer])?;

    let input = body.into_inner();
    input.validate().map_err(ApiError::Validation)?;

    let application =
        application_db::insert_application(db.get_ref(), path.into_inner(), user.0.id, input)
            .await?;
    tracing::info!(
        application_id = %application.id,
        contract_id = %application.contract_id,
        "application submitted"
    );

    Ok(HttpResponse::Created().json(application))
}

/// GET /api/contracts/{id}/applications — the owning company reviews all
/// bids, each with the applicant's public profile.
pub async fn list_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;

    let contract_id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))?;
    require_contract_owner(&contract, &user.0)?;

    let applications = application_db::list_for_contract(db.get_ref(), contract_id).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// GET /api/contracts/applications/my-applications — a farmer's own bids.
pub async fn my_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Farmer])?;

    let applications = application_db::list_for_farmer(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// PUT /api/contracts/{contract_id}/applications/{application_id}/select —
/// the selection transaction: accept one bid, bulk-reject the rest, record
/// the farmer on the contract. Fails with Conflict once a farmer is chosen.
pub async fn select_farmer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;

    let (contract_id, application_id) = path.into_inner();
    let (contract, application) =
        contract_db::select_farmer(db.get_ref(), contract_id, application_id, user.0.id).await?;
    tracing::info!(
        contract_id = %contract.id,
        farmer_id = %application.farmer_id,
        "farmer selected"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "contract": contract,
        "application": application,
    })))
}

/// PUT /api/contracts/applications/{id}/status — legacy single-application
/// decision without the bulk reject. Refused once a farmer has been selected.
pub async fn update_application_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateApplicationStatus>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Company])?;

    let application = application_db::update_status(
        db.get_ref(),
        path.into_inner(),
        user.0.id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(application))
}
