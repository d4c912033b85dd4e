use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{BlockUser, Role, UserResponse, VerifyCompany};

/// GET /api/users/me — the caller's own profile.
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}

/// GET /api/users/companies/pending — companies awaiting verification.
pub async fn pending_companies(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let companies = user_db::get_pending_companies(db.get_ref()).await?;
    let response: Vec<UserResponse> = companies.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/companies — all company accounts.
pub async fn all_companies(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let companies = user_db::get_all_companies(db.get_ref()).await?;
    let response: Vec<UserResponse> = companies.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/users/companies/{id}/verify — admin verdict that opens (or
/// closes) a company's right to create contracts.
pub async fn verify_company(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<VerifyCompany>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let company = user_db::verify_company(
        db.get_ref(),
        path.into_inner(),
        user.0.id,
        body.into_inner(),
    )
    .await?;
    tracing::info!(company_id = %company.id, status = ?company.verification_status, "company verification updated");

    Ok(HttpResponse::Ok().json(UserResponse::from(company)))
}

/// PUT /api/users/{id}/block — deactivate an account (never an admin's).
pub async fn block_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<BlockUser>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let blocked = user_db::block_user(db.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(blocked)))
}

/// PUT /api/users/{id}/unblock — reactivate an account.
pub async fn unblock_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let unblocked = user_db::unblock_user(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(unblocked)))
}
