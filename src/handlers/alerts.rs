use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::alerts as alert_db;
use crate::error::ApiError;
use crate::models::alerts::{AlertListQuery, CreateAlert};
use crate::models::users::Role;

/// POST /api/alerts — admin publishes an advisory (weather, mandi price, or
/// notification; the payload variant carries the kind).
pub async fn create_alert(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateAlert>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Admin])?;

    let alert = alert_db::insert_alert(db.get_ref(), user.0.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(alert))
}

/// GET /api/alerts — active, unexpired advisories, newest first.
pub async fn list_alerts(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<AlertListQuery>,
) -> Result<HttpResponse, ApiError> {
    let alerts = alert_db::list_active(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(alerts))
}
