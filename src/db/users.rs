use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::users::{self, BlockUser, Role, VerificationStatus, VerifyCompany};

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Company accounts awaiting admin verification, newest first.
pub async fn get_pending_companies(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(Role::Company))
        .filter(users::Column::VerificationStatus.eq(VerificationStatus::Pending))
        .order_by_desc(users::Column::CreatedAt)
        .all(db)
        .await
}

/// All company accounts, newest first.
pub async fn get_all_companies(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(Role::Company))
        .order_by_desc(users::Column::CreatedAt)
        .all(db)
        .await
}

/// Admin decision on a company account. Only `verified` and `rejected` are
/// legal verdicts here; `blocked` goes through `block_user`.
pub async fn verify_company(
    db: &DatabaseConnection,
    company_id: Uuid,
    admin_id: Uuid,
    input: VerifyCompany,
) -> Result<users::Model, ApiError> {
    if !matches!(
        input.status,
        VerificationStatus::Verified | VerificationStatus::Rejected
    ) {
        return Err(ApiError::Validation(
            "Invalid status. Must be verified or rejected".into(),
        ));
    }

    let company = users::Entity::find_by_id(company_id)
        .filter(users::Column::Role.eq(Role::Company))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Company", company_id))?;

    let mut active: users::ActiveModel = company.into();
    active.verification_status = Set(input.status);
    active.verification_remarks = Set(input.remarks.unwrap_or_default());
    active.verified_by = Set(Some(admin_id));
    active.verified_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Deactivate an account. Admin accounts cannot be blocked.
pub async fn block_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: BlockUser,
) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user_id))?;

    if user.role == Role::Admin {
        return Err(ApiError::Forbidden("Cannot block admin users".into()));
    }

    let mut active: users::ActiveModel = user.into();
    active.is_active = Set(false);
    active.verification_status = Set(VerificationStatus::Blocked);
    active.verification_remarks = Set(input.reason.unwrap_or_else(|| "Blocked by admin".into()));

    Ok(active.update(db).await?)
}

/// Reactivate an account. Companies return straight to `verified`.
pub async fn unblock_user(db: &DatabaseConnection, user_id: Uuid) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user_id))?;

    let role = user.role;
    let mut active: users::ActiveModel = user.into();
    active.is_active = Set(true);
    if role == Role::Company {
        active.verification_status = Set(VerificationStatus::Verified);
    }
    active.verification_remarks = Set(String::new());

    Ok(active.update(db).await?)
}
