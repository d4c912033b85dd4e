use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::applications::ContractSummary;
use crate::models::contracts;
use crate::models::disputes::{
    self, DisputeListQuery, DisputeWithContract, RaiseDispute, RaisedByRole, UpdateDisputeStatus,
    stamp_once,
};

/// Create a dispute (status `open`, default priority `medium`). Party checks
/// happen in the handler before this runs.
pub async fn insert_dispute(
    db: &DatabaseConnection,
    raised_by: Uuid,
    raised_by_role: RaisedByRole,
    input: RaiseDispute,
) -> Result<disputes::Model, DbErr> {
    let new_dispute = disputes::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(input.contract_id),
        raised_by: Set(raised_by),
        raised_by_role: Set(raised_by_role),
        subject: Set(input.subject),
        message: Set(input.message),
        status: Set(disputes::DisputeStatus::Open),
        priority: Set(input.priority.unwrap_or(disputes::DisputePriority::Medium)),
        admin_remarks: Set(String::new()),
        action_taken: Set(String::new()),
        assigned_to: Set(None),
        resolved_at: Set(None),
        closed_at: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    new_dispute.insert(db).await
}

/// Fetch a single dispute by ID.
pub async fn get_dispute_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<disputes::Model>, DbErr> {
    disputes::Entity::find_by_id(id).one(db).await
}

/// All disputes (admin view), optionally filtered, newest first, with a
/// contract summary per row.
pub async fn list_all(
    db: &DatabaseConnection,
    query: &DisputeListQuery,
) -> Result<Vec<DisputeWithContract>, DbErr> {
    let mut find = disputes::Entity::find();
    if let Some(status) = query.status {
        find = find.filter(disputes::Column::Status.eq(status));
    }
    if let Some(priority) = query.priority {
        find = find.filter(disputes::Column::Priority.eq(priority));
    }

    let rows = find
        .find_also_related(contracts::Entity)
        .order_by_desc(disputes::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(dispute, contract)| DisputeWithContract {
            dispute,
            contract: contract.map(ContractSummary::from),
        })
        .collect())
}

/// Disputes raised by one actor, newest first.
pub async fn list_for_raiser(
    db: &DatabaseConnection,
    raised_by: Uuid,
) -> Result<Vec<DisputeWithContract>, DbErr> {
    let rows = disputes::Entity::find()
        .filter(disputes::Column::RaisedBy.eq(raised_by))
        .find_also_related(contracts::Entity)
        .order_by_desc(disputes::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(dispute, contract)| DisputeWithContract {
            dispute,
            contract: contract.map(ContractSummary::from),
        })
        .collect())
}

/// Admin triage: move the dispute, assign the acting admin, merge remarks.
/// `resolved_at`/`closed_at` stamp on first entry into their state and are
/// never overwritten by a repeat transition.
pub async fn update_status(
    db: &DatabaseConnection,
    dispute_id: Uuid,
    admin_id: Uuid,
    input: UpdateDisputeStatus,
) -> Result<disputes::Model, ApiError> {
    let dispute = disputes::Entity::find_by_id(dispute_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Dispute", dispute_id))?;

    let now = chrono::Utc::now();
    let (resolved_at, closed_at) = (dispute.resolved_at, dispute.closed_at);

    let mut active: disputes::ActiveModel = dispute.into();
    active.status = Set(input.status);
    if let Some(remarks) = input.admin_remarks {
        active.admin_remarks = Set(remarks);
    }
    if let Some(action) = input.action_taken {
        active.action_taken = Set(action);
    }
    active.assigned_to = Set(Some(admin_id));

    match input.status {
        disputes::DisputeStatus::Resolved => {
            active.resolved_at = Set(Some(stamp_once(resolved_at, now)));
        }
        disputes::DisputeStatus::Closed => {
            active.closed_at = Set(Some(stamp_once(closed_at, now)));
        }
        _ => {}
    }

    Ok(active.update(db).await?)
}
