use sea_orm::*;
use uuid::Uuid;

use crate::models::verification::{self, CreateVerificationRequest, Status};

/// Insert a new verification request (defaults to Pending status).
pub async fn insert_request(
    db: &DatabaseConnection,
    input: CreateVerificationRequest,
    user_id: Uuid,
) -> Result<verification::Model, DbErr> {
    let new_request = verification::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        requested_role: Set(input.requested_role),
        message: Set(input.message),
        document_urls: Set(serde_json::json!(input.document_urls)),
        status: Set(Status::Pending),
        reviewed_by: Set(None),
        created_at: Set(chrono::Utc::now()),
        reviewed_at: Set(None),
    };

    new_request.insert(db).await
}

/// Fetch a single verification request by ID.
pub async fn get_request_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<verification::Model>, DbErr> {
    verification::Entity::find_by_id(id).one(db).await
}

/// Fetch all requests made by a user, newest first.
pub async fn get_requests_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<verification::Model>, DbErr> {
    verification::Entity::find()
        .filter(verification::Column::UserId.eq(user_id))
        .order_by_desc(verification::Column::CreatedAt)
        .all(db)
        .await
}

/// Whether a user already has a request awaiting review.
pub async fn pending_request_exists(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<bool, DbErr> {
    let count = verification::Entity::find()
        .filter(verification::Column::UserId.eq(user_id))
        .filter(verification::Column::Status.eq(Status::Pending))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch the admin review queue: all Pending requests, oldest first.
pub async fn get_pending_requests(
    db: &DatabaseConnection,
) -> Result<Vec<verification::Model>, DbErr> {
    verification::Entity::find()
        .filter(verification::Column::Status.eq(Status::Pending))
        .order_by_asc(verification::Column::CreatedAt)
        .all(db)
        .await
}

/// Record an admin decision on a request.
pub async fn set_request_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: Status,
    reviewer_id: Uuid,
) -> Result<verification::Model, DbErr> {
    let request = verification::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(
            "Verification request not found".to_string(),
        ))?;

    let mut active: verification::ActiveModel = request.into();
    active.status = Set(status);
    active.reviewed_by = Set(Some(reviewer_id));
    active.reviewed_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
