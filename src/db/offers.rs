use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::offers::{self, CreateOffer, Status};

/// Insert a new offer (initial status Pending).
pub async fn insert_offer(
    db: &DatabaseConnection,
    input: CreateOffer,
    from_user_id: Uuid,
) -> Result<offers::Model, DbErr> {
    let new_offer = offers::ActiveModel {
        id: Set(Uuid::new_v4()),
        thread_id: Set(input.thread_id),
        from_user_id: Set(from_user_id),
        amount: Set(input.amount),
        currency: Set(input.currency),
        terms: Set(input.terms),
        event_date: Set(input.event_date),
        expires_at: Set(input.expires_at),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_offer.insert(db).await
}

/// Fetch a single offer by ID.
pub async fn get_offer_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<offers::Model>, DbErr> {
    offers::Entity::find_by_id(id).one(db).await
}

/// Conditionally move an offer out of Pending.
///
/// `UPDATE offers SET status = $to WHERE id = $id AND status = 'pending'`.
/// Returns false when zero rows changed, meaning another request resolved
/// the offer first; the caller maps that to Conflict. This is the only
/// write path for offer status.
pub async fn resolve_pending_offer(
    db: &DatabaseConnection,
    id: Uuid,
    to: Status,
) -> Result<bool, DbErr> {
    let result = offers::Entity::update_many()
        .col_expr(offers::Column::Status, Expr::value(to))
        .filter(offers::Column::Id.eq(id))
        .filter(offers::Column::Status.eq(Status::Pending))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}
