use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews::{self, CreateReview};

/// Insert a new review. The handler runs the full eligibility gate first.
pub async fn insert_review(
    db: &DatabaseConnection,
    input: CreateReview,
    author_id: Uuid,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        author_id: Set(author_id),
        subject_user_id: Set(input.subject_user_id),
        gig_id: Set(input.gig_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_review.insert(db).await
}

/// Whether this author already reviewed this gig.
pub async fn review_exists(
    db: &DatabaseConnection,
    author_id: Uuid,
    gig_id: Uuid,
) -> Result<bool, DbErr> {
    let count = reviews::Entity::find()
        .filter(reviews::Column::AuthorId.eq(author_id))
        .filter(reviews::Column::GigId.eq(gig_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch all reviews about a user, newest first.
pub async fn get_reviews_for_user(
    db: &DatabaseConnection,
    subject_user_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::SubjectUserId.eq(subject_user_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all reviews on a gig, newest first.
pub async fn get_reviews_for_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::GigId.eq(gig_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}
