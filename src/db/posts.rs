use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::post_votes;
use crate::models::posts::{self, CreatePost};

/// Insert a new community post.
pub async fn insert_post(
    db: &DatabaseConnection,
    input: CreatePost,
    author_id: Uuid,
) -> Result<posts::Model, DbErr> {
    let new_post = posts::ActiveModel {
        id: Set(Uuid::new_v4()),
        author_id: Set(author_id),
        title: Set(input.title),
        body: Set(input.body),
        created_at: Set(chrono::Utc::now()),
    };

    new_post.insert(db).await
}

/// Fetch posts with pagination, newest first.
pub async fn get_posts_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<posts::Model>, DbErr> {
    posts::Entity::find()
        .order_by_desc(posts::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch a single post by ID.
pub async fn get_post_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<posts::Model>, DbErr> {
    posts::Entity::find_by_id(id).one(db).await
}

/// Delete a post by ID.
pub async fn delete_post(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    posts::Entity::delete_by_id(id).exec(db).await
}

/// Record a vote. One row per (post, user): a repeat vote overwrites the
/// previous value instead of stacking.
pub async fn upsert_vote(
    db: &DatabaseConnection,
    post_id: Uuid,
    user_id: Uuid,
    value: i16,
) -> Result<post_votes::Model, DbErr> {
    let existing = post_votes::Entity::find()
        .filter(post_votes::Column::PostId.eq(post_id))
        .filter(post_votes::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    match existing {
        Some(vote) => {
            let mut active: post_votes::ActiveModel = vote.into();
            active.value = Set(value);
            active.update(db).await
        }
        None => {
            let new_vote = post_votes::ActiveModel {
                id: Set(Uuid::new_v4()),
                post_id: Set(post_id),
                user_id: Set(user_id),
                value: Set(value),
                created_at: Set(chrono::Utc::now()),
            };
            new_vote.insert(db).await
        }
    }
}

/// Sum of vote values for a post.
pub async fn get_post_score(db: &DatabaseConnection, post_id: Uuid) -> Result<i64, DbErr> {
    let votes = post_votes::Entity::find()
        .filter(post_votes::Column::PostId.eq(post_id))
        .all(db)
        .await?;

    Ok(votes.iter().map(|v| i64::from(v.value)).sum())
}

/// Vote scores for many posts in one query, keyed by post id.
pub async fn get_scores_for_posts(
    db: &DatabaseConnection,
    post_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, i64>, DbErr> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let votes = post_votes::Entity::find()
        .filter(post_votes::Column::PostId.is_in(post_ids))
        .all(db)
        .await?;

    let mut scores: HashMap<Uuid, i64> = HashMap::new();
    for vote in votes {
        *scores.entry(vote.post_id).or_insert(0) += i64::from(vote.value);
    }

    Ok(scores)
}
