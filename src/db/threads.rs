use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::thread_participants;
use crate::models::threads::{self, State};

/// Insert a new thread plus one participant row per member.
///
/// These are sequential single-row writes, not a transaction; a failure
/// between them leaves a thread the creator can still see and re-invite to.
pub async fn insert_thread(
    db: &DatabaseConnection,
    gig_id: Uuid,
    created_by: Uuid,
    participant_ids: &[Uuid],
) -> Result<threads::Model, DbErr> {
    let new_thread = threads::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(gig_id),
        created_by: Set(created_by),
        state: Set(State::Open),
        created_at: Set(chrono::Utc::now()),
    };

    let thread = new_thread.insert(db).await?;

    for user_id in participant_ids {
        let participant = thread_participants::ActiveModel {
            id: Set(Uuid::new_v4()),
            thread_id: Set(thread.id),
            user_id: Set(*user_id),
            created_at: Set(chrono::Utc::now()),
        };
        participant.insert(db).await?;
    }

    Ok(thread)
}

/// Fetch a single thread by ID.
pub async fn get_thread_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<threads::Model>, DbErr> {
    threads::Entity::find_by_id(id).one(db).await
}

/// Fetch the participant user ids of a thread, in join order.
pub async fn get_participant_ids(
    db: &DatabaseConnection,
    thread_id: Uuid,
) -> Result<Vec<Uuid>, DbErr> {
    let rows = thread_participants::Entity::find()
        .filter(thread_participants::Column::ThreadId.eq(thread_id))
        .order_by_asc(thread_participants::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|p| p.user_id).collect())
}

/// Whether a user is a participant of a thread.
pub async fn is_participant(
    db: &DatabaseConnection,
    thread_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DbErr> {
    let count = thread_participants::Entity::find()
        .filter(thread_participants::Column::ThreadId.eq(thread_id))
        .filter(thread_participants::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch all threads a user participates in, newest first.
pub async fn get_threads_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<threads::Model>, DbErr> {
    let memberships = thread_participants::Entity::find()
        .filter(thread_participants::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    let thread_ids: Vec<Uuid> = memberships.into_iter().map(|m| m.thread_id).collect();
    if thread_ids.is_empty() {
        return Ok(Vec::new());
    }

    threads::Entity::find()
        .filter(threads::Column::Id.is_in(thread_ids))
        .order_by_desc(threads::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch participant lists for many threads in one query, keyed by thread id.
pub async fn get_participants_for_threads(
    db: &DatabaseConnection,
    thread_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr> {
    if thread_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = thread_participants::Entity::find()
        .filter(thread_participants::Column::ThreadId.is_in(thread_ids))
        .order_by_asc(thread_participants::Column::CreatedAt)
        .all(db)
        .await?;

    let mut map: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in rows {
        map.entry(row.thread_id).or_default().push(row.user_id);
    }

    Ok(map)
}

/// Relabel the advisory thread state tag.
pub async fn set_thread_state(
    db: &DatabaseConnection,
    id: Uuid,
    state: State,
) -> Result<threads::Model, DbErr> {
    let thread = threads::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Thread not found".to_string()))?;

    let mut active: threads::ActiveModel = thread.into();
    active.state = Set(state);

    active.update(db).await
}
