use sea_orm::*;
use uuid::Uuid;

use crate::models::messages::{self, CreateMessage, Kind};

/// Insert a new message.
pub async fn insert_message(
    db: &DatabaseConnection,
    input: CreateMessage,
) -> Result<messages::Model, DbErr> {
    let new_message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        thread_id: Set(input.thread_id),
        sender_id: Set(input.sender_id),
        kind: Set(input.kind),
        body: Set(input.body),
        file_url: Set(input.file_url),
        offer_id: Set(input.offer_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_message.insert(db).await
}

/// Insert a System message. Sender is the party whose action produced it.
pub async fn insert_system_message(
    db: &DatabaseConnection,
    thread_id: Uuid,
    sender_id: Uuid,
    body: String,
) -> Result<messages::Model, DbErr> {
    insert_message(
        db,
        CreateMessage {
            thread_id,
            sender_id,
            kind: Kind::System,
            body: Some(body),
            file_url: None,
            offer_id: None,
        },
    )
    .await
}

/// Fetch messages for a thread, ordered by created_at descending, with
/// cursor pagination on (created_at, id).
pub async fn get_messages_by_thread(
    db: &DatabaseConnection,
    thread_id: Uuid,
    limit: u64,
    cursor_created_at: Option<chrono::DateTime<chrono::Utc>>,
    cursor_id: Option<Uuid>,
) -> Result<Vec<messages::Model>, DbErr> {
    let mut query = messages::Entity::find().filter(messages::Column::ThreadId.eq(thread_id));

    if let (Some(cursor_created_at), Some(cursor_id)) = (cursor_created_at, cursor_id) {
        query = query.filter(
            Condition::any()
                .add(messages::Column::CreatedAt.lt(cursor_created_at))
                .add(
                    Condition::all()
                        .add(messages::Column::CreatedAt.eq(cursor_created_at))
                        .add(messages::Column::Id.lt(cursor_id)),
                ),
        );
    }

    query
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .limit(limit)
        .all(db)
        .await
}
