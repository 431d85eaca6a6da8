use sea_orm::*;
use uuid::Uuid;

use crate::models::applications::{self, CreateApplication, Status, UpdateApplicationStatus};

/// Insert a new application (defaults to Pending status).
pub async fn insert_application(
    db: &DatabaseConnection,
    input: CreateApplication,
) -> Result<applications::Model, DbErr> {
    let new_application = applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(input.gig_id),
        comedian_id: Set(input.comedian_id),
        note: Set(input.note),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_application.insert(db).await
}

/// Fetch a single application by ID.
pub async fn get_application_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find_by_id(id).one(db).await
}

/// Whether this comedian already applied to this gig.
pub async fn application_exists(
    db: &DatabaseConnection,
    gig_id: Uuid,
    comedian_id: Uuid,
) -> Result<bool, DbErr> {
    let count = applications::Entity::find()
        .filter(applications::Column::GigId.eq(gig_id))
        .filter(applications::Column::ComedianId.eq(comedian_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch all applications on a gig.
pub async fn get_applications_by_gig_id(
    db: &DatabaseConnection,
    gig_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::GigId.eq(gig_id))
        .order_by_asc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all applications sent by a comedian.
pub async fn get_applications_by_comedian_id(
    db: &DatabaseConnection,
    comedian_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::ComedianId.eq(comedian_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Update the status of an application.
pub async fn update_application_status(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateApplicationStatus,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();
    active.status = Set(input.status);

    active.update(db).await
}

/// Delete an application by ID.
pub async fn delete_application(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    applications::Entity::delete_by_id(id).exec(db).await
}
