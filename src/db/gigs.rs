use sea_orm::*;
use uuid::Uuid;

use crate::models::gigs::{self, CreateGig, GigListQuery, Status, UpdateGig};

/// Insert a new gig. Starts Open and unpublished.
pub async fn insert_gig(
    db: &DatabaseConnection,
    input: CreateGig,
    user_id: Uuid,
) -> Result<gigs::Model, DbErr> {
    let new_gig = gigs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        venue_name: Set(input.venue_name),
        city: Set(input.city),
        pay_amount: Set(input.pay_amount),
        currency: Set(input.currency),
        date_start: Set(input.date_start),
        date_end: Set(input.date_end),
        status: Set(Status::Open),
        is_published: Set(false),
        user_id: Set(user_id),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_gig.insert(db).await
}

/// Fetch gigs with listing filters and pagination.
pub async fn get_gigs(
    db: &DatabaseConnection,
    query: &GigListQuery,
    published_only: bool,
) -> Result<Vec<gigs::Model>, DbErr> {
    let mut find = gigs::Entity::find();

    if published_only {
        find = find.filter(gigs::Column::IsPublished.eq(true));
    } else if let Some(published) = query.published {
        find = find.filter(gigs::Column::IsPublished.eq(published));
    }
    if let Some(city) = &query.city {
        find = find.filter(gigs::Column::City.eq(city.clone()));
    }

    find.order_by_desc(gigs::Column::CreatedAt)
        .paginate(db, query.limit())
        .fetch_page(query.page().saturating_sub(1))
        .await
}

/// Fetch a single gig by ID.
pub async fn get_gig_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    gigs::Entity::find_by_id(id).one(db).await
}

/// Fetch all gigs owned by a user.
pub async fn get_gigs_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::UserId.eq(user_id))
        .order_by_desc(gigs::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing gig's editable fields.
pub async fn update_gig(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateGig,
) -> Result<gigs::Model, DbErr> {
    let gig = gigs::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Gig not found".to_string()))?;

    let mut active: gigs::ActiveModel = gig.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(venue_name) = input.venue_name {
        active.venue_name = Set(venue_name);
    }
    if let Some(city) = input.city {
        active.city = Set(city);
    }
    if let Some(pay_amount) = input.pay_amount {
        active.pay_amount = Set(pay_amount);
    }
    if let Some(currency) = input.currency {
        active.currency = Set(currency);
    }
    if let Some(date_start) = input.date_start {
        active.date_start = Set(date_start);
    }
    if let Some(date_end) = input.date_end {
        active.date_end = Set(Some(date_end));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Flip the publish flag. The handler checks `can_publish_gig` first.
pub async fn set_published(
    db: &DatabaseConnection,
    id: Uuid,
    published: bool,
) -> Result<gigs::Model, DbErr> {
    let gig = gigs::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Gig not found".to_string()))?;

    let mut active: gigs::ActiveModel = gig.into();
    active.is_published = Set(published);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a gig by ID.
pub async fn delete_gig(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    gigs::Entity::delete_by_id(id).exec(db).await
}
