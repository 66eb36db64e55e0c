//! SeaORM adapter for the course catalog (courses + course_holes).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{course_holes, courses};

pub mod dto;

pub use dto::{CourseCreate, HoleUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Option<courses::Model>, sea_orm::DbErr> {
    courses::Entity::find_by_id(course_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<courses::Model>, sea_orm::DbErr> {
    courses::Entity::find()
        .filter(courses::Column::Name.eq(name))
        .one(conn)
        .await
}

/// One page of courses ordered by name descending, plus the total count.
pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page_index: u64,
    per_page: u64,
) -> Result<(Vec<courses::Model>, u64), sea_orm::DbErr> {
    let paginator = courses::Entity::find()
        .order_by_desc(courses::Column::Name)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

pub async fn create_course(
    txn: &DatabaseTransaction,
    dto: CourseCreate,
) -> Result<courses::Model, sea_orm::DbErr> {
    let course = courses::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        hole_count: Set(dto.hole_count),
        location: Set(dto.location),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    course.insert(txn).await
}

/// Insert holes `1..=hole_count` with the given par and no length.
pub async fn insert_default_holes(
    txn: &DatabaseTransaction,
    course_id: i64,
    hole_count: i16,
    par: i16,
) -> Result<(), sea_orm::DbErr> {
    let holes = (1..=hole_count).map(|hole_number| course_holes::ActiveModel {
        id: NotSet,
        course_id: Set(course_id),
        hole_number: Set(hole_number),
        par: Set(par),
        length: Set(None),
    });

    course_holes::Entity::insert_many(holes)
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

/// All holes of a course ordered by hole number.
pub async fn find_holes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Vec<course_holes::Model>, sea_orm::DbErr> {
    course_holes::Entity::find()
        .filter(course_holes::Column::CourseId.eq(course_id))
        .order_by_asc(course_holes::Column::HoleNumber)
        .all(conn)
        .await
}

pub async fn find_hole<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
    hole_number: i16,
) -> Result<Option<course_holes::Model>, sea_orm::DbErr> {
    course_holes::Entity::find()
        .filter(course_holes::Column::CourseId.eq(course_id))
        .filter(course_holes::Column::HoleNumber.eq(hole_number))
        .one(conn)
        .await
}

pub async fn update_hole(
    txn: &DatabaseTransaction,
    dto: HoleUpdate,
) -> Result<course_holes::Model, sea_orm::DbErr> {
    let hole = find_hole(txn, dto.course_id, dto.hole_number)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("course_holes".to_string()))?;

    let mut hole: course_holes::ActiveModel = hole.into();
    hole.par = Set(dto.par);
    hole.length = Set(dto.length);
    hole.update(txn).await
}
