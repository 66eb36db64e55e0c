use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "course_id")]
    pub course_id: i64,
    #[sea_orm(column_name = "played_at")]
    pub played_at: OffsetDateTime,
    /// Weather icon code; empty when the lookup failed
    #[sea_orm(column_name = "weather_code")]
    pub weather_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Restrict"
    )]
    Course,
    #[sea_orm(has_many = "super::round_scores::Entity")]
    RoundScores,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::round_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
