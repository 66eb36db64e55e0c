//! SeaORM adapters. Functions return `sea_orm::DbErr`; repos translate.

pub mod courses_sea;
pub mod rounds_sea;
pub mod scores_sea;
pub mod users_sea;
