//! Infrastructure layer - database bootstrap, state construction and DbErr mapping.

pub mod db;
pub mod db_errors;
pub mod state;
