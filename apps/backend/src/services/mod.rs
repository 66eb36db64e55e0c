pub mod courses;
pub mod scoring;
pub mod stats;
pub mod users;
