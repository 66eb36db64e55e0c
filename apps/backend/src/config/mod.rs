pub mod db;
pub mod weather;
