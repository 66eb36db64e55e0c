//! Domain layer: pure scoring arithmetic and round progression.

pub mod aggregate;
pub mod page;
pub mod round_progress;

#[cfg(test)]
mod tests_aggregate;

pub use round_progress::RoundProgress;
