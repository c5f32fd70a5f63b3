pub mod insight;
pub mod streak;
pub mod week;
