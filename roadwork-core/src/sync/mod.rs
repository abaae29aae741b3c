pub mod conflict;
pub mod engine;
