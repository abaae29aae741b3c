//! Seams the engine is written against: time and persistence.

pub mod storage;
pub mod clock;
