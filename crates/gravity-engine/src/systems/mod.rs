pub mod gravity;
pub mod merge;
pub mod rng;
