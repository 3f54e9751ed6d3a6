pub mod session;
pub mod time;
pub mod world;
