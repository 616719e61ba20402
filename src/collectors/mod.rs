pub mod gate;
pub mod runner;
pub mod smart;
pub mod smart_cache;
