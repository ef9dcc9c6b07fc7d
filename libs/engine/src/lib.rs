pub mod clock;
pub mod config;
pub mod normalize;
pub mod scheduler;
pub mod source;
pub mod sweep;
