pub mod config;
pub mod theme;
pub mod timer;
