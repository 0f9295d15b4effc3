pub mod backend;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod sampling;
pub mod scheduler;
pub mod state;
pub mod terminal;
