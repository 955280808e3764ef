#[macro_use]
extern crate tracing;

pub mod config;
mod error;
pub mod graph;
pub mod plugin;
pub mod state;
pub mod trace;

pub use error::Error;
