pub mod config;
mod error;
pub mod keys;
pub mod model;
pub mod session;
pub mod sources;
pub mod utils;

pub use error::{Error, Result};
