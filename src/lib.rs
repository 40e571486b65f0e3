pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod fetch;
pub mod item;
pub mod price;

pub use error::{KagoError, Result};
