//! logocn core library exports

pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;

pub use error::{CatalogError, Result};
