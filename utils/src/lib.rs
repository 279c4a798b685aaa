pub mod config;
pub mod disk_storage;
pub mod error;
pub mod log;
pub mod prices;
pub mod reqwest;
pub mod serde;
pub mod shutdown;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

#[cfg(test)]
mod tests;

pub use error::{Result, UtilsError as Error};

pub use crate::reqwest::Reqwest;
