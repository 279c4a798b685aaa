pub mod act;
pub mod error;
pub mod extensions;
pub mod thematize;
pub mod widgets;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use error::RatatuiExtraError as Error;
pub type Result<T> = std::result::Result<T, Error>;
pub use widgets::*;
