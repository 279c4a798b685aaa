pub mod footer;
pub mod prices;
pub mod title;
