pub mod input;
pub mod tick;
