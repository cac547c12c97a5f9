pub mod catalog;
pub mod seed;
