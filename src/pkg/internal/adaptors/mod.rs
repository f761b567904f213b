pub mod candidates;
pub mod catalog;
