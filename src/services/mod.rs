pub mod catalog;
pub mod submission;
