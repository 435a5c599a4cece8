#![allow(dead_code)]

pub mod test_db;

pub use test_db::{create_test_list, create_test_pool};
