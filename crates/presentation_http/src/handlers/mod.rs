//! HTTP request handlers

pub mod common;
pub mod companies;
pub mod departments;
pub mod employees;
pub mod health;
