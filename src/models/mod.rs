pub mod common;
pub mod exercise;
pub mod health_stat;
pub mod nutrition;
pub mod user;
pub mod workout;
