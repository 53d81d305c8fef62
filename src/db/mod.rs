pub mod exercises;
pub mod health_stats;
pub mod nutrition;
pub mod users;
pub mod workouts;
