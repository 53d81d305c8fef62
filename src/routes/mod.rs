use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod exercises;
pub mod health_stats;
pub mod nutrition;
pub mod profile;
pub mod registration;
pub mod statistics;
pub mod workouts;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // Profile routes (require authentication)
    cfg.service(
        web::scope("/profile")
            .wrap(AuthMiddleware)
            .service(profile::get_user)
            .service(profile::update_user),
    );
    // Health measurement routes (require authentication)
    cfg.service(
        web::scope("/health-stats")
            .wrap(AuthMiddleware)
            .service(statistics::health_stat_track_changes)
            .service(health_stats::create_stat)
            .service(health_stats::list_stats)
            .service(health_stats::update_stat),
    );
    // Workout routes (require authentication)
    cfg.service(
        web::scope("/workouts")
            .wrap(AuthMiddleware)
            .service(workouts::create_workout)
            .service(workouts::list_workouts)
            .service(workouts::get_workout)
            .service(workouts::delete_workout),
    );
    // Exercise catalog routes (require authentication)
    cfg.service(
        web::scope("/exercises")
            .wrap(AuthMiddleware)
            .service(exercises::create_exercise)
            .service(exercises::list_exercises)
            .service(exercises::get_exercise)
            .service(exercises::update_exercise)
            .service(exercises::delete_exercise),
    );
    // Nutrition routes (require authentication)
    cfg.service(
        web::scope("/nutrition")
            .wrap(AuthMiddleware)
            .service(nutrition::create_food_item)
            .service(nutrition::list_food_items)
            .service(nutrition::create_meal)
            .service(nutrition::list_meals)
            .service(nutrition::create_plan)
            .service(nutrition::list_plans),
    );
    // Statistics routes (require authentication)
    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(statistics::my_statistics),
    );
}
