use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{
    HealthGoal, UserRecord, UserRole, UserStatus, UserSummaryRecord,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     role, status, date_of_birth, height_m, weight_kg, health_goal, created_at, updated_at";

pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn username_or_email_taken(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1 OR email = $2")
            .bind(username)
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserRecord, sqlx::Error> {
    let now = Utc::now();
    let user_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name,
                           role, status, health_goal, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(UserRole::User)
    .bind(UserStatus::Active)
    .bind(HealthGoal::MaintainHealth)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(UserRecord {
        id: user_id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role: UserRole::User,
        status: UserStatus::Active,
        date_of_birth: None,
        height_m: None,
        weight_kg: None,
        health_goal: HealthGoal::MaintainHealth,
        created_at: now,
        updated_at: now,
    })
}

/// Statistics target lookup: only active users are valid targets.
pub async fn find_active_summary(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserSummaryRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserSummaryRecord>(
        r#"
        SELECT id, username, first_name, last_name, role
        FROM users
        WHERE id = $1 AND status = 'active'
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub struct ProfileChanges<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub health_goal: Option<HealthGoal>,
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    changes: ProfileChanges<'_>,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        r#"
        UPDATE users SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            password_hash = COALESCE($4, password_hash),
            date_of_birth = COALESCE($5, date_of_birth),
            height_m = COALESCE($6, height_m),
            weight_kg = COALESCE($7, weight_kg),
            health_goal = COALESCE($8, health_goal),
            updated_at = $9
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(changes.first_name)
    .bind(changes.last_name)
    .bind(changes.password_hash)
    .bind(changes.date_of_birth)
    .bind(changes.height_m)
    .bind(changes.weight_kg)
    .bind(changes.health_goal)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}
