use sqlx::PgPool;
use uuid::Uuid;

use tuition_core::hash_password;
use tuition_models::UserRole;

/// Creates a confirmed identity with an Admin profile.
pub async fn create_admin(
    db: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    let email = email.trim().to_lowercase();
    let password_hash =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO auth_users (email, password_hash, email_confirmed_at)
         VALUES ($1, $2, NOW())
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(user_id) = user_id else {
        tx.rollback().await?;
        return Err("User with this email already exists".into());
    };

    sqlx::query("INSERT INTO user_profiles (user_id, full_name, role) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(full_name)
        .bind(UserRole::Admin)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user_id)
}
