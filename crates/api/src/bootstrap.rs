//! Startup creation of the first administrator account.

use hotelier_db::models::user::CreateUser;
use hotelier_db::repositories::UserRepo;
use hotelier_db::DbPool;

use crate::auth::password::{hash_password, validate_admin_password};
use crate::config::AdminCredentials;
use crate::error::{AppError, AppResult};

/// Create the configured administrator unless an account with that email
/// already exists. Returns `true` when an account was created.
///
/// An existing account is left untouched, including its password.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminCredentials) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        tracing::debug!(email = %admin.email, "Administrator account already exists");
        return Ok(false);
    }

    validate_admin_password(&admin.password).map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: admin.email.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Administrator account created");
    Ok(true)
}
