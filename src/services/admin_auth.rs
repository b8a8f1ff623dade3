use crate::database::DbPool;
use crate::models::admin::Admin;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt::JwtService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn find_admin_by_email(pool: &DbPool, email: &str) -> AppResult<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = ?")
        .bind(email)
        .fetch_optional(pool.as_ref())
        .await?;
    Ok(admin)
}

/// Verifies the pair and issues a signed admin token. Unknown email and wrong
/// password produce the same rejection.
pub async fn authenticate(
    pool: &DbPool,
    jwt_service: &JwtService,
    email: &str,
    password: &str,
) -> AppResult<String> {
    let admin = match find_admin_by_email(pool, email).await? {
        Some(admin) => admin,
        None => {
            tracing::debug!("Admin login rejected: unknown email");
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }
    };

    if !verify_password(password, &admin.password_hash)? {
        tracing::debug!("Admin login rejected: wrong password for id={}", admin.id);
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let token = jwt_service.generate_token(admin.id)?;

    tracing::info!("Admin logged in: id={}", admin.id);
    Ok(token)
}

/// Creates the admin account unless one with this email already exists.
/// Returns whether a row was inserted.
pub async fn ensure_admin(pool: &DbPool, email: &str, password: &str) -> AppResult<bool> {
    if find_admin_by_email(pool, email).await?.is_some() {
        tracing::info!("Admin {} already exists", email);
        return Ok(false);
    }

    let admin = Admin::new(email.to_string(), hash_password(password)?);

    sqlx::query("INSERT INTO admins (email, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.created_at)
        .execute(pool.as_ref())
        .await?;

    tracing::info!("Admin {} created", email);
    Ok(true)
}
