use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::video::timestamp_now;

#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

impl Admin {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: 0,
            email,
            password_hash,
            created_at: timestamp_now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
