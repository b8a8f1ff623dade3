pub mod admin_auth;
pub mod media_store;
pub mod media_url;
pub mod seed;
pub mod video;
