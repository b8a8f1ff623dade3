pub mod admin;
pub mod video;
