pub mod auth;
pub mod export;
pub mod health;
pub mod summarize;
