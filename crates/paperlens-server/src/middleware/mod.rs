pub mod audit;
pub mod auth;
pub mod conversation;
pub mod database;
pub mod origin;
