pub mod conversation;
pub mod paper;
pub mod payload;
pub mod user;
pub mod validation;
