//! MongoDB collection conventions.
//!
//! Pure constants, no driver dependency. These define where each record
//! lives in the paperlens database.

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "paperlens";

pub const USERS: &str = "users";

pub const CONVERSATIONS: &str = "conversations";

/// Field on a conversation document holding the owning user's id.
pub const CONVERSATION_OWNER_FIELD: &str = "userId";
