use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use tracing::debug;

use paperlens_core::collections::{CONVERSATIONS, CONVERSATION_OWNER_FIELD};
use paperlens_core::models::conversation::Conversation;

use crate::error::StorageError;
use crate::mongo::MongoCache;

/// Read access to stored conversations.
pub trait ConversationStore: Send + Sync {
    /// The conversation `id` owned by `user_id`, or `None` when no such
    /// conversation exists for that user.
    fn find_owned<'a>(
        &'a self,
        id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Conversation>, StorageError>>;
}

pub struct MongoConversations {
    cache: Arc<MongoCache>,
}

impl MongoConversations {
    pub fn new(cache: Arc<MongoCache>) -> Self {
        Self { cache }
    }
}

impl ConversationStore for MongoConversations {
    fn find_owned<'a>(
        &'a self,
        id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Conversation>, StorageError>> {
        async move {
            let Some(filter) = owned_filter(id, user_id) else {
                debug!(id, "not an ObjectId, treating as missing");
                return Ok(None);
            };

            let database = self.cache.get().await?;
            let found = database
                .collection::<Document>(CONVERSATIONS)
                .find_one(filter)
                .await?;

            found.map(conversation_from_document).transpose()
        }
        .boxed()
    }
}

/// Filter matching conversation `id` owned by `user_id`. The owner field
/// may hold either the hex string or an ObjectId.
pub fn owned_filter(id: &str, user_id: &str) -> Option<Document> {
    let id = ObjectId::parse_str(id.trim()).ok()?;

    let mut owners = vec![Bson::String(user_id.to_string())];
    if let Ok(owner_oid) = ObjectId::parse_str(user_id) {
        owners.push(Bson::ObjectId(owner_oid));
    }

    let mut filter = doc! { "_id": id };
    filter.insert(CONVERSATION_OWNER_FIELD, doc! { "$in": owners });
    Some(filter)
}

/// Decode a raw conversation document through its relaxed extended-JSON
/// form, so the domain type's lenient decoding applies unchanged.
pub fn conversation_from_document(document: Document) -> Result<Conversation, StorageError> {
    let value = Bson::Document(document).into_relaxed_extjson();
    Ok(serde_json::from_value(value)?)
}
