use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use jiff::Timestamp;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ReturnDocument;
use tracing::info;

use paperlens_core::collections::USERS;
use paperlens_core::models::user::SignInProfile;

use crate::error::StorageError;
use crate::mongo::MongoCache;

pub trait UserStore: Send + Sync {
    /// Look the user up by email, creating the record on first sign-in.
    /// Returns the user id as a hex string.
    fn find_or_create(&self, profile: SignInProfile) -> BoxFuture<'_, Result<String, StorageError>>;
}

pub struct MongoUsers {
    cache: Arc<MongoCache>,
}

impl MongoUsers {
    pub fn new(cache: Arc<MongoCache>) -> Self {
        Self { cache }
    }
}

impl UserStore for MongoUsers {
    fn find_or_create(&self, profile: SignInProfile) -> BoxFuture<'_, Result<String, StorageError>> {
        async move {
            let email = profile.normalized_email();
            if email.is_empty() {
                return Err(StorageError::Malformed("email is empty".to_string()));
            }

            let database = self.cache.get().await?;
            let update = upsert_update(&profile, Timestamp::now());

            let stored = database
                .collection::<Document>(USERS)
                .find_one_and_update(doc! { "email": email.as_str() }, update)
                .upsert(true)
                .return_document(ReturnDocument::After)
                .await?
                .ok_or_else(|| StorageError::Malformed("upsert returned no document".to_string()))?;

            let id = stored
                .get_object_id("_id")
                .map_err(|e| StorageError::Malformed(format!("user _id: {e}")))?
                .to_hex();

            info!(user_id = %id, "user signed in");
            Ok(id)
        }
        .boxed()
    }
}

/// Update document for sign-in: set the creation fields only on insert and
/// refresh any profile fields that were supplied.
pub fn upsert_update(profile: &SignInProfile, now: Timestamp) -> Document {
    let user = profile.clone().into_user(now);
    let mut update = doc! {
        "$setOnInsert": {
            "email": user.email,
            "created_at": user.created_at.to_string(),
        }
    };

    let mut refreshed = Document::new();
    for (field, value) in [("name", &profile.name), ("picture", &profile.picture)] {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            refreshed.insert(field, Bson::String(value.to_string()));
        }
    }
    if !refreshed.is_empty() {
        update.insert("$set", refreshed);
    }

    update
}
