//! Session Carrier — a narrow key-value interface over Redis that threads
//! the validated document between pipeline stages across request cycles.
//!
//! One key per session, one document per key. The document lives only as
//! long as the session: a TTL bounds it and nothing else persists it.
//! Read-then-write within one request is a single logical step; concurrent
//! requests for the same session are not coordinated here.

use redis::AsyncCommands;
use tracing::warn;

use crate::errors::AppError;
use crate::schema::Document;

pub const SESSION_COOKIE: &str = "cv_session";

/// How long a carried document survives after the last write. Reads do
/// not refresh the TTL.
const DOCUMENT_TTL_SECS: u64 = 3600;

#[derive(Clone)]
pub struct SessionStore {
    client: redis::Client,
}

impl SessionStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}:document")
    }

    /// `get`: the carried document, or None when the session carries nothing.
    /// A blob that no longer parses is dropped and treated as absent.
    pub async fn document(&self, session_id: &str) -> Result<Option<Document>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(Self::key(session_id)).await?;

        let Some(raw) = stored else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                warn!("Discarding unreadable session document: {e}");
                let _: () = conn.del(Self::key(session_id)).await?;
                Ok(None)
            }
        }
    }

    /// `set`: replaces whatever the session carried before.
    pub async fn put_document(
        &self,
        session_id: &str,
        document: &Document,
    ) -> Result<(), AppError> {
        let raw = serde_json::to_string(document)
            .map_err(|e| anyhow::anyhow!("failed to serialize document: {e}"))?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn
            .set_ex(Self::key(session_id), raw, DOCUMENT_TTL_SECS)
            .await?;
        Ok(())
    }

    /// `unset`: removes the carried document, if any.
    pub async fn clear_document(&self, session_id: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(Self::key(session_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_keys_are_namespaced_per_session() {
        let a = SessionStore::key("11111111-1111-4111-8111-111111111111");
        let b = SessionStore::key("22222222-2222-4222-8222-222222222222");
        assert_ne!(a, b);
        assert!(a.starts_with("session:"));
        assert!(a.ends_with(":document"));
    }
}
