//! Hash Registry: opaque tokens standing in for (student, company) pairs.
//!
//! Storage is delegated to the remote sheet backend; the only local logic is
//! get-or-create idempotency. Creation is serialized through an async mutex so
//! two concurrent requests for the same pair cannot both allocate a token.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::gateway::SheetGateway;

/// Length of a generated token.
const HASH_LEN: usize = 8;

/// Result of a get-or-create call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TokenOutcome {
    pub hash: String,
    pub reused: bool,
}

pub struct HashRegistry {
    gateway: Arc<SheetGateway>,
    create_lock: Mutex<()>,
}

impl HashRegistry {
    pub fn new(gateway: Arc<SheetGateway>) -> Self {
        Self {
            gateway,
            create_lock: Mutex::new(()),
        }
    }

    /// Look up the token for a (uid, company) pair, allocating and persisting
    /// a fresh one only when none exists yet.
    ///
    /// If the remote persist step fails the whole operation fails; a
    /// generated-but-unpersisted token is never returned, since it could not
    /// later be reverse-looked-up.
    pub async fn get_or_create(&self, uid: &str, company: &str) -> Result<TokenOutcome, AppError> {
        let _guard = self.create_lock.lock().await;

        if let Some(hash) = self.gateway.get_hash(uid, company).await? {
            return Ok(TokenOutcome { hash, reused: true });
        }

        let hash = generate_hash();
        self.gateway.store_hash(&hash, uid, company).await?;

        tracing::debug!(uid, company, %hash, "Allocated application token");
        Ok(TokenOutcome {
            hash,
            reused: false,
        })
    }

    /// Reverse-lookup a token into its (uid, company) pair.
    pub async fn decode(&self, hash: &str) -> Result<(String, String), AppError> {
        self.gateway.decode_hash(hash).await
    }
}

/// Fixed-length random token drawn from the hex alphabet of a v4 UUID.
/// Collision probability at this scale is accepted as negligible.
fn generate_hash() -> String {
    let mut hash = uuid::Uuid::new_v4().simple().to_string();
    hash.truncate(HASH_LEN);
    hash
}
