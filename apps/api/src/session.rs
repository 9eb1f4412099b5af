//! Session-scoped state bag.
//!
//! Each interactive browser session owns one `Session`: the active dataset,
//! the authentication token, the two assembled prompts, and the two generated
//! text blocks. State lives in-process only and is discarded when the
//! process ends. Handlers address a session by explicit `session_id` —
//! there is no ambient global state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::record::CaptureRecord;

#[derive(Debug, Default, Clone, Serialize)]
pub struct Session {
    /// Access token from the identity provider. `None` until login succeeds.
    pub token: Option<String>,
    pub user_email: Option<String>,
    pub records: Vec<CaptureRecord>,
    pub data_connected: bool,
    pub prompt_part1: Option<String>,
    pub prompt_part2: Option<String>,
    pub generated_part1: Option<String>,
    pub generated_part2: Option<String>,
}

impl Session {
    /// Installs a freshly loaded dataset. Prompts and generated text derive
    /// from the dataset, so they are cleared whenever it changes.
    pub fn install_records(&mut self, records: Vec<CaptureRecord>) {
        self.records = records;
        self.data_connected = true;
        self.prompt_part1 = None;
        self.prompt_part2 = None;
        self.generated_part1 = None;
        self.generated_part2 = None;
    }
}

/// In-process store of all live sessions, keyed by session id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh empty session and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, Session::default());
        id
    }

    /// Returns a snapshot of the session, or `NotFound` for an unknown id.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Unknown session {id}")))
    }

    /// Applies a mutation to the session under the write lock.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Unknown session {id}")))?;
        f(session);
        Ok(())
    }
}
