// src/sessions/mod.rs
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use crate::domain::{ListView, ReportDraft};
use crate::errors::ServerError;

pub mod token;

pub use token::generate_token_default;

/// Cookie carrying the visitor's draft token.
pub const COOKIE_NAME: &str = "draft";

/// Oldest idle visitors are dropped beyond this many.
pub const MAX_SESSIONS: usize = 10_000;

/// Per-visitor UI state: the report being written and the list's open card.
#[derive(Debug, Clone)]
pub struct Session {
    pub draft: ReportDraft,
    pub list: ListView,
}

impl Session {
    pub fn new(default_party_count: u32) -> Self {
        Self {
            draft: ReportDraft::new(default_party_count),
            list: ListView::default(),
        }
    }

    /// Clears what the accepted report took from the draft. `submitted`
    /// is the draft the report was built from.
    pub fn finish_submission(&mut self, submitted: &ReportDraft, default_party_count: u32) {
        self.draft.clear_submitted(submitted, default_party_count);
    }
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

pub struct Sessions {
    inner: Mutex<HashMap<String, Entry>>,
    default_party_count: u32,
    capacity: usize,
}

impl Sessions {
    pub fn new(default_party_count: u32) -> Self {
        Self::with_capacity(default_party_count, MAX_SESSIONS)
    }

    pub fn with_capacity(default_party_count: u32, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            default_party_count,
            capacity: capacity.max(1),
        }
    }

    /// Runs `f` against the session for `token`, creating it on first use.
    ///
    /// The lock is held for the whole closure, so each call is one atomic
    /// state transition. Do not block inside `f`.
    pub fn with_session<F, T>(&self, token: &str, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Session) -> Result<T, ServerError>,
    {
        let mut sessions = self.inner.lock().map_err(|_| ServerError::InternalError)?;

        if !sessions.contains_key(token) && sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("evicting idle draft session");
                sessions.remove(&oldest);
            }
        }

        let entry = sessions.entry(token.to_string()).or_insert_with(|| Entry {
            session: Session::new(self.default_party_count),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        f(&mut entry.session)
    }

    pub fn len(&self) -> Result<usize, ServerError> {
        let sessions = self.inner.lock().map_err(|_| ServerError::InternalError)?;
        Ok(sessions.len())
    }
}
