// ── Session persistence ──
//
// The only client-side state that outlives a command: the session cookie,
// the id of the last card-payment order (to match the payment redirect
// back to it) and the reference of a top-up awaiting verification.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SessionData {
    current_order_id: Option<EntityId>,
    pending_topup: Option<String>,
    session_cookie: Option<String>,
}

/// Session-scoped key/value store, backed by a JSON file or by memory.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    data: Mutex<SessionData>,
}

impl SessionStore {
    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(SessionData::default()),
        }
    }

    /// Load the session file at `path`. A missing file is an empty session;
    /// an unreadable one is reported.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding corrupt session file");
                SessionData::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(e) => {
                return Err(CoreError::Config {
                    message: format!("cannot read session file {}: {e}", path.display()),
                });
            }
        };
        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ── Card payment correlation ─────────────────────────────────────

    pub fn set_current_order(&self, order_id: EntityId) {
        self.update(|d| d.current_order_id = Some(order_id));
    }

    pub fn current_order(&self) -> Option<EntityId> {
        self.read(|d| d.current_order_id.clone())
    }

    /// Remove and return the stored order id.
    pub fn take_current_order(&self) -> Option<EntityId> {
        let mut taken = None;
        self.update(|d| taken = d.current_order_id.take());
        taken
    }

    // ── Top-up correlation ───────────────────────────────────────────

    pub fn set_pending_topup(&self, reference: String) {
        self.update(|d| d.pending_topup = Some(reference));
    }

    pub fn pending_topup(&self) -> Option<String> {
        self.read(|d| d.pending_topup.clone())
    }

    pub fn clear_pending_topup(&self) {
        self.update(|d| d.pending_topup = None);
    }

    // ── Cookie ───────────────────────────────────────────────────────

    pub fn set_cookie(&self, header: String) {
        self.update(|d| d.session_cookie = Some(header));
    }

    pub fn cookie(&self) -> Option<String> {
        self.read(|d| d.session_cookie.clone())
    }

    /// Forget everything (logout).
    pub fn clear(&self) {
        self.update(|d| *d = SessionData::default());
    }

    // ── Internals ────────────────────────────────────────────────────

    fn read<T>(&self, f: impl FnOnce(&SessionData) -> T) -> T {
        f(&self.data.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Apply `f` and write the file through. Write failures are logged:
    /// the in-memory session stays correct for this process.
    fn update(&self, f: impl FnOnce(&mut SessionData)) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut data);
        if let Some(path) = &self.path {
            if let Err(e) = persist(path, &data) {
                warn!(path = %path.display(), error = %e, "failed to write session file");
            } else {
                debug!(path = %path.display(), "session saved");
            }
        }
    }
}

fn persist(path: &Path, data: &SessionData) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(std::io::Error::other)?;

    // Holds the session cookie: owner-only from the moment it exists.
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        // `mode` only applies on creation; tighten files left by older runs.
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(json.as_bytes())?;
    Ok(())
}
