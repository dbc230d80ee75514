use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::{Session, UserProfile};

const SESSION_FILE_VERSION: u32 = 1;
const SESSION_FILE_NAME: &str = "session.toml";

/// Storage for the current session and the cached user profile.
///
/// Pure storage: no policy lives here. `save_session` must replace both
/// tokens in one step, so a concurrent `load_session` sees either the old
/// pair or the new one.
pub trait SessionStore: Send + Sync {
    fn load_session(&self) -> Result<Option<Session>, AuthError>;
    fn save_session(&self, session: &Session) -> Result<(), AuthError>;
    fn load_profile(&self) -> Result<Option<UserProfile>, AuthError>;
    fn save_profile(&self, profile: &UserProfile) -> Result<(), AuthError>;
    /// Remove both tokens and the cached profile. Clearing an empty store is
    /// not an error.
    fn clear(&self) -> Result<(), AuthError>;
}

/// Configuration for file-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStoreConfig {
    pub base_dir: PathBuf,
}

impl SessionStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        default_lobby_dir()
    }
}

/// File-backed session store.
///
/// Keeps tokens and profile in a single TOML document that is rewritten
/// through a temp file and a rename, with `0600` permissions on unix.
///
/// # Example
/// ```no_run
/// use lobby::auth::{FileSessionStore, Session, SessionStore};
///
/// let store = FileSessionStore::new_default();
/// store.save_session(&Session::new("access", "refresh"))?;
/// # Ok::<(), lobby::auth::AuthError>(())
/// ```
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(config: SessionStoreConfig) -> Self {
        Self {
            path: config.base_dir.join(SESSION_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    pub fn new_default() -> Self {
        Self::new(SessionStoreConfig::new(default_lobby_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<SessionFile, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionFile::empty())
            }
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        let file: SessionFile = toml::from_str(&raw)?;
        if file.version != SESSION_FILE_VERSION {
            return Err(AuthError::Serialization(format!(
                "Unsupported session file version {} at {}",
                file.version,
                self.path.display()
            )));
        }
        Ok(file)
    }

    fn update(&self, apply: impl FnOnce(&mut SessionFile)) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = self.read_file()?;
        apply(&mut file);
        file.saved_at = Some(Utc::now());
        let serialized = toml::to_string(&file)?;
        atomic_write(&self.path, serialized.as_bytes())
    }
}

impl SessionStore for FileSessionStore {
    fn load_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.read_file()?.session)
    }

    fn save_session(&self, session: &Session) -> Result<(), AuthError> {
        self.update(|file| file.session = Some(session.clone()))
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.read_file()?.profile)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), AuthError> {
        self.update(|file| file.profile = Some(profile.clone()))
    }

    fn clear(&self) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

/// In-process session store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    session: Option<Session>,
    profile: Option<UserProfile>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(MemoryState {
                session: Some(session),
                profile: None,
            }),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load_session(&self) -> Result<Option<Session>, AuthError> {
        let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.session.clone())
    }

    fn save_session(&self, session: &Session) -> Result<(), AuthError> {
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        state.session = Some(session.clone());
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, AuthError> {
        let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.profile.clone())
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), AuthError> {
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        state.profile = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *state = MemoryState::default();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    session: Option<Session>,
    #[serde(default)]
    profile: Option<UserProfile>,
}

impl SessionFile {
    fn empty() -> Self {
        Self {
            version: SESSION_FILE_VERSION,
            saved_at: None,
            session: None,
            profile: None,
        }
    }
}

fn default_lobby_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".lobby"))
        .unwrap_or_else(|| PathBuf::from(".lobby"))
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| AuthError::Io(format!("Session path {} has no file name", path.display())))?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_name = format!(
        ".{}.tmp-{}-{nonce}",
        file_name.to_string_lossy(),
        std::process::id()
    );
    let temp_path = path.with_file_name(temp_name);

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileSessionStore) {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(SessionStoreConfig::new(dir.path().to_path_buf()));
        (dir, store)
    }

    #[test]
    fn session_round_trip_works() {
        let (_dir, store) = temp_store();
        store.save_session(&Session::new("access", "refresh")).unwrap();
        let loaded = store.load_session().unwrap().unwrap();
        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.refresh_token, "refresh");
    }

    #[test]
    fn saving_session_keeps_cached_profile() {
        let (_dir, store) = temp_store();
        let profile = UserProfile {
            email: "desk@hotel.test".to_string(),
            is_email_confirmed: true,
        };
        store.save_profile(&profile).unwrap();
        store.save_session(&Session::new("a2", "r2")).unwrap();
        assert_eq!(store.load_profile().unwrap(), Some(profile));
    }

    #[test]
    fn clear_removes_everything() {
        let (_dir, store) = temp_store();
        store.save_session(&Session::new("access", "refresh")).unwrap();
        store
            .save_profile(&UserProfile {
                email: "x@y.z".to_string(),
                is_email_confirmed: false,
            })
            .unwrap();
        store.clear().unwrap();
        assert!(store.load_session().unwrap().is_none());
        assert!(store.load_profile().unwrap().is_none());
        // second clear is a no-op
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        let (_dir, store) = temp_store();
        store.save_session(&Session::new("access", "refresh")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn memory_store_clear_resets_state() {
        let store = MemorySessionStore::with_session(Session::new("a", "r"));
        assert!(store.load_session().unwrap().is_some());
        store.clear().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }
}
