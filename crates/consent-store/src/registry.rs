//! User registry — name resolution, load and save.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use consent_core::{Error, Result, User};
use tracing::{debug, info};

/// All known users keyed by identity, bound to the file they came from.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    users: BTreeMap<String, User>,
}

impl Registry {
    /// Empty registry that will be saved to `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            users: BTreeMap::new(),
        }
    }

    /// Load the registry from `path`. A missing or malformed file yields an
    /// empty registry.
    pub fn load(path: &Path) -> Self {
        let users = match read_users(path) {
            Ok(users) => users,
            Err(e) => {
                debug!("Starting with empty registry ({}): {}", path.display(), e);
                BTreeMap::new()
            }
        };
        info!("Registry: {} users loaded", users.len());

        Self {
            path: path.to_path_buf(),
            users,
        }
    }

    /// Rewrite the whole file. The new content is written to a temporary
    /// file in the same directory and renamed over the target.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(&self.users)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        // Temp files start out 0600; keep the mode of the file being replaced
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e.error)))?;

        info!("Registry: {} users saved to {}", self.users.len(), self.path.display());
        Ok(())
    }

    /// Return the user whose name matches exactly (case-sensitive), or
    /// register a new one under a fresh identity.
    pub fn resolve_user(&mut self, name: &str) -> Result<&mut User> {
        let existing = self
            .users
            .iter()
            .find(|(_, u)| u.name == name)
            .map(|(id, _)| id.clone());

        let id = match existing {
            Some(id) => id,
            None => {
                let id = self.generate_id();
                let user = User::new(id.clone(), name)?;
                info!("Registered new user {}", id);
                self.users.insert(id.clone(), user);
                id
            }
        };

        self.users
            .get_mut(&id)
            .ok_or_else(|| Error::Storage(format!("user {} vanished from registry", id)))
    }

    /// Get a user by identity.
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Get a mutable user by identity.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    /// Find a user by exact display name without creating one.
    pub fn find_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|u| u.name == name)
    }

    /// Iterate users in identity order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // UUID v4 carries 122 random bits, so a clash is practically impossible;
    // the loop only guards against a key already present in a hand-edited file.
    fn generate_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if !self.users.contains_key(&id) {
                return id;
            }
        }
    }
}

fn read_users(path: &Path) -> Result<BTreeMap<String, User>> {
    let data = std::fs::read_to_string(path)?;
    let mut users: BTreeMap<String, User> = serde_json::from_str(&data)?;
    for (id, user) in users.iter_mut() {
        user.id = id.clone();
    }
    Ok(users)
}
