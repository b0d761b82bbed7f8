use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ClientError;

pub const SESSION_FILE: &str = ".teller_session";

/// Token saved by `teller login` and reused by the other client commands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub url: String,
    pub username: String,
    pub token: String,
}

impl Session {
    pub fn default_path() -> PathBuf {
        PathBuf::from(SESSION_FILE)
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| ClientError::Session(format!("cannot write {}: {}", path.display(), e)))
    }

    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let data = std::fs::read_to_string(path).map_err(|_| {
            ClientError::Session("no saved session, run `teller login` first".to_string())
        })?;
        serde_json::from_str(&data).map_err(|e| ClientError::Session(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILE);
        let session = Session {
            url: "http://127.0.0.1:3000".to_string(),
            username: "user1".to_string(),
            token: "abc.def.ghi".to_string(),
        };

        session.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), session);
    }

    #[test]
    fn test_missing_session() {
        let dir = TempDir::new().unwrap();
        let err = Session::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ClientError::Session(_)));
    }
}
