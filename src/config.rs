use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::Catalogs;
use crate::db::Database;
use crate::store::SessionStore;

pub const DATA_DIR_NAME: &str = ".ticket-to-now";
pub const DB_FILE: &str = "store.db";

/// Where the app keeps its state and reads its data from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub tickets: Option<PathBuf>,
    pub breath: Option<PathBuf>,
    /// Breathing animation steps per second.
    pub fps: u32,
}

/// Walk up from `start` looking for a `.ticket-to-now` directory.
pub fn find_data_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            return Ok(dir.clone());
        }

        let cwd = env::current_dir()?;
        match find_data_dir(&cwd) {
            Some(dir) => Ok(dir),
            None => bail!(
                "No {} directory here (or in any parent). Run 'ticket-to-now init' first.",
                DATA_DIR_NAME
            ),
        }
    }

    pub fn open_store(&self) -> Result<SessionStore> {
        let db_path = self.data_dir()?.join(DB_FILE);
        let db = Database::open(&db_path).context("Failed to open store")?;
        Ok(SessionStore::new(db))
    }

    pub fn load_catalogs(&self) -> Catalogs {
        Catalogs::load(self.tickets.as_deref(), self.breath.as_deref())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
