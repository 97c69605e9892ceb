use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{DATA_DIR_NAME, DB_FILE};
use crate::db::Database;

pub fn run(path: &Path) -> Result<()> {
    let data_dir = path.join(DATA_DIR_NAME);

    if data_dir.exists() {
        println!("Already initialized at {}", data_dir.display());
        return Ok(());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {} directory", DATA_DIR_NAME))?;
    Database::open(&data_dir.join(DB_FILE))?;
    println!("Created {}", data_dir.display());

    println!("\nNext steps:");
    println!("  ticket-to-now               # Start an interactive session");
    println!("  ticket-to-now draw 42       # Draw ticket #42");
    println!("  ticket-to-now random        # Draw a random ticket");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_fresh_init() {
        let dir = tempdir().unwrap();
        let result = run(dir.path());
        assert!(result.is_ok());

        assert!(dir.path().join(DATA_DIR_NAME).is_dir());
        assert!(dir.path().join(DATA_DIR_NAME).join(DB_FILE).exists());
    }

    #[test]
    fn test_run_already_initialized() {
        let dir = tempdir().unwrap();
        run(dir.path()).unwrap();

        let db = Database::open(&dir.path().join(DATA_DIR_NAME).join(DB_FILE)).unwrap();
        db.set_item("savedTickets", "[]").unwrap();
        drop(db);

        assert!(run(dir.path()).is_ok());
        let db = Database::open(&dir.path().join(DATA_DIR_NAME).join(DB_FILE)).unwrap();
        assert_eq!(db.get_item("savedTickets").unwrap().as_deref(), Some("[]"));
    }
}
