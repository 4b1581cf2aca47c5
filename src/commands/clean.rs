//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Papyrus;

/// Remove generated output
pub fn run(app: &Papyrus) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_public_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("public/posts")).unwrap();
        fs::write(tmp.path().join("public/index.html"), "x").unwrap();

        let app = Papyrus::new(tmp.path()).unwrap();
        run(&app).unwrap();
        assert!(!app.public_dir.exists());

        // Cleaning an already-clean site is fine
        run(&app).unwrap();
    }
}
