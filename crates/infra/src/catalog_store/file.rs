//! Flat-file catalog storage.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use toystore_inventory::Inventory;
use tracing::{debug, info};

use super::r#trait::{CatalogError, CatalogStore, LoadedCatalog};

/// Load the catalog at `path`.
///
/// A missing file is not an error: it is created empty (along with any
/// missing parent directories) and the inventory starts empty.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<LoadedCatalog, CatalogError> {
    let path = path.as_ref();
    let read_err = |source: std::io::Error| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    };

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if let Some(parent) = non_empty_parent(path) {
                fs::create_dir_all(parent).map_err(read_err)?;
            }
            File::create(path).map_err(read_err)?;
            info!(path = %path.display(), "Created empty catalog");
            Vec::new()
        }
        Err(e) => return Err(read_err(e)),
    };

    let loaded = LoadedCatalog::from_bytes(&bytes);
    info!(
        path = %path.display(),
        size = loaded.inventory.len(),
        skipped = loaded.errors.len(),
        "Loaded catalog"
    );
    Ok(loaded)
}

/// Replace the catalog at `path` with the full inventory.
///
/// The text goes to a temporary file in the same directory, is synced, then
/// renamed over the target. An existing catalog keeps its permissions.
pub fn save_catalog(inventory: &Inventory, path: impl AsRef<Path>) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let write_err = |source: std::io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = non_empty_parent(path).unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged
        .write_all(inventory.encode().as_bytes())
        .map_err(write_err)?;
    match fs::metadata(path) {
        Ok(existing) => staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(write_err(e)),
    }
    staged.as_file().sync_all().map_err(write_err)?;
    debug!(staged = %staged.path().display(), "Staged catalog");

    staged.persist(path).map_err(|e| write_err(e.error))?;
    info!(path = %path.display(), size = inventory.len(), "Saved catalog");
    Ok(())
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}

/// [`CatalogStore`] backed by one text file.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for FileCatalogStore {
    fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        load_catalog(&self.path)
    }

    fn save(&self, inventory: &Inventory) -> Result<(), CatalogError> {
        save_catalog(inventory, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "0001112223;Captain Nova;Hasbro;19.99;4;8;A\n\
                           2000000001;Teddy Bear;Gund;25.0;3;0;Plush;M\n\
                           8000000000;Hexfall;Stonemaier;59.50;2;12;2-5;Ada Park, Lee Kim\n";

    #[test]
    fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("res").join("toys.txt");

        let loaded = load_catalog(&path).unwrap();
        assert!(loaded.inventory.is_empty());
        assert!(loaded.errors.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn malformed_line_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("toys.txt");
        fs::write(
            &path,
            "abc;Name;Brand;9.99;5;3;A\n0001112223;Captain Nova;Hasbro;19.99;4;8;A\n",
        )
        .unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded.inventory.len(), 1);
        assert_eq!(loaded.errors.len(), 1);
        assert_eq!(loaded.errors[0].line, 1);
    }

    #[test]
    fn badly_encoded_line_does_not_block_the_load() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("toys.txt");
        fs::write(
            &path,
            b"0001112223;Captain Nova;Hasbro;19.99;4;8;A\n1000000000;Caf\xe9 Knight;Lego;1;1;5;H\n",
        )
        .unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded.inventory.len(), 1);
        assert!(loaded.inventory.get("0001112223").is_some());
        assert_eq!(loaded.errors.len(), 1);
        assert_eq!(loaded.errors[0].line, 2);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_catalog_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("toys.txt");
        fs::write(&path, CATALOG).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let loaded = load_catalog(&path).unwrap();
        save_catalog(&loaded.inventory, &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn unmodified_catalog_saves_byte_for_byte() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("toys.txt");
        fs::write(&path, CATALOG).unwrap();

        let loaded = load_catalog(&path).unwrap();
        save_catalog(&loaded.inventory, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), CATALOG);
        let reloaded = load_catalog(&path).unwrap();
        assert_eq!(reloaded.inventory, loaded.inventory);
    }

    #[test]
    fn save_rewrites_rather_than_appends() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let store = FileCatalogStore::new(dir.path().join("toys.txt"));
        fs::write(store.path(), CATALOG).unwrap();

        let mut inventory = store.load().unwrap().inventory;
        inventory.remove("2000000001").unwrap();
        store.save(&inventory).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("Teddy Bear"));

        // Only the catalog itself remains; the staging file was renamed away.
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn failed_save_reports_path() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("missing").join("toys.txt");

        let err = save_catalog(&Inventory::new(), &path).unwrap_err();
        match err {
            CatalogError::Write { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected write error, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn failed_rename_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let target = dir.path().join("toys.txt");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(save_catalog(&Inventory::new(), &target).is_err());

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
        assert_eq!(fs::read_to_string(target.join("keep")).unwrap(), "x");
    }
}
