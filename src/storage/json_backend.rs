//! JSON file persistence for the room ledger.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::errors::Result;
use crate::domain::RoomLedger;

use super::LedgerStore;

const DATA_FILE_NAME: &str = "rooms_data.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger as a single UTF-8 JSON file: an object mapping room
/// id to the positional `[name, laptops, no_laptops, balance]` record.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_file: PathBuf,
}

impl JsonStore {
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Uses the conventional data file name inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DATA_FILE_NAME))
    }

    /// Platform data directory for the application, falling back to the
    /// working directory when the platform offers none.
    pub fn default_location() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("room_ledger")
            .join(DATA_FILE_NAME)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl LedgerStore for JsonStore {
    fn load(&self) -> Result<RoomLedger> {
        let data = fs::read_to_string(&self.data_file)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, ledger: &RoomLedger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.data_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.data_file)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempdir().unwrap();
        let store = JsonStore::in_dir(temp.path());

        let mut ledger = RoomLedger::seeded();
        ledger.room_mut("41").unwrap().accumulated_balance = 75.0;
        store.save(&ledger).expect("save ledger");

        let restored = store.load().expect("load ledger");
        assert_eq!(restored, ledger);
    }

    #[test]
    fn load_fails_when_file_is_missing() {
        let temp = tempdir().unwrap();
        let store = JsonStore::in_dir(temp.path());
        assert!(store.load().is_err());
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let temp = tempdir().unwrap();
        let store = JsonStore::in_dir(temp.path());
        fs::write(store.data_file(), "{not json").unwrap();
        assert!(store.load().is_err());
    }
}
