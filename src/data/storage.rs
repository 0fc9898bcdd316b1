use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

/*
* The journal's stand-in for browser local storage: a flat string-to-
* string map shared by the geocode cache, the visited-places fallback
* and the trip planner. Injected everywhere it is read or written, so
* tests swap in a memory-backed double.
*
* Writes are best effort. A set that cannot be persisted keeps the
* in-memory value and logs, mirroring how the pages shrug off a full
* or disabled browser store.
*/
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str);
}

#[derive(Default)]
pub struct MemStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemStore {
  pub fn new() -> Self {
    MemStore::default()
  }
}

impl KeyValueStore for MemStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.lock().ok()?.get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) {
    if let Ok(mut entries) = self.entries.lock() {
      entries.insert(key.to_owned(), value.to_owned());
    }
  }
}

/*
* Single-file JSON store. The whole map is rewritten through a temp
* file on every set so a crash mid-write can never corrupt the file;
* each key remains an atomic string replace.
*/
pub struct FileStore {
  path: PathBuf,
  entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
  pub fn open(path: &Path) -> Self {
    let entries = match File::open(path) {
      Ok(file) => {
        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, HashMap<String, String>>(reader) {
          Ok(map) => map,
          Err(err) => {
            warn!(path = %path.display(), %err, "unreadable storage file, starting empty");
            HashMap::new()
          }
        }
      }
      Err(_) => {
        debug!(path = %path.display(), "no storage file yet, starting empty");
        HashMap::new()
      }
    };
    FileStore {
      path: path.to_path_buf(),
      entries: Mutex::new(entries),
    }
  }

  fn persist(&self, entries: &HashMap<String, String>) -> std::io::Result<()> {
    let parent_dir = self.path.parent().unwrap_or_else(|| Path::new("."));
    if !parent_dir.as_os_str().is_empty() {
      fs::create_dir_all(parent_dir)?;
    }
    let parent_for_temp = if parent_dir.as_os_str().is_empty() { Path::new(".") } else { parent_dir };
    let temp_file = NamedTempFile::new_in(parent_for_temp)?;
    let writer = BufWriter::new(&temp_file);
    serde_json::to_writer(writer, entries)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    temp_file.persist(&self.path)?;
    Ok(())
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.lock().ok()?.get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) {
    let Ok(mut entries) = self.entries.lock() else {
      return;
    };
    entries.insert(key.to_owned(), value.to_owned());
    if let Err(err) = self.persist(&entries) {
      warn!(path = %self.path.display(), %err, "could not persist storage");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn mem_store_round_trips() {
    let store = MemStore::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v");
    assert_eq!(store.get("k"), Some("v".to_owned()));
    store.set("k", "v2");
    assert_eq!(store.get("k"), Some("v2".to_owned()));
  }

  #[test]
  fn file_store_survives_reopen() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("journal.json");
    {
      let store = FileStore::open(&path);
      store.set("Paris,France", r#"{"lat":48.8,"lon":2.3}"#);
    }
    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get("Paris,France"), Some(r#"{"lat":48.8,"lon":2.3}"#.to_owned()));
  }

  #[test]
  fn corrupt_file_starts_empty() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "not json at all").expect("seed file");
    let store = FileStore::open(&path);
    assert_eq!(store.get("anything"), None);
    // the store stays usable
    store.set("anything", "works");
    assert_eq!(store.get("anything"), Some("works".to_owned()));
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let dir = tempdir().expect("temp dir");
    let store = FileStore::open(&dir.path().join("absent.json"));
    assert_eq!(store.get("k"), None);
  }
}
