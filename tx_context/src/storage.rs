// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::error::{Error, Result};
#[cfg(test)]
use mockall::automock;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The key the last seen transaction count is kept under.
pub const TRANSACTION_COUNT_KEY: &str = "transactionCount";
const LOCAL_STORAGE_FILENAME: &str = "local_storage.json";

/// Remembers the last transaction count seen on the ledger, for display only.
#[cfg_attr(test, automock)]
pub trait CountStore {
    fn load(&self) -> Result<Option<u64>>;
    fn save(&mut self, count: u64) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryCountStore {
    count: Option<u64>,
}

impl MemoryCountStore {
    pub fn with_count(count: u64) -> Self {
        Self { count: Some(count) }
    }
}

impl CountStore for MemoryCountStore {
    fn load(&self) -> Result<Option<u64>> {
        Ok(self.count)
    }

    fn save(&mut self, count: u64) -> Result<()> {
        self.count = Some(count);
        Ok(())
    }
}

/// A JSON object of string values on disk, in the manner of a browser's local storage.
#[derive(Clone, Debug)]
pub struct FileCountStore {
    path: PathBuf,
}

impl FileCountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/tx_ledger/local_storage.json`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs_next::data_dir().ok_or(Error::DataDirUnavailable)?;
        Ok(dir.join("tx_ledger").join(LOCAL_STORAGE_FILENAME))
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            debug!("No local storage at {:?} yet", self.path);
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .inspect_err(|err| error!("Error reading local storage {:?}: {err:?}", self.path))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries = serde_json::from_str(&contents)
            .inspect_err(|err| error!("Error deserializing local storage: {err:?}"))?;
        Ok(entries)
    }
}

impl CountStore for FileCountStore {
    fn load(&self) -> Result<Option<u64>> {
        let entries = self.read_entries()?;
        match entries.get(TRANSACTION_COUNT_KEY) {
            Some(value) => {
                let count = value.parse().map_err(|_| Error::CorruptStorage {
                    key: TRANSACTION_COUNT_KEY.to_string(),
                    value: value.clone(),
                })?;
                Ok(Some(count))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, count: u64) -> Result<()> {
        debug!("Saving {TRANSACTION_COUNT_KEY}={count} to {:?}", self.path);
        // other keys are kept as they are
        let mut entries = self.read_entries()?;
        entries.insert(TRANSACTION_COUNT_KEY.to_string(), count.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).inspect_err(|err| {
                error!("Error creating local storage parent {parent:?}: {err:?}")
            })?;
        }

        let json = serde_json::to_string(&entries)?;
        let mut file = std::fs::File::create(&self.path)
            .inspect_err(|err| error!("Error creating local storage file: {err:?}"))?;
        file.write_all(json.as_bytes())
            .inspect_err(|err| error!("Error writing to local storage: {err:?}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_matches::assert_matches;
    use predicates::prelude::*;

    #[test]
    fn missing_file_should_load_as_no_count() -> eyre::Result<()> {
        let tmp_dir = assert_fs::TempDir::new()?;
        let store = FileCountStore::new(tmp_dir.child("local_storage.json").path());

        assert_eq!(store.load()?, None);
        Ok(())
    }

    #[test]
    fn empty_file_should_load_as_no_count() -> eyre::Result<()> {
        let tmp_dir = assert_fs::TempDir::new()?;
        let file = tmp_dir.child("local_storage.json");
        file.touch()?;

        assert_eq!(FileCountStore::new(file.path()).load()?, None);
        Ok(())
    }

    #[test]
    fn saved_count_should_be_stored_as_a_string_and_keep_other_keys() -> eyre::Result<()> {
        let tmp_dir = assert_fs::TempDir::new()?;
        let file = tmp_dir.child("nested").child("local_storage.json");
        let mut store = FileCountStore::new(file.path());

        store.save(3)?;
        assert_eq!(store.load()?, Some(3));

        file.write_str(r#"{"theme":"dark","transactionCount":"3"}"#)?;
        store.save(4)?;

        file.assert(predicate::str::contains(r#""transactionCount":"4""#));
        file.assert(predicate::str::contains(r#""theme":"dark""#));
        assert_eq!(FileCountStore::new(file.path()).load()?, Some(4));
        Ok(())
    }

    #[test]
    fn non_numeric_count_should_be_corrupt() -> eyre::Result<()> {
        let tmp_dir = assert_fs::TempDir::new()?;
        let file = tmp_dir.child("local_storage.json");
        file.write_str(r#"{"transactionCount":"many"}"#)?;

        assert_matches!(
            FileCountStore::new(file.path()).load(),
            Err(Error::CorruptStorage { value, .. }) if value == "many"
        );
        Ok(())
    }

    #[test]
    fn memory_store_should_remember_the_last_count() -> eyre::Result<()> {
        let mut store = MemoryCountStore::default();
        assert_eq!(store.load()?, None);

        store.save(7)?;
        assert_eq!(store.load()?, Some(7));
        assert_eq!(MemoryCountStore::with_count(2).load()?, Some(2));
        Ok(())
    }
}
