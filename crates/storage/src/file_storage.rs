use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use models::{codec, identity_key, registry, Class, Object};
use serde_json::{Map, Value};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::engine::{Objects, StorageEngine};
use crate::errors::StorageError;

/// Object store backed by one JSON document.
///
/// The document maps identity key to the object's attributes (see
/// [`models::codec`]). It is read whole on `reload` and rewritten whole on
/// `save`; between the two, objects live in an in-memory cache owned by this
/// instance.
pub struct FileStorage {
    file_path: PathBuf,
    /// `None` while closed.
    objects: Option<HashMap<String, Object>>,
    /// Mutations staged since the last successful save.
    dirty: bool,
}

impl FileStorage {
    /// A closed store for `path`; nothing is read until `reload`.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), objects: None, dirty: false }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn objects(&self) -> Result<&HashMap<String, Object>, StorageError> {
        self.objects.as_ref().ok_or(StorageError::StoreNotOpen)
    }

    fn objects_mut(&mut self) -> Result<&mut HashMap<String, Object>, StorageError> {
        self.objects.as_mut().ok_or(StorageError::StoreNotOpen)
    }

    /// Decode a whole document; any bad record rejects the lot.
    fn decode(&self, bytes: &[u8]) -> Result<HashMap<String, Object>, StorageError> {
        let path = self.file_path.display();
        let records: Map<String, Value> = serde_json::from_slice(bytes)
            .map_err(|e| StorageError::CorruptStore(format!("{path}: {e}")))?;

        let mut objects = HashMap::with_capacity(records.len());
        for (key, record) in records {
            let Value::Object(doc) = record else {
                return Err(StorageError::CorruptStore(format!("{path}: {key} is not a mapping")));
            };
            let obj = codec::from_document(doc)
                .map_err(|e| StorageError::CorruptStore(format!("{path}: {key}: {e}")))?;
            if obj.key() != key {
                return Err(StorageError::CorruptStore(format!(
                    "{path}: record stored under {key} identifies as {}",
                    obj.key()
                )));
            }
            objects.insert(key, obj);
        }
        Ok(objects)
    }

    fn encode(objects: &HashMap<String, Object>) -> Result<Vec<u8>, StorageError> {
        let mut records = Map::new();
        for (key, obj) in objects {
            records.insert(key.clone(), Value::Object(codec::to_document(obj)?));
        }
        serde_json::to_vec(&records).map_err(StorageError::backend("encode store"))
    }
}

fn filter_class(class: Option<&str>) -> Result<Option<Class>, StorageError> {
    Ok(class.map(|name| registry::resolve(name).map(|d| d.class)).transpose()?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `data` beside `path`, fsync, then rename over `path`, so readers see
/// either the old document or the new one.
async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    common::env::ensure_parent_dir(path).await.map_err(StorageError::backend("prepare store dir"))?;
    let tmp = tmp_path(path);
    let written: io::Result<()> = async {
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, path).await
    }
    .await;
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp).await;
        return Err(StorageError::Backend(format!("write {}: {e}", path.display())));
    }
    Ok(())
}

#[async_trait]
impl StorageEngine for FileStorage {
    async fn reload(&mut self) -> Result<(), StorageError> {
        self.objects = None;
        self.dirty = false;

        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(event = "reload", path = %self.file_path.display(), count = 0, "no store file yet; starting empty");
                self.objects = Some(HashMap::new());
                return Ok(());
            }
            Err(e) => return Err(StorageError::Backend(format!("read {}: {e}", self.file_path.display()))),
        };

        let objects = self.decode(&bytes).inspect_err(|e| {
            warn!(event = "reload_failed", path = %self.file_path.display(), error = %e, "store file rejected");
        })?;
        info!(event = "reload", path = %self.file_path.display(), count = objects.len(), "store loaded");
        self.objects = Some(objects);
        Ok(())
    }

    async fn all(&self, class: Option<&str>) -> Result<Objects, StorageError> {
        let class = filter_class(class)?;
        Ok(self
            .objects()?
            .iter()
            .filter(|(_, obj)| class.map_or(true, |c| obj.class() == c))
            .map(|(key, obj)| (key.clone(), obj.clone()))
            .collect())
    }

    async fn new(&mut self, obj: Object) -> Result<(), StorageError> {
        let key = obj.key();
        self.objects_mut()?.insert(key.clone(), obj);
        self.dirty = true;
        debug!(event = "new", %key, "object staged");
        Ok(())
    }

    async fn save(&mut self) -> Result<(), StorageError> {
        let objects = self.objects()?;
        let data = Self::encode(objects)?;
        let count = objects.len();
        write_atomic(&self.file_path, &data).await?;
        self.dirty = false;
        info!(event = "save", path = %self.file_path.display(), count, "store saved");
        Ok(())
    }

    /// Unlike the relational store, removal is written through immediately.
    async fn delete(&mut self, obj: Option<&Object>) -> Result<(), StorageError> {
        let objects = self.objects_mut()?;
        let Some(obj) = obj else { return Ok(()) };
        let key = obj.key();
        if objects.remove(&key).is_some() {
            debug!(event = "delete", %key, "object removed");
        }
        self.dirty = true;
        self.save().await
    }

    async fn get(&self, class: &str, id: &str) -> Result<Option<Object>, StorageError> {
        let class = registry::resolve(class)?.name;
        Ok(self.objects()?.get(&identity_key(class, id)).cloned())
    }

    async fn count(&self, class: Option<&str>) -> Result<usize, StorageError> {
        let class = filter_class(class)?;
        Ok(self
            .objects()?
            .values()
            .filter(|obj| class.map_or(true, |c| obj.class() == c))
            .count())
    }

    /// Flush staged mutations, then drop the cache. On a failed flush the
    /// store stays open so the caller can retry.
    async fn close(&mut self) -> Result<(), StorageError> {
        if self.objects.is_none() {
            return Ok(());
        }
        if self.dirty {
            self.save().await?;
        }
        self.objects = None;
        info!(event = "close", path = %self.file_path.display(), "store closed");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.objects.is_some()
    }
}
