use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::sort_for_listing;
use crate::repositories::traits::ContactRepository;

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout of the data file.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    contacts: Vec<Contact>,
}

/// Contact repository persisted to a single JSON file.
///
/// Every mutation writes a complete snapshot to a sibling temp file, syncs it
/// and renames it over the data file before the in-memory copy is updated.
/// A mutation that returns `Ok` is therefore on disk, and a failed write
/// leaves both the file and the in-memory state unchanged.
///
/// Commits run on their own task, so dropping the caller's future (a client
/// hanging up mid-request) cannot stop one between the rename and the
/// in-memory update.
pub struct JsonFileContactRepository {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    contacts: Mutex<HashMap<ContactId, Contact>>,
}

impl JsonFileContactRepository {
    /// Open the data file, starting empty if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let contacts = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                snapshot
                    .contacts
                    .into_iter()
                    .map(|c| (c.id, c))
                    .collect::<HashMap<_, _>>()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!(
            path = %path.display(),
            contacts = contacts.len(),
            "Opened contact store"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                contacts: Mutex::new(contacts),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Apply `change` to a copy of the contacts, persist it, then publish it.
    async fn commit<T>(
        &self,
        change: impl FnOnce(&mut HashMap<ContactId, Contact>) -> StoreResult<T> + Send + 'static,
    ) -> StoreResult<T>
    where
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let mut contacts = inner.contacts.lock().await;
            let mut next = contacts.clone();
            let result = change(&mut next)?;
            inner.persist(&next).await?;
            *contacts = next;
            Ok::<T, StoreError>(result)
        });

        match task.await {
            Ok(result) => result,
            Err(e) => Err(StoreError::Io(std::io::Error::other(e))),
        }
    }
}

impl Inner {
    async fn persist(&self, contacts: &HashMap<ContactId, Contact>) -> StoreResult<()> {
        let mut ordered: Vec<Contact> = contacts.values().cloned().collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));

        let bytes = serde_json::to_vec_pretty(&Snapshot {
            version: SNAPSHOT_VERSION,
            contacts: ordered,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::OpenOptions::new()
            .write(true)
            .open(&tmp)
            .await?
            .sync_all()
            .await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Snapshot written");
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for JsonFileContactRepository {
    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.inner
            .contacts
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let mut contacts: Vec<Contact> =
            self.inner.contacts.lock().await.values().cloned().collect();
        sort_for_listing(&mut contacts);
        Ok(contacts)
    }

    async fn insert(&self, contact: Contact) -> StoreResult<Contact> {
        self.commit(move |contacts| {
            contacts.insert(contact.id, contact.clone());
            Ok(contact)
        })
        .await
    }

    async fn update(&self, contact: Contact) -> StoreResult<Contact> {
        self.commit(move |contacts| match contacts.get_mut(&contact.id) {
            Some(existing) => {
                *existing = contact.clone();
                Ok(contact)
            }
            None => Err(StoreError::NotFound(contact.id.to_string())),
        })
        .await
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Contact> {
        self.commit(move |contacts| {
            contacts
                .remove(&id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        })
        .await
    }
}
