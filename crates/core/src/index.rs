//! Snapshot of remote object state
//!
//! The index is built once, before any upload decision, by paginating the
//! bucket listing until it is exhausted. It is never refreshed during a run.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::traits::{DEFAULT_MAX_KEYS, ListOptions, ObjectStore, RemoteObject};

/// Map of remote key to entity tag
#[derive(Debug, Clone, Default)]
pub struct RemoteIndex {
    objects: HashMap<String, String>,
}

impl RemoteIndex {
    /// List every object under `prefix` (flat, no delimiter) and index it.
    ///
    /// Any failed page aborts the build; a partial index is never returned.
    pub async fn build<S>(store: &S, prefix: &str) -> Result<Self>
    where
        S: ObjectStore + ?Sized,
    {
        let mut objects = HashMap::new();
        let mut marker: Option<String> = None;

        loop {
            let options = ListOptions {
                prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
                delimiter: None,
                marker: marker.clone(),
                max_keys: DEFAULT_MAX_KEYS,
            };

            let page = store.list_objects(options).await?;

            if page.truncated && page.entries.is_empty() {
                return Err(Error::Network(
                    "Listing reported more results but returned no entries".to_string(),
                ));
            }

            for object in page.entries {
                marker = Some(object.key.clone());
                objects.insert(object.key, object.etag);
            }

            tracing::debug!("{} objects loaded", objects.len());

            if !page.truncated {
                break;
            }
        }

        Ok(Self { objects })
    }

    /// Entity tag recorded for `key`, if the object exists
    pub fn etag(&self, key: &str) -> Option<&str> {
        self.objects.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<RemoteObject> for RemoteIndex {
    fn from_iter<I: IntoIterator<Item = RemoteObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().map(|o| (o.key, o.etag)).collect(),
        }
    }
}
