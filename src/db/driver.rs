use std::path::Path;

use anyhow::Result;
use bincode::{
    config::{BigEndian, WithOtherEndian},
    DefaultOptions, Options,
};
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db as Sled, Tree};

type Encoder = WithOtherEndian<DefaultOptions, BigEndian>;

fn encoder() -> Encoder {
    bincode::options().with_big_endian()
}

pub struct Db {
    handle: Sled,
}
impl Db {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let handle = sled::open(path)?;
        Ok(Self { handle })
    }

    /// Opens (or creates) the named collection, backed by its own sled tree.
    pub fn collection(&self, name: &str) -> Result<Collection> {
        let tree = self.handle.open_tree(name)?;
        Ok(Collection {
            name: name.to_string(),
            tree,
            ids: self.handle.clone(),
            encoder: encoder(),
        })
    }

    pub async fn flush(&self) -> Result<()> {
        self.handle.flush_async().await?;
        Ok(())
    }
}

/// A named group of bincode-encoded documents keyed by string ids.
#[derive(Clone)]
pub struct Collection {
    name: String,
    tree: Tree,
    ids: Sled,
    encoder: Encoder,
}
impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    // Fixed-width hex so that lexical key order is allocation order.
    pub fn next_key(&self) -> Result<String> {
        let id = self.ids.generate_id()?;
        Ok(format!("{:016x}", id))
    }

    // CRUD
    pub fn insert<T: Serialize, K: AsRef<str>>(&self, key: K, value: &T) -> Result<()> {
        let key = key.as_ref();
        let value = self.encoder.serialize(value)?;
        self.tree.insert(key, value)?;
        Ok(())
    }
    pub fn get<T: DeserializeOwned, K: AsRef<str>>(&self, key: K) -> Result<Option<T>> {
        let key = key.as_ref();
        let value = match self.tree.get(key)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let value = self.encoder.deserialize(&value)?;
        Ok(Some(value))
    }
    /// Returns whether a document was removed.
    pub fn remove<K: AsRef<str>>(&self, key: K) -> Result<bool> {
        let key = key.as_ref();
        let previous = self.tree.remove(key)?;
        Ok(previous.is_some())
    }

    // Iterators
    pub fn iter<'a, T: DeserializeOwned + 'a>(
        &'a self,
    ) -> impl Iterator<Item = Result<(String, T)>> + 'a {
        self.tree.iter().map(move |item| {
            let (key, value) = item?;
            let key = String::from_utf8(key.to_vec())?;
            let value = self.encoder.deserialize(&value)?;
            Ok((key, value))
        })
    }
}

// Required Debug implementations for the sled handles
impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db").finish()
    }
}
impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .finish()
    }
}
