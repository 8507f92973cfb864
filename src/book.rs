//! The lists of one chat
//!
//! `ListBook` owns every list of a session together with the store that
//! persists them, and the "current list" binding used by multi-step
//! workflows. The binding is only a name: looking it up again after the
//! list was deleted yields `NotFound` instead of a dangling reference.

use crate::store::{self, ItemList, ListError, ListResult, ListStore};
use std::collections::BTreeMap;

pub struct ListBook<S: ListStore> {
    store: S,
    lists: BTreeMap<String, ItemList>,
    current: Option<String>,
}

impl<S: ListStore> ListBook<S> {
    /// Load every list file the store can find.
    ///
    /// Files that cannot be read are skipped; only a failure to enumerate
    /// the directory itself is an error.
    pub fn open(store: S) -> ListResult<Self> {
        let mut lists = BTreeMap::new();
        for (name, path) in store.discover()? {
            match store.load(&path) {
                Ok(items) => {
                    lists.insert(name.clone(), ItemList::new(name, path, items));
                }
                Err(e) => {
                    tracing::warn!(
                        list = %name,
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable list file"
                    );
                }
            }
        }

        tracing::info!(
            dir = %store.dir().display(),
            lists = lists.len(),
            "Loaded lists"
        );

        Ok(Self {
            store,
            lists,
            current: None,
        })
    }

    /// List names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn get(&self, name: &str) -> ListResult<&ItemList> {
        self.lists
            .get(name)
            .ok_or_else(|| ListError::NotFound(name.to_string()))
    }

    /// Create an empty list, persist it and make it current
    pub fn create(&mut self, name: &str) -> ListResult<&ItemList> {
        store::validate_name(name)?;
        if self.lists.contains_key(name) {
            return Err(ListError::AlreadyExists(name.to_string()));
        }

        let path = self.store.path_for(name);
        self.store.save(&path, &[])?;

        tracing::info!(list = %name, path = %path.display(), "Created list");
        self.current = Some(name.to_string());
        Ok(&*self
            .lists
            .entry(name.to_string())
            .or_insert_with(|| ItemList::new(name, path, Vec::new())))
    }

    /// Make an existing list the target of the running workflow
    pub fn bind(&mut self, name: &str) -> ListResult<&ItemList> {
        let list = self
            .lists
            .get(name)
            .ok_or_else(|| ListError::NotFound(name.to_string()))?;
        self.current = Some(name.to_string());
        Ok(list)
    }

    pub fn unbind(&mut self) {
        self.current = None;
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> ListResult<&ItemList> {
        let name = self.current.as_deref().unwrap_or_default();
        self.get(name)
    }

    /// Apply `op` to the current list and persist the result.
    ///
    /// `op` runs on a copy; the copy replaces the in-memory items only once
    /// it has been saved, so a rejected or failed edit changes nothing.
    pub fn update_current<T>(
        &mut self,
        op: impl FnOnce(&mut Vec<String>) -> ListResult<T>,
    ) -> ListResult<T> {
        let name = self.current.as_deref().unwrap_or_default();
        let list = self
            .lists
            .get_mut(name)
            .ok_or_else(|| ListError::NotFound(name.to_string()))?;

        let mut staged = list.items.clone();
        let value = op(&mut staged)?;
        self.store.save(&list.path, &staged)?;
        list.items = staged;

        tracing::debug!(list = %list.name, items = list.items.len(), "Saved list");
        Ok(value)
    }

    /// Remove the current list's file, then forget the list.
    ///
    /// If the file cannot be removed the list stays in the book.
    pub fn delete_current(&mut self) -> ListResult<ItemList> {
        let name = self.current.clone().unwrap_or_default();
        let path = self.get(&name)?.path.clone();

        self.store.remove(&path)?;

        self.current = None;
        let removed = self
            .lists
            .remove(&name)
            .ok_or_else(|| ListError::NotFound(name.clone()))?;
        tracing::info!(list = %name, path = %path.display(), "Deleted list");
        Ok(removed)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
