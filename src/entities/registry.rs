// 📒 Registry - ordered, in-memory store for one entity type
//
// Every entity type gets exactly one registry. The registry is the single
// source of truth for that type: insertion order is preserved, reads hand
// out snapshots, and nothing is ever removed except by an explicit clear().
//
// Handles are cheap to clone and all clones share the same store, so a
// registry can be injected into whatever query needs it.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::error::{DiningError, Result};

// ============================================================================
// ENTITY TRAITS
// ============================================================================

/// Anything that can live in a [`Registry`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable type name used in logs and errors ("Customer", ...).
    const KIND: &'static str;

    /// Stable identity (UUID) - never changes.
    fn id(&self) -> &str;
}

/// Entities that carry a display name.
pub trait Named {
    fn name(&self) -> &str;
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct Registry<T: Entity> {
    /// All registered entities, in creation order
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Registry {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // Records are plain values, so a writer that panicked mid-push cannot
    // leave them half-built; recover the guard instead of propagating.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entity and return a snapshot of it
    pub fn register(&self, entity: T) -> T {
        let mut items = self.write();
        debug!(kind = T::KIND, id = entity.id(), size = items.len() + 1, "Registered");
        items.push(entity.clone());
        entity
    }

    /// All entities in insertion order (snapshot)
    pub fn all(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Find entity by UUID
    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.read().iter().find(|item| item.id() == id).cloned()
    }

    /// Resolve an id, failing with NotFound when it is not registered
    pub fn get(&self, id: &str) -> Result<T> {
        self.find_by_id(id).ok_or_else(|| DiningError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
    }

    /// Every entity matching `predicate`, insertion order preserved.
    ///
    /// The whole scan runs under one read lock, so it never observes a
    /// half-finished append.
    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.read().iter().filter(|item| predicate(item)).cloned().collect()
    }

    /// Mutate an entity's values in place; identity is untouched
    pub fn update<F>(&self, id: &str, update_fn: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.write();
        let item = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| DiningError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;

        update_fn(item);
        debug!(kind = T::KIND, id, "Updated");
        Ok(item.clone())
    }

    /// Drop every entity (test isolation / shell `reset`)
    pub fn clear(&self) {
        let mut items = self.write();
        info!(kind = T::KIND, dropped = items.len(), "Cleared");
        items.clear();
    }
}

impl<T: Entity + Named> Registry<T> {
    /// First entity with exactly this name, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<T> {
        self.read().iter().find(|item| item.name() == name).cloned()
    }
}

impl<T: Entity> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Registry {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Entity> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Plate {
        id: String,
        name: String,
    }

    impl Plate {
        fn new(id: &str, name: &str) -> Self {
            Plate { id: id.to_string(), name: name.to_string() }
        }
    }

    impl Entity for Plate {
        const KIND: &'static str = "Plate";

        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Named for Plate {
        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_register_preserves_insertion_order() {
        let registry = Registry::new();
        registry.register(Plate::new("3", "soup"));
        registry.register(Plate::new("1", "bread"));
        registry.register(Plate::new("2", "cake"));

        let ids: Vec<String> = registry.all().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(registry.count(), 3);
    }

    #[test]
    fn test_snapshot_mutation_does_not_touch_registry() {
        let registry = Registry::new();
        registry.register(Plate::new("1", "bread"));

        let mut snapshot = registry.all();
        snapshot.clear();
        snapshot.push(Plate::new("9", "ghost"));

        assert_eq!(registry.count(), 1);
        assert!(registry.find_by_id("9").is_none());
    }

    #[test]
    fn test_clones_share_one_store() {
        let registry = Registry::new();
        let handle = registry.clone();

        handle.register(Plate::new("1", "bread"));
        assert_eq!(registry.count(), 1);

        registry.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_find_by_id_and_get() {
        let registry = Registry::new();
        registry.register(Plate::new("1", "bread"));

        assert_eq!(registry.find_by_id("1").unwrap().name, "bread");
        assert!(registry.find_by_id("2").is_none());

        let err = registry.get("2").unwrap_err();
        assert_eq!(err, DiningError::NotFound { kind: "Plate", id: "2".to_string() });
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let registry = Registry::new();
        registry.register(Plate::new("1", "soup"));
        registry.register(Plate::new("2", "soup"));

        assert_eq!(registry.find_by_name("soup").unwrap().id, "1");
        assert!(registry.find_by_name("stew").is_none());
    }

    #[test]
    fn test_filter_keeps_order() {
        let registry = Registry::new();
        for (id, name) in [("1", "a"), ("2", "b"), ("3", "a"), ("4", "c"), ("5", "a")] {
            registry.register(Plate::new(id, name));
        }

        let ids: Vec<String> = registry
            .filter(|p| p.name == "a")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_update_changes_values_not_identity() {
        let registry = Registry::new();
        registry.register(Plate::new("1", "bread"));

        let updated = registry
            .update("1", |p| p.name = "toast".to_string())
            .unwrap();
        assert_eq!(updated.id, "1");
        assert_eq!(registry.find_by_id("1").unwrap().name, "toast");
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_update_missing_entity_fails() {
        let registry: Registry<Plate> = Registry::new();
        let result = registry.update("nope", |p| p.name = "x".to_string());
        assert!(matches!(result, Err(DiningError::NotFound { kind: "Plate", .. })));
    }
}
