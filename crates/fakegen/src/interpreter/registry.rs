//! Provider registry and the per-faker instance cache.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::iter::successors;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::interpreter::{EvalError, Provider, compute_suggestions};

/// Builds (or fetches) the provider behind a registered name.
pub type ProviderFactory = Box<dyn Fn(&ProviderCache) -> Arc<dyn Provider> + Send + Sync>;

type Instance = Arc<dyn Any + Send + Sync>;

const CHUNK_LEN: usize = 16;

/// A fixed run of write-once slots, linked to the next run once full.
struct Chunk {
    slots: [OnceLock<(TypeId, Instance)>; CHUNK_LEN],
    next: OnceLock<Box<Chunk>>,
}

impl Chunk {
    fn new() -> Self {
        Self {
            slots: [const { OnceLock::new() }; CHUNK_LEN],
            next: OnceLock::new(),
        }
    }
}

/// Memoizing store of provider instances, one per concrete type.
///
/// Instances live in append-only write-once slots, so looking up an existing
/// instance never takes a lock. First access to a type serializes on a
/// creation mutex and re-checks the slots, so racing callers all receive the
/// same [`Arc`] and the factory runs at most once per type.
pub struct ProviderCache {
    head: Chunk,
    creation: Mutex<()>,
}

impl Default for ProviderCache {
    fn default() -> Self {
        Self {
            head: Chunk::new(),
            creation: Mutex::new(()),
        }
    }
}

impl ProviderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached `P`, creating it with `factory` on first access.
    pub fn get_or_create<P>(&self, factory: impl FnOnce() -> P) -> Arc<P>
    where
        P: Any + Send + Sync,
    {
        if let Some(instance) = self.find::<P>() {
            return instance;
        }

        let _creating = self.creation.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = self.find::<P>() {
            return instance;
        }
        debug!(provider = type_name::<P>(), "creating provider instance");
        let created = Arc::new(factory());
        self.append(TypeId::of::<P>(), Arc::clone(&created) as Instance);
        created
    }

    /// Number of instances created so far.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// True if no provider has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filled slots in creation order. Slots fill front to back, so the
    /// first empty one ends the walk.
    fn entries(&self) -> impl Iterator<Item = &(TypeId, Instance)> {
        successors(Some(&self.head), |&chunk| chunk.next.get().map(Box::as_ref))
            .flat_map(|chunk| chunk.slots.iter())
            .map_while(OnceLock::get)
    }

    fn find<P: Any + Send + Sync>(&self) -> Option<Arc<P>> {
        let id = TypeId::of::<P>();
        self.entries()
            .find(|(entry_id, _)| *entry_id == id)
            .and_then(|(_, instance)| Arc::clone(instance).downcast::<P>().ok())
    }

    /// Store `instance` in the first empty slot. Callers hold `creation`.
    fn append(&self, id: TypeId, instance: Instance) {
        let mut chunk = &self.head;
        loop {
            if let Some(slot) = chunk.slots.iter().find(|slot| slot.get().is_none()) {
                slot.get_or_init(|| (id, instance));
                return;
            }
            chunk = chunk.next.get_or_init(|| Box::new(Chunk::new()));
        }
    }
}

/// A registry mapping provider names to factories.
///
/// Names match case-insensitively and ignore underscores, so
/// `EnglandFootball`, `englandfootball` and `england_football` are the same
/// provider.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: &str, factory: ProviderFactory) {
        self.factories.insert(normalize_name(name), factory);
    }

    /// True if a provider is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&normalize_name(name))
    }

    /// Get the provider registered under `name`.
    ///
    /// Unknown names produce [`EvalError::UnknownProvider`] with suggestions.
    pub fn get(&self, name: &str, cache: &ProviderCache) -> Result<Arc<dyn Provider>, EvalError> {
        let key = normalize_name(name);
        match self.factories.get(&key) {
            Some(factory) => Ok(factory(cache)),
            None => Err(EvalError::UnknownProvider {
                name: name.to_string(),
                suggestions: compute_suggestions(&key, &self.names()),
            }),
        }
    }

    /// Sorted normalized names of every registered provider.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Lowercase `name` and drop underscores.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
