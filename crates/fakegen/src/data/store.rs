//! Per-locale hierarchical data store.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::slice;

use serde::Serialize;

use crate::interpreter::LocaleChain;

/// A node of a locale's data tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DataNode {
    /// A single value.
    Text(String),
    /// Candidate values, one of which is picked at random.
    List(Vec<String>),
    /// Named children, keyed by lowercase name.
    Table(BTreeMap<String, DataNode>),
}

impl DataNode {
    /// The candidate values of a leaf; `None` for tables.
    pub fn values(&self) -> Option<&[String]> {
        match self {
            DataNode::Text(text) => Some(slice::from_ref(text)),
            DataNode::List(values) => Some(values),
            DataNode::Table(_) => None,
        }
    }

    /// Follow a dotted path of lowercase segments.
    fn get_path(&self, key: &str) -> Option<&DataNode> {
        key.split('.').try_fold(self, |node, segment| match node {
            DataNode::Table(children) => children.get(segment),
            DataNode::Text(_) | DataNode::List(_) => None,
        })
    }

    /// Lay `incoming` over `self`: leaves in `incoming` replace existing
    /// nodes, tables merge key by key.
    fn overlay(&mut self, incoming: DataNode) {
        match (self, incoming) {
            (DataNode::Table(existing), DataNode::Table(children)) => {
                for (key, child) in children {
                    match existing.entry(key) {
                        Entry::Occupied(mut entry) => entry.get_mut().overlay(child),
                        Entry::Vacant(entry) => {
                            entry.insert(child);
                        }
                    }
                }
            }
            (node, incoming) => *node = incoming,
        }
    }

    fn collect_keys(&self, prefix: &str, keys: &mut Vec<String>) {
        match self {
            DataNode::Table(children) => {
                for (name, child) in children {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    child.collect_keys(&path, keys);
                }
            }
            DataNode::Text(_) | DataNode::List(_) => keys.push(prefix.to_string()),
        }
    }
}

/// Data trees for every locale that has data.
///
/// Read-only during generation; sources are merged in through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    locales: HashMap<String, DataNode>,
}

impl DataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merge `source` into the tree of `locale`.
    ///
    /// Later sources win for every leaf they define; keys they leave out are
    /// untouched.
    pub fn merge_source(&mut self, locale: &str, source: DataNode) {
        if let Some(root) = self.locales.get_mut(locale) {
            root.overlay(source);
        } else {
            self.locales.insert(locale.to_string(), source);
        }
    }

    /// Candidate values for `key` from the first locale in `chain` that has a
    /// leaf there. Matching ignores case.
    pub fn lookup(&self, chain: &LocaleChain, key: &str) -> Option<&[String]> {
        let key = key.to_lowercase();
        chain
            .iter()
            .filter_map(|locale| self.locales.get(locale))
            .find_map(|root| root.get_path(&key).and_then(DataNode::values))
    }

    /// Sorted dotted keys of every leaf in `locale`.
    pub fn keys(&self, locale: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(root) = self.locales.get(locale) {
            root.collect_keys("", &mut keys);
        }
        keys.sort();
        keys
    }

    /// Sorted names of the locales holding data.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.locales.keys().cloned().collect();
        locales.sort();
        locales
    }
}
