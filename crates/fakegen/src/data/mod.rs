//! Locale data: the in-memory store and the YAML sources that fill it.

mod source;
mod store;

pub use source::{BUILTIN_SOURCES, load_file, parse_yaml};
pub use store::{DataNode, DataStore};
