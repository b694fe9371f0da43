//! Insertion-ordered containers.
//!
//! Normalized output, relationship schemas and class field tables all promise
//! to keep the order in which entries were declared or inserted.

use crate::hash::FixedHashState;

/// An insertion-ordered map keyed with [`FixedHashState`].
///
/// # Examples
///
/// ```
/// use om_utils::IndexMap;
///
/// let mut map: IndexMap<&str, i32> = IndexMap::default();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
/// ```
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, FixedHashState>;

/// An insertion-ordered set keyed with [`FixedHashState`].
pub type IndexSet<T> = indexmap::IndexSet<T, FixedHashState>;

pub use indexmap::map::Entry;
