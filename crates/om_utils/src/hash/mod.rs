//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! All containers default to [`FixedHashState`], so the iteration order of a
//! given set of keys is the same in every process. Construct them with
//! `Default::default()` (the `new` constructors of `hashbrown` are only
//! available for its own default hasher).

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::{FixedHashState, HashMap, HashSet};

    #[test]
    fn fixed_state_is_stable() {
        let hash = |value: &str| {
            let mut hasher = FixedHashState.build_hasher();
            value.hash(&mut hasher);
            hasher.finish()
        };

        assert_eq!(hash("title"), hash("title"));
        assert_ne!(hash("title"), hash("author"));
    }

    #[test]
    fn containers_use_default_constructor() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("id", 1);
        assert_eq!(map.get("id"), Some(&1));

        let mut set: HashSet<&str> = HashSet::default();
        assert!(set.insert("admin"));
        assert!(!set.insert("admin"));
    }
}
