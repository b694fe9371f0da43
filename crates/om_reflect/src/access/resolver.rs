use alloc::string::String;
use std::sync::{PoisonError, RwLock};

use om_utils::hash::HashMap;
use om_utils::hash::hashbrown::Equivalent;

use crate::Reflect;
use crate::access::{ACCESSOR_PROBES, AccessError, MUTATOR_PROBES, MemberHandle, Probe, method_name};
use crate::info::{ClassInfo, MethodInfo};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Cache keys

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Lookup {
    AccessorMethod,
    MutatorMethod,
    Accessor,
    Mutator,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Key {
    class: usize,
    lookup: Lookup,
    attribute: String,
}

// Hashes exactly like `Key`, so lookups need no allocation.
#[derive(Hash)]
struct KeyRef<'a> {
    class: usize,
    lookup: Lookup,
    attribute: &'a str,
}

impl Equivalent<Key> for KeyRef<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        self.class == key.class && self.lookup == key.lookup && self.attribute == key.attribute
    }
}

// -----------------------------------------------------------------------------
// MemberResolver

/// Locates the member behind an attribute name.
///
/// - Accessors: `get<Name>`, then `is<Name>`, then `<name>`; the first
///   instance method callable without arguments wins. Otherwise a readable
///   public field named exactly `<name>`.
/// - Mutators: `set<Name>` taking at least one parameter. Otherwise a public,
///   publicly writable field named exactly `<name>`.
///
/// Results are memoized per class for the lifetime of the resolver; class
/// tables never change, so racing threads store identical entries. A miss is
/// only memoized for a declared field name, so unknown names never grow the
/// cache.
///
/// # Examples
///
/// ```
/// use om_reflect::{ClassInfoCell, Typed};
/// use om_reflect::access::{MemberHandle, MemberResolver};
/// use om_reflect::info::{ClassInfo, FieldInfo, MethodInfo};
///
/// struct Station {
///     var_name_blah: String,
/// }
///
/// impl Typed for Station {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::new::<Self>("Station")
///                 .with_field(FieldInfo::new("var_name_blah").protected())
///                 .with_method(MethodInfo::getter("getVarNameBlah", |s: &Station| {
///                     s.var_name_blah.clone().into()
///                 }))
///         })
///     }
/// }
///
/// let resolver = MemberResolver::new();
/// let handle = resolver
///     .resolve_accessor(Station::class_info(), "var_name_blah")
///     .unwrap();
///
/// assert!(matches!(handle, MemberHandle::Accessor { prefix: "get", .. }));
/// assert!(resolver.resolve_mutator(Station::class_info(), "var_name_blah").is_err());
/// ```
#[derive(Default)]
pub struct MemberResolver {
    cache: RwLock<HashMap<Key, Option<MemberHandle>>>,
}

impl MemberResolver {
    /// Creates a resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds an accessor method for `attribute`.
    pub fn accessor_method(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
    ) -> Option<MemberHandle> {
        self.cached(class, Lookup::AccessorMethod, attribute, || {
            probe(class, attribute, ACCESSOR_PROBES)
                .map(|(method, prefix)| MemberHandle::Accessor { method, prefix })
        })
    }

    /// Finds a mutator method for `attribute`.
    pub fn mutator_method(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
    ) -> Option<MemberHandle> {
        self.cached(class, Lookup::MutatorMethod, attribute, || {
            probe(class, attribute, MUTATOR_PROBES)
                .map(|(method, prefix)| MemberHandle::Mutator { method, prefix })
        })
    }

    /// Resolves how to read `attribute`, preferring accessor methods over fields.
    pub fn resolve_accessor(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
    ) -> Result<MemberHandle, AccessError> {
        self.cached(class, Lookup::Accessor, attribute, || {
            self.accessor_method(class, attribute).or_else(|| {
                class
                    .field(attribute)
                    .filter(|field| field.is_readable())
                    .map(MemberHandle::Field)
            })
        })
        .ok_or_else(|| AccessError::NoAccessor {
            class: class.name(),
            attribute: String::from(attribute),
        })
    }

    /// Resolves how to write `attribute`, preferring mutator methods over fields.
    pub fn resolve_mutator(
        &self,
        class: &'static ClassInfo,
        attribute: &str,
    ) -> Result<MemberHandle, AccessError> {
        self.cached(class, Lookup::Mutator, attribute, || {
            self.mutator_method(class, attribute).or_else(|| {
                class
                    .field(attribute)
                    .filter(|field| field.is_writable())
                    .map(MemberHandle::Field)
            })
        })
        .ok_or_else(|| AccessError::NoMutator {
            class: class.name(),
            attribute: String::from(attribute),
        })
    }

    /// Reads `attribute` from `object` through its resolved accessor.
    pub fn read(&self, object: &dyn Reflect, attribute: &str) -> Result<Value, AccessError> {
        self.resolve_accessor(object.reflect_class_info(), attribute)?
            .read(object)
    }

    /// Returns the number of memoized lookups.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drops every memoized lookup.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cached(
        &self,
        class: &'static ClassInfo,
        lookup: Lookup,
        attribute: &str,
        resolve: impl FnOnce() -> Option<MemberHandle>,
    ) -> Option<MemberHandle> {
        let class_addr = core::ptr::from_ref(class) as usize;
        let key = KeyRef {
            class: class_addr,
            lookup,
            attribute,
        };

        if let Some(found) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return *found;
        }

        let resolved = resolve();
        if resolved.is_none() && class.field(attribute).is_none() {
            return None;
        }
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                Key {
                    class: class_addr,
                    lookup,
                    attribute: String::from(attribute),
                },
                resolved,
            );
        resolved
    }
}

impl core::fmt::Debug for MemberResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemberResolver")
            .field("cached", &self.cached_len())
            .finish()
    }
}

fn probe(
    class: &'static ClassInfo,
    attribute: &str,
    probes: &'static [Probe],
) -> Option<(&'static MethodInfo, &'static str)> {
    probes.iter().find_map(|probe| {
        let method = class.method(&method_name(probe.prefix, attribute))?;
        probe.matches(method).then_some((method, probe.prefix))
    })
}
