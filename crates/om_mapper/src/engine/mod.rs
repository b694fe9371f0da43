//! The normalize/denormalize driver.
//!
//! ## Menu
//!
//! - [`MappingEngine`]: converts objects to flat maps and populates objects from them.
//! - [`MappingEngineBuilder`]: collaborators and default options of an engine.
//! - [`NormalizationContext`]: the per-call state passed through one traversal.
//!
//! ## Normalize
//!
//! 1. The relationship schema of the object's class is fetched from the
//!    [`EntityStore`] and bundled with the options into a context.
//! 2. Candidates are the public and protected instance fields, unless the
//!    [`AttributeFilter`] lists attributes itself.
//! 3. A candidate survives if the filter admits it, if a relationship carries
//!    [`DeepNormalize(true)`](crate::markers::DeepNormalize), and if an
//!    accessor exists.
//! 4. Each survivor is read. Collections become ordered lists of members, or of
//!    member identifiers in form mode.
//!
//! ## Denormalize
//!
//! Every input key is written through the relationship path (`one`, owning
//! `many`) or the plain path (type-directed coercion, then mutator or
//! writable field). Unresolvable input is skipped and reported through
//! [`Diagnostics`].

// -----------------------------------------------------------------------------
// Modules

mod context;
mod denormalize;
mod normalize;
mod tree;

// -----------------------------------------------------------------------------
// Exports

pub use context::NormalizationContext;

use alloc::boxed::Box;
use alloc::sync::Arc;

use om_reflect::Reflect;
use om_reflect::access::MemberResolver;
use om_reflect::info::ClassInfo;
use om_reflect::registry::ClassRegistry;
use om_reflect::value::{ObjectRef, Value};

use crate::coerce::{DefaultCoercer, ValueCoercer};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::MapError;
use crate::extractor::AttributeTypeExtractor;
use crate::filter::{AttributeFilter, GroupFilter};
use crate::markers::DeepNormalize;
use crate::options::MapOptions;
use crate::store::EntityStore;

// -----------------------------------------------------------------------------
// MappingEngine

/// Converts between mapped objects and flat [`ValueMap`](om_reflect::value::ValueMap)s.
///
/// The engine holds no per-call state: the relationship schema and options of
/// a call travel in a [`NormalizationContext`]. Member and type lookups are
/// cached per class, so one engine can serve concurrent calls.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use om_mapper::{MapOptions, MappingEngine};
/// use om_mapper::store::{EntityMetadata, InMemoryStore};
/// use om_reflect::{ClassInfoCell, Typed};
/// use om_reflect::info::{ClassInfo, FieldInfo};
/// use om_reflect::registry::ClassRegistry;
/// use om_reflect::value::Value;
///
/// #[derive(Default)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Typed for Point {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::new::<Self>("Point")
///                 .with_field(
///                     FieldInfo::new("x")
///                         .with_type("int")
///                         .with_getter(|p: &Point| p.x.into())
///                         .with_setter(|p: &mut Point, x: i64| p.x = x),
///                 )
///                 .with_field(
///                     FieldInfo::new("y")
///                         .with_type("int")
///                         .with_getter(|p: &Point| p.y.into())
///                         .with_setter(|p: &mut Point, y: i64| p.y = y),
///                 )
///         })
///     }
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<Point>();
/// let store = Arc::new(InMemoryStore::new());
/// store.define("Point", EntityMetadata::new(["x", "y"]));
///
/// let engine = MappingEngine::builder(registry, store).build();
/// let options = MapOptions::new();
///
/// let data = engine.normalize(&Point { x: 1, y: 2 }, &options).unwrap();
/// assert_eq!(data["x"], Value::from(1));
///
/// let mut copy = Point::default();
/// engine.denormalize(data, "Point", &mut copy, &options).unwrap();
/// assert_eq!((copy.x, copy.y), (1, 2));
/// ```
pub struct MappingEngine {
    registry: ClassRegistry,
    store: Arc<dyn EntityStore>,
    filter: Box<dyn AttributeFilter>,
    coercer: Box<dyn ValueCoercer>,
    extractor: AttributeTypeExtractor,
    default_options: MapOptions,
}

impl MappingEngine {
    /// Starts building an engine over `registry` and `store`.
    pub fn builder(registry: ClassRegistry, store: Arc<dyn EntityStore>) -> MappingEngineBuilder {
        MappingEngineBuilder {
            registry,
            store,
            filter: Box::new(GroupFilter),
            coercer: Box::new(DefaultCoercer::new()),
            default_options: MapOptions::default(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    #[inline]
    pub fn store(&self) -> &dyn EntityStore {
        &*self.store
    }

    #[inline]
    pub fn default_options(&self) -> &MapOptions {
        &self.default_options
    }

    #[inline]
    pub fn members(&self) -> &MemberResolver {
        self.extractor.members()
    }

    #[inline]
    pub fn type_extractor(&self) -> &AttributeTypeExtractor {
        &self.extractor
    }

    /// Returns `true` if the class of `object` is registered and managed by the store.
    pub fn supports_normalization(&self, object: &dyn Reflect) -> bool {
        self.supports_denormalization(object.class_name())
    }

    /// Returns `true` if `class` is registered and managed by the store.
    pub fn supports_denormalization(&self, class: &str) -> bool {
        self.registry.contains(class) && self.store.is_managed(class)
    }

    /// Builds the context of one call over `class`.
    pub fn build_context(&self, class: &'static ClassInfo, options: &MapOptions) -> NormalizationContext {
        NormalizationContext::new(
            class,
            self.store.relationship_schema(class.name()),
            options.merged_over(&self.default_options),
        )
    }

    // ---- shared member helpers ----

    /// Returns `true` if `attribute` is a relationship opted into deep normalization.
    fn supports_deep_normalization(class: &ClassInfo, attribute: &str) -> bool {
        class.field(attribute).is_some_and(DeepNormalize::is_enabled_on)
    }

    /// Reads `attribute` through its accessor, or its public field.
    fn read_property(&self, object: &dyn Reflect, attribute: &str) -> Result<Value, MapError> {
        let handle = self
            .members()
            .resolve_accessor(object.reflect_class_info(), attribute)
            .map_err(MapError::from_lookup)?;
        Ok(handle.read(object)?)
    }

    /// Writes `attribute` through its mutator, or its writable public field.
    ///
    /// Every failure is recorded and skipped.
    fn set_property(
        &self,
        object: &mut dyn Reflect,
        attribute: &str,
        value: Value,
        diagnostics: &mut Diagnostics,
    ) {
        let class = object.reflect_class_info();
        let Ok(handle) = self.members().resolve_mutator(class, attribute) else {
            diagnostics.record(
                DiagnosticKind::UnknownAttribute,
                class.name(),
                attribute,
                "no mutator and no writable field",
            );
            return;
        };

        if value.is_null() && handle.rejects_null() {
            diagnostics.record(
                DiagnosticKind::NullRejected,
                class.name(),
                attribute,
                alloc::format!("`{}` does not accept null", handle.member_name()),
            );
            return;
        }

        if let Err(error) = handle.write(object, value) {
            diagnostics.record(
                DiagnosticKind::WriteFailed,
                class.name(),
                attribute,
                alloc::format!("{error}"),
            );
        }
    }

    /// Looks up an object of `target` (or a subclass) by identifier.
    fn find(&self, target: &str, identifier: &Value) -> Option<ObjectRef> {
        self.store
            .find_by_identifier(target, identifier)
            .filter(|found| self.registry.is_subclass_of(found.class_name(), target))
    }
}

impl core::fmt::Debug for MappingEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MappingEngine")
            .field("registry", &self.registry)
            .field("extractor", &self.extractor)
            .field("default_options", &self.default_options)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// MappingEngineBuilder

/// Configures a [`MappingEngine`].
///
/// Defaults: [`GroupFilter`], a strict [`DefaultCoercer`], empty options.
pub struct MappingEngineBuilder {
    registry: ClassRegistry,
    store: Arc<dyn EntityStore>,
    filter: Box<dyn AttributeFilter>,
    coercer: Box<dyn ValueCoercer>,
    default_options: MapOptions,
}

impl MappingEngineBuilder {
    #[inline]
    pub fn with_filter(mut self, filter: impl AttributeFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    #[inline]
    pub fn with_coercer(mut self, coercer: impl ValueCoercer + 'static) -> Self {
        self.coercer = Box::new(coercer);
        self
    }

    /// Options every call is merged over.
    #[inline]
    pub fn with_default_options(mut self, options: MapOptions) -> Self {
        self.default_options = options;
        self
    }

    pub fn build(self) -> MappingEngine {
        MappingEngine {
            registry: self.registry,
            store: self.store,
            filter: self.filter,
            coercer: self.coercer,
            extractor: AttributeTypeExtractor::new(),
            default_options: self.default_options,
        }
    }
}
