//! Shared fixture classes for the engine tests.

mod normalize;

use alloc::sync::Arc;

use om_reflect::info::{ClassInfo, FieldInfo, MethodInfo, ParamInfo};
use om_reflect::registry::ClassRegistry;
use om_reflect::value::{Collection, Value};
use om_reflect::{ClassInfoCell, Typed};

use crate::MappingEngine;
use crate::coerce::DefaultCoercer;
use crate::markers::{DeepNormalize, Groups};
use crate::relation::AssociationMapping;
use crate::store::{EntityMetadata, EntityStore, InMemoryStore};

// -----------------------------------------------------------------------------
// Classes

#[derive(Debug, Default)]
pub(crate) struct Author {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl Typed for Author {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("Author")
                .with_field(
                    FieldInfo::new("id")
                        .with_type("int")
                        .read_only()
                        .with_getter(|a: &Author| a.id.into()),
                )
                .with_field(
                    FieldInfo::new("name")
                        .with_type("string")
                        .with_getter(|a: &Author| a.name.clone().into())
                        .with_setter(|a: &mut Author, name: String| a.name = name),
                )
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tag {
    pub(crate) id: i64,
    pub(crate) label: String,
}

impl Typed for Tag {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("Tag")
                .with_field(
                    FieldInfo::new("id")
                        .with_type("int")
                        .read_only()
                        .with_getter(|t: &Tag| t.id.into()),
                )
                .with_field(
                    FieldInfo::new("label")
                        .with_type("string")
                        .with_getter(|t: &Tag| t.label.clone().into())
                        .with_setter(|t: &mut Tag, label: String| t.label = label),
                )
        })
    }
}

/// A tag subclass identified by two fields.
#[derive(Debug, Default)]
pub(crate) struct LegacyTag {
    pub(crate) code: String,
    pub(crate) realm: String,
}

impl Typed for LegacyTag {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("LegacyTag")
                .with_parent("Tag")
                .with_field(
                    FieldInfo::new("code")
                        .with_type("string")
                        .with_getter(|t: &LegacyTag| t.code.clone().into()),
                )
                .with_field(
                    FieldInfo::new("realm")
                        .with_type("string")
                        .with_getter(|t: &LegacyTag| t.realm.clone().into()),
                )
        })
    }
}

#[derive(Default)]
pub(crate) struct Article {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) views: i64,
    pub(crate) rating: f64,
    pub(crate) status: String,
    pub(crate) subtitle: Option<String>,
    pub(crate) var_name_blah: String,
    pub(crate) author: Option<Arc<Author>>,
    pub(crate) editor: Option<Arc<Author>>,
    pub(crate) tags: Collection,
    pub(crate) comments: Collection,
    pub(crate) secret: String,
}

impl Typed for Article {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("Article")
                .with_field(
                    FieldInfo::new("id")
                        .with_type("int")
                        .read_only()
                        .with_attribute(Groups::new(["summary"]))
                        .with_getter(|a: &Article| a.id.into()),
                )
                .with_field(
                    FieldInfo::new("title")
                        .with_type("string")
                        .with_attribute(Groups::new(["summary", "detail"]))
                        .with_getter(|a: &Article| a.title.clone().into())
                        .with_setter(|a: &mut Article, title: String| a.title = title),
                )
                .with_field(
                    FieldInfo::new("views")
                        .with_type("int")
                        .with_getter(|a: &Article| a.views.into())
                        .with_setter(|a: &mut Article, views: i64| a.views = views),
                )
                .with_field(
                    FieldInfo::new("rating")
                        .with_default(0.0)
                        .with_getter(|a: &Article| a.rating.into())
                        .with_setter(|a: &mut Article, rating: f64| a.rating = rating),
                )
                .with_field(FieldInfo::new("status").protected().with_type("string"))
                .with_field(FieldInfo::new("subtitle").protected().with_type("?string"))
                .with_field(FieldInfo::new("var_name_blah").protected())
                .with_field(
                    FieldInfo::new("author")
                        .protected()
                        .with_type("?Author")
                        .with_attribute(DeepNormalize(true)),
                )
                .with_field(FieldInfo::new("editor").protected().with_type("?Author"))
                .with_field(
                    FieldInfo::new("tags")
                        .protected()
                        .with_attribute(DeepNormalize(true)),
                )
                .with_field(FieldInfo::new("comments").protected())
                .with_field(FieldInfo::new("secret").private().with_type("string"))
                .with_method(MethodInfo::getter("getStatus", |a: &Article| {
                    a.status.clone().into()
                }))
                .with_method(MethodInfo::setter(
                    "setStatus",
                    ParamInfo::typed("status", "string"),
                    |a: &mut Article, status: String| a.status = status,
                ))
                .with_method(MethodInfo::getter("getSubtitle", |a: &Article| {
                    a.subtitle.clone().into()
                }))
                .with_method(MethodInfo::setter(
                    "setSubtitle",
                    ParamInfo::typed("subtitle", "?string"),
                    |a: &mut Article, subtitle: Option<String>| a.subtitle = subtitle,
                ))
                .with_method(MethodInfo::getter("getVarNameBlah", |a: &Article| {
                    a.var_name_blah.clone().into()
                }))
                .with_method(MethodInfo::getter("getAuthor", |a: &Article| {
                    a.author.clone().into()
                }))
                .with_method(MethodInfo::setter(
                    "setAuthor",
                    ParamInfo::typed("author", "?Author"),
                    |a: &mut Article, author: Option<Arc<Author>>| a.author = author,
                ))
                .with_method(MethodInfo::getter("getEditor", |a: &Article| {
                    a.editor.clone().into()
                }))
                .with_method(MethodInfo::setter(
                    "setEditor",
                    ParamInfo::typed("editor", "?Author"),
                    |a: &mut Article, editor: Option<Arc<Author>>| a.editor = editor,
                ))
                .with_method(MethodInfo::getter("getTags", |a: &Article| a.tags.clone().into()))
                .with_method(MethodInfo::getter("getComments", |a: &Article| {
                    a.comments.clone().into()
                }))
        })
    }
}

/// A class whose every attribute is a public field.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: i64,
    pub(crate) y: i64,
    pub(crate) label: String,
    pub(crate) visible: bool,
    pub(crate) ratio: f64,
    pub(crate) nickname: Option<String>,
}

impl Typed for Point {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("Point")
                .with_field(
                    FieldInfo::new("x")
                        .with_type("int")
                        .with_getter(|p: &Point| p.x.into())
                        .with_setter(|p: &mut Point, x: i64| p.x = x),
                )
                .with_field(
                    FieldInfo::new("y")
                        .with_type("int")
                        .with_getter(|p: &Point| p.y.into())
                        .with_setter(|p: &mut Point, y: i64| p.y = y),
                )
                .with_field(
                    FieldInfo::new("label")
                        .with_type("string")
                        .with_getter(|p: &Point| p.label.clone().into())
                        .with_setter(|p: &mut Point, label: String| p.label = label),
                )
                .with_field(
                    FieldInfo::new("visible")
                        .with_type("bool")
                        .with_getter(|p: &Point| p.visible.into())
                        .with_setter(|p: &mut Point, visible: bool| p.visible = visible),
                )
                .with_field(
                    FieldInfo::new("ratio")
                        .with_type("float")
                        .with_getter(|p: &Point| p.ratio.into())
                        .with_setter(|p: &mut Point, ratio: f64| p.ratio = ratio),
                )
                .with_field(
                    FieldInfo::new("nickname")
                        .with_type("?string")
                        .with_getter(|p: &Point| p.nickname.clone().into())
                        .with_setter(|p: &mut Point, nickname: Option<String>| {
                            p.nickname = nickname;
                        }),
                )
        })
    }
}

/// A folder may contain itself, closing a cycle.
#[derive(Default)]
pub(crate) struct Folder {
    pub(crate) name: String,
    pub(crate) children: Collection,
}

impl Typed for Folder {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("Folder")
                .with_field(
                    FieldInfo::new("name")
                        .with_type("string")
                        .with_getter(|f: &Folder| f.name.clone().into()),
                )
                .with_field(
                    FieldInfo::new("children")
                        .protected()
                        .with_attribute(DeepNormalize(true)),
                )
                .with_method(MethodInfo::getter("getChildren", |f: &Folder| {
                    f.children.clone().into()
                }))
        })
    }
}

/// Declares `parent` types without having a parent class.
#[derive(Default)]
pub(crate) struct Orphan {
    pub(crate) up: Value,
}

impl Typed for Orphan {
    fn class_info() -> &'static ClassInfo {
        static CELL: ClassInfoCell = ClassInfoCell::new();
        CELL.get_or_init(|| {
            ClassInfo::new::<Self>("Orphan").with_field(
                FieldInfo::new("up")
                    .with_type("?parent")
                    .with_getter(|o: &Orphan| o.up.clone())
                    .with_setter(|o: &mut Orphan, up: Value| o.up = up),
            )
        })
    }
}

// -----------------------------------------------------------------------------
// Fixture

/// A registry holding every fixture class.
pub(crate) fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.register::<Author>();
    registry.register::<Tag>();
    registry.register::<LegacyTag>();
    registry.register::<Article>();
    registry.register::<Point>();
    registry.register::<Folder>();
    registry.register::<Orphan>();
    registry
}

pub(crate) struct Fixture {
    pub(crate) engine: MappingEngine,
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) ada: Arc<Author>,
    pub(crate) grace: Arc<Author>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_coercer(DefaultCoercer::new())
    }

    pub(crate) fn with_coercer(coercer: DefaultCoercer) -> Self {
        let store = Arc::new(InMemoryStore::new());
        store.define("Author", EntityMetadata::new(["id"]));
        store.define("Tag", EntityMetadata::new(["id"]));
        store.define("LegacyTag", EntityMetadata::new(["code", "realm"]));
        store.define("Point", EntityMetadata::new(["x", "y"]));
        store.define("Orphan", EntityMetadata::new(["up"]));
        store.define(
            "Article",
            EntityMetadata::new(["id"])
                .with_association(AssociationMapping::to_one("author", "Author", ["author_id"]))
                .with_association(AssociationMapping::to_one("editor", "Author", ["editor_id"]))
                .with_association(AssociationMapping::to_many("tags", "Tag"))
                .with_association(AssociationMapping::inverse("comments", "Comment")),
        );
        store.define(
            "Folder",
            EntityMetadata::new(["name"])
                .with_association(AssociationMapping::to_many("children", "Folder")),
        );

        let ada = Arc::new(Author {
            id: 1,
            name: "Ada".into(),
        });
        let grace = Arc::new(Author {
            id: 2,
            name: "Grace".into(),
        });
        store.insert(1, ada.clone());
        store.insert(2, grace.clone());
        for (id, label) in [(3, "rust"), (7, "serde"), (9, "reflection")] {
            store.insert(
                id,
                Arc::new(Tag {
                    id,
                    label: label.into(),
                }),
            );
        }

        let engine = MappingEngine::builder(registry(), store.clone())
            .with_coercer(coercer)
            .build();

        Self {
            engine,
            store,
            ada,
            grace,
        }
    }

    /// Returns the stored tag with `id`.
    pub(crate) fn tag(&self, id: i64) -> Arc<Tag> {
        self.store
            .find_by_identifier("Tag", &Value::from(id))
            .and_then(|tag| tag.downcast_arc::<Tag>())
            .unwrap_or_else(|| panic!("tag {id} is stored"))
    }

    /// An article by Ada, tagged 3 and 7.
    pub(crate) fn article(&self) -> Article {
        let article = Article {
            id: 10,
            title: "Reflection in Rust".into(),
            views: 42,
            rating: 4.5,
            status: "draft".into(),
            subtitle: None,
            var_name_blah: "blah".into(),
            author: Some(self.ada.clone()),
            editor: Some(self.grace.clone()),
            secret: "hidden".into(),
            ..Article::default()
        };
        article.tags.push(self.tag(3));
        article.tags.push(self.tag(7));
        article
    }
}

/// Returns the ids of the tags in `collection`, in order.
pub(crate) fn tag_ids(collection: &Collection) -> Vec<i64> {
    collection.members::<Tag>().iter().map(|tag| tag.id).collect()
}
