use alloc::sync::Arc;

use om_reflect::value::{ObjectRef, Value};

use super::{Fixture, Folder, LegacyTag, Point};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::MapError;
use crate::options::MapOptions;

#[test]
fn keys_follow_declaration_order() {
    let fixture = Fixture::new();
    let data = fixture.engine.normalize(&fixture.article(), &MapOptions::new()).unwrap();

    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["id", "title", "views", "rating", "status", "subtitle", "var_name_blah", "author", "tags"]
    );
    assert_eq!(data["status"], Value::from("draft"));
    assert_eq!(data["subtitle"], Value::Null);
}

#[test]
fn relations_stay_attached_outside_form_mode() {
    let fixture = Fixture::new();
    let data = fixture.engine.normalize(&fixture.article(), &MapOptions::new()).unwrap();

    let author = data["author"].as_object().unwrap();
    assert!(author.ptr_eq(&ObjectRef::from(fixture.ada.clone())));

    let tags = data["tags"].as_list().unwrap();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().all(|tag| tag.as_object().is_some()));
}

#[test]
fn composite_identifiers_are_skipped_in_form_mode() {
    let fixture = Fixture::new();
    let article = fixture.article();
    article.tags.push(Arc::new(LegacyTag {
        code: "old".into(),
        realm: "wiki".into(),
    }));

    let mut diagnostics = Diagnostics::new();
    let data = fixture
        .engine
        .normalize_with_diagnostics(
            &article,
            &MapOptions::new().with_collapse_relationships_to_identifiers(true),
            &mut diagnostics,
        )
        .unwrap();

    assert_eq!(data["tags"], Value::from(vec![3, 7]));
    assert!(diagnostics.contains(DiagnosticKind::CompositeIdentifier, "tags"));
}

#[test]
fn groups_and_ignored_attributes() {
    let fixture = Fixture::new();
    let engine = &fixture.engine;
    let article = fixture.article();

    let summary = engine
        .normalize(&article, &MapOptions::new().with_allowed_groups(["summary"]))
        .unwrap();
    assert_eq!(summary.keys().collect::<Vec<_>>(), ["id", "title"]);

    let detail = engine
        .normalize(&article, &MapOptions::new().with_allowed_groups(["detail"]))
        .unwrap();
    assert_eq!(detail.keys().collect::<Vec<_>>(), ["title"]);

    let trimmed = engine
        .normalize(&article, &MapOptions::new().with_ignored_attributes(["views", "tags"]))
        .unwrap();
    assert!(!trimmed.contains_key("views"));
    assert!(!trimmed.contains_key("tags"));
    assert!(trimmed.contains_key("title"));
}

#[test]
fn default_options_apply_under_call_options() {
    let fixture = Fixture::new();
    let engine = crate::MappingEngine::builder(super::registry(), fixture.store.clone())
        .with_default_options(MapOptions::new().with_collapse_relationships_to_identifiers(true))
        .build();
    let article = fixture.article();

    let data = engine.normalize(&article, &MapOptions::new()).unwrap();
    assert_eq!(data["author"], Value::Int(1));

    let expanded = MapOptions::new().with_collapse_relationships_to_identifiers(false);
    let data = engine.normalize(&article, &expanded).unwrap();
    assert!(data["author"].as_object().is_some());
}

#[test]
fn tree_embeds_nested_objects() {
    let fixture = Fixture::new();
    let tree = fixture
        .engine
        .normalize_tree(&fixture.article(), &MapOptions::new())
        .unwrap();

    let author = tree["author"].as_map().unwrap();
    assert_eq!(author["name"], Value::from("Ada"));

    let json = serde_json::to_value(Value::Map(tree)).unwrap();
    assert_eq!(json["tags"][1]["label"], "serde");
    assert_eq!(json["author"]["id"], 1);
}

#[test]
fn tree_rejects_cycles() {
    let fixture = Fixture::new();
    let root = Arc::new(Folder {
        name: "root".into(),
        ..Folder::default()
    });
    let child = Arc::new(Folder {
        name: "child".into(),
        ..Folder::default()
    });
    root.children.push(child.clone());

    // The same object twice on sibling paths is fine.
    root.children.push(child.clone());
    assert!(fixture.engine.normalize_tree(&*root, &MapOptions::new()).is_ok());

    child.children.push(root.clone());
    let error = fixture
        .engine
        .normalize_tree(&*root, &MapOptions::new())
        .unwrap_err();
    assert_eq!(error, MapError::CircularReference { class: "Folder" });

    // Break the cycle so both folders drop.
    child.children.clear();
}

#[test]
fn supports_registered_classes_only() {
    let fixture = Fixture::new();
    let engine = &fixture.engine;

    assert!(engine.supports_normalization(&Point::default()));
    assert!(engine.supports_denormalization("Article"));
    assert!(!engine.supports_denormalization("Comment"));
}
