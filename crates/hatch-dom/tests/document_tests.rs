//! Document model tests: building, querying and mutating element trees.

use hatch_dom::{Document, DomError, DomEvent, IntoNodes, NodeId};
use std::cell::Cell;
use std::rc::Rc;

fn textfield(doc: &mut Document) -> NodeId {
    doc.build("div")
        .classes(&["hatch-textfield", "hatch-js-textfield"])
        .child("input", |input| input.class("hatch-textfield__input").attr("type", "text"))
        .child("label", |label| label.class("hatch-textfield__label").text("Name"))
        .finish()
}

#[test]
fn test_builder_creates_nested_structure() {
    let mut doc = Document::new();
    let field = textfield(&mut doc);

    let children = doc.element_children(field);
    assert_eq!(children.len(), 2);
    assert_eq!(doc.tag_name(children.item(0).unwrap()), Some("input"));
    assert_eq!(
        doc.attribute(children.item(0).unwrap(), "type").as_deref(),
        Some("text")
    );
    assert_eq!(doc.text_content(field), "Name");
    assert!(doc.parent(field).is_none());
}

#[test]
fn test_append_to_attaches_under_parent() {
    let mut doc = Document::new();
    let root = doc.root();
    let node = doc.build("section").class("page").append_to(root);

    assert!(doc.is_connected(node));
    assert_eq!(doc.query_class("page"), Some(node));
}

#[test]
fn test_element_children_skip_text() {
    let mut doc = Document::new();
    let list = doc
        .build("ul")
        .text("leading")
        .child("li", |li| li.text("one"))
        .text("between")
        .child("li", |li| li.text("two"))
        .finish();

    assert_eq!(doc.children(list).len(), 4);
    assert_eq!(doc.element_children(list).len(), 2);
    assert_eq!(doc.text_content(list), "leadingonebetweentwo");
}

#[test]
fn test_scoped_query_excludes_scope() {
    let mut doc = Document::new();
    let field = textfield(&mut doc);

    let input = doc.query_class_in(field, "hatch-textfield__input");
    assert!(input.is_some());
    assert_eq!(doc.query_class_in(field, "hatch-textfield"), None);
    assert_eq!(doc.query_class_all_in(field, "hatch-textfield").len(), 1);
}

#[test]
fn test_attribute_errors_on_text_nodes() {
    let mut doc = Document::new();
    let text = doc.create_text("plain");

    assert_eq!(
        doc.set_attribute(text, "data-upgraded", ""),
        Err(DomError::NotAnElement(text))
    );
    assert_eq!(doc.attribute(text, "data-upgraded"), None);
    assert_eq!(
        doc.add_class(NodeId(999), "x"),
        Err(DomError::UnknownNode(NodeId(999)))
    );
}

#[test]
fn test_remove_attribute_returns_previous() {
    let mut doc = Document::new();
    let div = doc.build("div").attr("data-upgraded", ",Foo").finish();

    assert_eq!(
        doc.remove_attribute(div, "data-upgraded").unwrap().as_deref(),
        Some(",Foo")
    );
    assert!(!doc.has_attribute(div, "data-upgraded"));
    assert_eq!(doc.remove_attribute(div, "data-upgraded").unwrap(), None);
}

#[test]
fn test_listener_removal() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let hits = Rc::new(Cell::new(0));

    let counter = hits.clone();
    let id = doc
        .add_event_listener(div, "componentupgraded", move |_| counter.set(counter.get() + 1))
        .unwrap();

    doc.dispatch_event(&DomEvent::new("componentupgraded", div)).unwrap();
    assert!(doc.remove_event_listener(div, id));
    assert!(!doc.remove_event_listener(div, id));
    doc.dispatch_event(&DomEvent::new("componentupgraded", div)).unwrap();

    assert_eq!(hits.get(), 1);
}

#[test]
fn test_dispatch_on_unknown_node_fails() {
    let doc = Document::new();
    assert_eq!(
        doc.dispatch_event(&DomEvent::new("x", NodeId(42))),
        Err(DomError::UnknownNode(NodeId(42)))
    );
}

#[test]
fn test_query_result_is_a_snapshot() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.build("div").class("item").append_to(root);
    let list = doc.query_class_all("item");
    doc.build("div").class("item").append_to(root);

    assert_eq!(list.len(), 1);
    assert_eq!(doc.query_class_all("item").into_nodes().len(), 2);
}

#[test]
fn test_builder_append_skips_invalid_children() {
    let mut doc = Document::new();
    let root = doc.root();
    let item = doc.create_element("li");

    let list = doc
        .build("ul")
        .append(root)
        .append(NodeId(9_999))
        .append(item)
        .finish();

    assert_eq!(doc.parent(root), None);
    assert_eq!(doc.children(list), &[item]);
    assert_eq!(doc.parent(item), Some(list));
}
