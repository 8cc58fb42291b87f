//! Per-element record of applied component names.
//!
//! The side table is the source of truth. Its attribute form is a
//! comma-joined list with a leading empty token, so an element upgraded as
//! `Foo` then `Bar` reads `",Foo,Bar"` and an element with nothing applied
//! reads `""`.

use hatch_core::alloc::{HashMap, IndexSet};
use hatch_dom::NodeId;

/// Separator between names in the attribute form.
pub const MARKER_SEPARATOR: char = ',';

/// Encode a marker set into its attribute form.
pub fn encode_marker<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        out.push(MARKER_SEPARATOR);
        out.push_str(name);
    }
    out
}

/// Decode an attribute value. Empty tokens, including the leading one, are
/// skipped and repeated names collapse.
pub fn decode_marker(value: &str) -> IndexSet<String> {
    value
        .split(MARKER_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Side table from element to applied names, in application order.
#[derive(Default)]
pub(crate) struct MarkerTable {
    sets: HashMap<NodeId, IndexSet<String>>,
}

impl MarkerTable {
    pub(crate) fn get(&self, node: NodeId) -> Option<&IndexSet<String>> {
        self.sets.get(&node)
    }

    /// Names for `node`, seeding the entry from `attribute` the first time
    /// the node is seen.
    pub(crate) fn entry(&mut self, node: NodeId, attribute: Option<&str>) -> &mut IndexSet<String> {
        self.sets
            .entry(node)
            .or_insert_with(|| attribute.map(decode_marker).unwrap_or_default())
    }

    pub(crate) fn forget(&mut self, node: NodeId) {
        self.sets.remove(&node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_has_leading_separator() {
        assert_eq!(encode_marker(["Foo"]), ",Foo");
        assert_eq!(encode_marker(["Foo", "Bar"]), ",Foo,Bar");
        assert_eq!(encode_marker(std::iter::empty::<&str>()), "");
    }

    #[test]
    fn test_decode_skips_sentinel_and_duplicates() {
        let names = decode_marker(",Foo,,Bar,Foo");
        assert_eq!(names.iter().map(String::as_str).collect::<Vec<_>>(), vec!["Foo", "Bar"]);
        assert!(decode_marker("").is_empty());
        assert!(decode_marker(",").is_empty());
    }

    #[test]
    fn test_entry_hydrates_once() {
        let mut table = MarkerTable::default();
        let node = NodeId(7);

        table.entry(node, Some(",Foo")).insert("Bar".to_string());
        let names = table.entry(node, Some(",Ignored"));
        assert_eq!(names.iter().map(String::as_str).collect::<Vec<_>>(), vec!["Foo", "Bar"]);

        table.forget(node);
        assert!(table.get(node).is_none());
    }
}
