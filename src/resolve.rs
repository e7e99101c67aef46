//! Path resolution over settings documents.
//!
//! Reads walk a plain [`toml::Table`]; writes walk the comment-preserving
//! [`toml_edit`] table so untouched content keeps its formatting. Both walk the
//! path with a loop, one segment per iteration.

use crate::path::SettingPath;
use toml_edit::{Item, TableLike};

/// Look up the value at `path`.
///
/// Returns `None` if any segment is absent, or if an intermediate segment
/// holds a leaf instead of a table. The value at the final segment is returned
/// as-is and may itself be a table.
pub fn lookup<'a>(path: &SettingPath, document: &'a toml::Table) -> Option<&'a toml::Value> {
    let (parents, last) = path.split_last();

    let mut table = document;
    for segment in parents {
        table = table.get(segment.as_str())?.as_table()?;
    }

    table.get(last)
}

/// Set `value` at `path`, creating empty tables for absent segments.
///
/// An intermediate segment that holds a leaf is replaced by a new table.
/// Unrelated keys keep their position and formatting.
pub fn assign(path: &SettingPath, value: Item, document: &mut toml_edit::Table) {
    let (parents, last) = path.split_last();

    let mut table: &mut dyn TableLike = document;
    for segment in parents {
        table = child_table(table, segment);
    }

    // Keep the existing key's decor (comments and spacing) when overwriting
    match table.get_mut(last) {
        Some(Item::Value(existing)) if value.is_value() => {
            let decor = existing.decor().clone();
            if let Item::Value(mut replacement) = value {
                *replacement.decor_mut() = decor;
                *existing = replacement;
            }
        }
        _ => {
            table.insert(last, value);
        }
    }
}

/// Descend into `key`, inserting or replacing it with an empty table when it
/// does not already hold one.
fn child_table<'a>(table: &'a mut dyn TableLike, key: &str) -> &'a mut dyn TableLike {
    let holds_table = table.get(key).is_some_and(Item::is_table_like);
    if !holds_table {
        table.insert(key, toml_edit::table());
    }

    match table.get_mut(key).and_then(Item::as_table_like_mut) {
        Some(child) => child,
        None => unreachable!("'{key}' was just set to a table"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml_edit::DocumentMut;

    fn path(dotted: &str) -> SettingPath {
        SettingPath::parse(dotted).unwrap()
    }

    fn table(text: &str) -> toml::Table {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_lookup_nested() {
        let doc = table("[theme]\napp = \"flexoki\"\nsyntax = \"css\"\n");
        assert_eq!(
            lookup(&path("theme.app"), &doc).and_then(toml::Value::as_str),
            Some("flexoki")
        );
        assert_eq!(
            lookup(&path("theme.syntax"), &doc).and_then(toml::Value::as_str),
            Some("css")
        );
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let doc = table("[theme]\napp = \"flexoki\"\n");
        assert!(lookup(&path("theme.cursor"), &doc).is_none());
        assert!(lookup(&path("does.not.exist"), &doc).is_none());
        assert!(lookup(&path("editor"), &doc).is_none());
    }

    #[test]
    fn test_lookup_through_leaf_is_none() {
        let doc = table("theme = \"dark\"\n");
        assert!(lookup(&path("theme.app"), &doc).is_none());
    }

    #[test]
    fn test_lookup_returns_compound_value() {
        let doc = table("[theme]\napp = \"flexoki\"\n");
        let found = lookup(&path("theme"), &doc).unwrap();
        assert!(found.is_table());
    }

    #[test]
    fn test_lookup_falsy_values_are_found() {
        let doc = table("empty = \"\"\nzero = 0\noff = false\n");
        assert!(lookup(&path("empty"), &doc).is_some());
        assert!(lookup(&path("zero"), &doc).is_some());
        assert!(lookup(&path("off"), &doc).is_some());
    }

    #[test]
    fn test_assign_creates_intermediate_tables() {
        let mut doc = DocumentMut::new();
        assign(&path("a.b.c"), toml_edit::value(1), doc.as_table_mut());

        let reread = table(&doc.to_string());
        assert_eq!(reread["a"]["b"]["c"].as_integer(), Some(1));
    }

    #[test]
    fn test_assign_overwrites_existing_value() {
        let mut doc: DocumentMut = "[theme]\napp = \"flexoki\" # shipped theme\n"
            .parse()
            .unwrap();
        assign(&path("theme.app"), toml_edit::value("dark"), doc.as_table_mut());

        let text = doc.to_string();
        assert!(text.contains("app = \"dark\" # shipped theme"));
    }

    #[test]
    fn test_assign_replaces_leaf_on_path() {
        let mut doc: DocumentMut = "a = \"leaf\"\nother = 1\n".parse().unwrap();
        assign(&path("a.b"), toml_edit::value(true), doc.as_table_mut());

        let reread = table(&doc.to_string());
        assert_eq!(reread["a"]["b"].as_bool(), Some(true));
        assert_eq!(reread["other"].as_integer(), Some(1));
    }

    #[test]
    fn test_assign_into_inline_table() {
        let mut doc: DocumentMut = "theme = { app = \"flexoki\" }\n".parse().unwrap();
        assign(&path("theme.syntax"), toml_edit::value("css"), doc.as_table_mut());

        let text = doc.to_string();
        assert!(text.starts_with("theme = {"));
        let reread = table(&text);
        assert_eq!(reread["theme"]["app"].as_str(), Some("flexoki"));
        assert_eq!(reread["theme"]["syntax"].as_str(), Some("css"));
    }

    #[test]
    fn test_assign_keeps_unrelated_keys_in_order() {
        let source = "# top comment\nzeta = 1\n\nalpha = 2\n\n[theme]\n# pick one\napp = \"flexoki\"\n";
        let mut doc: DocumentMut = source.parse().unwrap();
        assign(&path("theme.syntax"), toml_edit::value("css"), doc.as_table_mut());

        let text = doc.to_string();
        assert!(text.starts_with("# top comment\nzeta = 1\n\nalpha = 2\n"));
        assert!(text.contains("# pick one\napp = \"flexoki\"\n"));
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
        assert!(text.contains("syntax = \"css\""));
    }
}
