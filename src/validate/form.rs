//! Form cleanup applied before a table is serialized for submission.

/// Removes every top-level entry whose value is an empty array.
///
/// Other values, including empty tables and empty strings, are kept.
///
/// # Examples
///
/// ```
/// use confsync::validate::omit_empty_arrays;
///
/// let mut table: toml::Table = toml::from_str("a = []\nb = [1]\nc = \"\"").unwrap();
/// omit_empty_arrays(&mut table);
///
/// assert!(!table.contains_key("a"));
/// assert!(table.contains_key("b"));
/// assert!(table.contains_key("c"));
/// ```
pub fn omit_empty_arrays(table: &mut toml::Table) {
    table.retain(|_, value| !value.as_array().is_some_and(Vec::is_empty));
}
