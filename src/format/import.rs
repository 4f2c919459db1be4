use std::collections::HashMap;

use serde::Serialize;

use crate::collection::TestcaseCollection;
use crate::testcase::{Field, FIELDS};

/// The content of an import file: for each top-level name the raw field values, plus
/// the order in which the names first appear.
///
/// Values are kept as raw strings here: the integer conversion (and its error
/// reporting) happens during reconciliation, see [`apply_import`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportFile {
    /// The raw field values of each name. Unknown field names are kept too, the
    /// reconciliation simply ignores them.
    pub entries: HashMap<String, HashMap<String, String>>,
    /// The top-level names in first-seen order, without duplicates.
    pub order: Vec<String>,
}

/// Parse the exchange format, permissively.
///
/// This is a two-state line classifier (no current name / current name defined), not a
/// general YAML parser. It never fails: unrecognizable lines are skipped. See the
/// [module docs](crate::format) for the exact rules.
pub fn parse_import<S: AsRef<str>>(text: S) -> ImportFile {
    let mut file = ImportFile::default();
    let mut current: Option<String> = None;
    for line in text.as_ref().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !line.starts_with([' ', '\t']) {
            // top-level key: defines (or undefines) the current name
            current = None;
            let Some((key, _)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            if !file.entries.contains_key(key) {
                file.entries.insert(key.to_string(), HashMap::new());
                file.order.push(key.to_string());
            }
            current = Some(key.to_string());
        } else if let Some(name) = &current {
            // field line of the current name
            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            if let Some(fields) = file.entries.get_mut(name) {
                fields.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }
    file
}

/// A value of the import file that could not be parsed as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidValue {
    /// The top-level name the value belongs to.
    pub name: String,
    /// The field the value was given for.
    pub field: Field,
    /// The raw value, as written in the file.
    pub value: String,
}

/// The outcome of applying an import file to a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Number of collection entries matched (and therefore updated) by the import.
    pub updated: usize,
    /// Names present in the import file but not in the collection, in file order.
    pub missing: Vec<String>,
    /// All the field values skipped because not valid integers.
    pub invalid: Vec<InvalidValue>,
}

/// Apply the imported field values to the matching entries of the collection.
///
/// Entries are matched by name: a name missing from the collection is reported and
/// skipped entirely, never added. For a matched entry each known field with a non-empty
/// raw value is parsed as an integer; an unparsable value is reported and the previous
/// field value is kept, while the rest of the import goes on. This per-field partial
/// failure is intentional and is the reason the report exists.
///
/// The collection order is not touched here: use [`matched_order`] and
/// [`TestcaseCollection::reorder_by_names`] after the user confirmed the reorder.
///
/// [`TestcaseCollection::reorder_by_names`]: crate::TestcaseCollection::reorder_by_names
pub fn apply_import(collection: &mut TestcaseCollection, import: &ImportFile) -> ImportReport {
    let mut report = ImportReport::default();
    for name in &import.order {
        let Some(index) = collection.position_of(name) else {
            debug!("Imported name {} is not in the collection, skipped", name);
            report.missing.push(name.clone());
            continue;
        };
        let fields = &import.entries[name];
        for field in FIELDS {
            let Some(raw) = fields.get(field.key()) else {
                continue;
            };
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<i64>() {
                Ok(value) => {
                    if let Some(entry) = collection.get_mut(index) {
                        entry.set(field, value);
                    }
                }
                Err(_) => report.invalid.push(InvalidValue {
                    name: name.clone(),
                    field,
                    value: raw.to_string(),
                }),
            }
        }
        report.updated += 1;
    }
    report
}

/// The imported names that match the collection, in import-file order.
///
/// Passing this to [`TestcaseCollection::reorder_by_names`] puts the matched entries
/// first, in file order, with the unmatched ones after them in their previous relative
/// order.
///
/// [`TestcaseCollection::reorder_by_names`]: crate::TestcaseCollection::reorder_by_names
pub fn matched_order(collection: &TestcaseCollection, import: &ImportFile) -> Vec<String> {
    import
        .order
        .iter()
        .filter(|name| collection.position_of(name).is_some())
        .cloned()
        .collect()
}
