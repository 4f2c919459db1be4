use std::fmt::Write;

use crate::collection::TestcaseCollection;
use crate::testcase::FIELDS;

/// Serialize the collection in the exchange format, in collection order.
///
/// See the [module docs](crate::format) for the exact layout.
pub fn export_collection(collection: &TestcaseCollection) -> String {
    let mut out = String::new();
    for entry in collection.iter() {
        // infallible: writing to a String cannot fail
        let _ = writeln!(out, "{}:", entry.name);
        for field in FIELDS {
            let _ = writeln!(out, "  {}: {}", field.key(), entry.get(field));
        }
        out.push('\n');
    }
    out
}
