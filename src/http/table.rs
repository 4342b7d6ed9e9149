//! Record table markup.
//!
//! Field contents are inserted verbatim; the page layer embeds the result
//! without further escaping.

use crate::domain::Record;

/// Markup returned when the collection is empty.
pub const NO_ENTRIES_PLACEHOLDER: &str = "<p>No Pokémon entries available</p>";

/// Render records as a table with columns Name, Type, Level, Date Added.
///
/// Rows keep the order the store returned them in.
pub fn render_table(records: &[Record]) -> String {
    if records.is_empty() {
        return NO_ENTRIES_PLACEHOLDER.to_string();
    }

    let mut table = String::from(
        "<table class=\"pokedex-table\">\
         <tr><th>Name</th><th>Type</th><th>Level</th><th>Date Added</th></tr>",
    );

    for record in records {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.name, record.category, record.level, record.date_added
        ));
    }

    table.push_str("</table>");
    table
}
