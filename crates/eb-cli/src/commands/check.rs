//! Validate content files and print category counts.

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

/// Open the content store (running all validation) and report what it holds.
pub fn run(dir: &Path) -> Result<(), String> {
    let store = super::open_store(dir)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Entries"]);

    let rows: [(&str, usize); 7] = [
        ("locations", store.locations.len()),
        ("items", store.items.len()),
        ("npcs", store.npcs.len()),
        ("quests", store.quests.len()),
        ("recipes", store.recipes.len()),
        (
            "templates",
            store.templates.description_templates.len() + store.templates.item_templates.len(),
        ),
        ("variables", store.variables.len()),
    ];
    for (category, count) in rows {
        table.add_row(vec![category.to_string(), count.to_string()]);
    }

    println!("{table}");
    println!("{}", "Content OK.".green());
    Ok(())
}
