use crate::prelude::{println, *};
use aconv_core::registry::Registry;
use colored::Colorize;

/// Renders every category followed by a table of its units and their display names.
pub fn render_listing(registry: &Registry) -> String {
    let mut sections = Vec::new();

    for category in registry.category_names() {
        let mut table = new_table();
        for unit in registry.unit_names(category) {
            table.add_row(prettytable::row![
                f!("   {unit}"),
                registry.nice_unit_name(category, unit)
            ]);
        }

        sections.push(f!(
            "{}\n{}",
            registry.nice_category_name(category).bold(),
            table
        ));
    }

    sections.join("\n")
}

/// Handles `list`.
pub fn run() -> Result<()> {
    println!("{}", render_listing(&Registry::new()));
    Ok(())
}
