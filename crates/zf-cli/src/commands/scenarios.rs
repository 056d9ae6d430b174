use comfy_table::{ContentArrangement, Table};

use zf_scenario::Catalog;

pub fn run() -> Result<(), String> {
    let catalog = Catalog::builtin().map_err(|e| format!("failed to load catalog: {e}"))?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Mode", "Steps"]);

    for scenario in catalog.scenarios() {
        table.add_row(vec![
            scenario.id.to_string(),
            scenario.title.clone(),
            scenario.mode.to_string(),
            scenario.steps.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scenarios", catalog.len());

    Ok(())
}
