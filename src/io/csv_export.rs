use std::path::Path;

use crate::model::Plan;

/// Export interventions to a semicolon-delimited CSV file matching the
/// import format.
///
/// Columns: Title ; Client ; Status ; Start ; End ; Resources
/// Dates are formatted as DD/MM/YYYY HH:MM; missing endpoints export as
/// empty fields. Resources are exported by name, comma-separated.
/// Returns the number of interventions written.
pub fn export_csv(plan: &Plan, path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Client", "Status", "Start", "End", "Resources"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for iv in &plan.interventions {
        let fmt = |t: Option<chrono::NaiveDateTime>| {
            t.map(|t| t.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_default()
        };
        let resources = iv
            .resources
            .iter()
            .filter_map(|&id| plan.resource(id))
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        wtr.write_record([
            iv.title.as_str(),
            iv.client.as_str(),
            iv.status.label(),
            &fmt(iv.start),
            &fmt(iv.end),
            &resources,
        ])
        .map_err(|e| format!("Failed to write intervention '{}': {}", iv.title, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(plan.interventions.len())
}
