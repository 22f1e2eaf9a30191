use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{Intervention, InterventionStatus, Resource};

/// Map a status string to an intervention status.
fn parse_status(s: &str) -> InterventionStatus {
    match s.trim().to_lowercase().as_str() {
        "confirmed" | "firm" | "booked" => InterventionStatus::Confirmed,
        "done" | "finished" | "complete" | "completed" => InterventionStatus::Done,
        "canceled" | "cancelled" => InterventionStatus::Canceled,
        _ => InterventionStatus::Planned,
    }
}

/// Try parsing a date-time string with several common formats; date-only
/// values land on midnight.
fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in &["%d/%m/%Y %H:%M", "%Y-%m-%d %H:%M", "%d-%m-%Y %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    for fmt in &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = title, 1 = client, 2 = status, 3 = start, 4 = end, 5 = resources
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "title" | "name" | "label" | "intervention" | "job" => Some(0),
        "client" | "customer" | "account" => Some(1),
        "status" | "state" => Some(2),
        "start" | "startdate" | "from" | "begin" => Some(3),
        "end" | "enddate" | "to" | "finish" | "until" => Some(4),
        "resources" | "resource" | "equipment" | "assigned" => Some(5),
        _ => None,
    }
}

/// Import interventions from a CSV file.
///
/// Auto-detects the delimiter and matches headers flexibly. Resource
/// names are resolved against `resources`; unknown names are dropped.
/// Rows without a usable title are skipped.
/// Returns `(interventions, skipped_count)` on success.
pub fn import_csv(
    path: &PathBuf,
    resources: &[Resource],
) -> Result<(Vec<Intervention>, usize), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();
    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    if !col_map.iter().any(|c| *c == Some(0)) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing a title column. Found headers: {:?}.",
            found
        ));
    }

    let mut interventions = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let field = |col: usize| -> &str {
            col_map
                .iter()
                .position(|c| *c == Some(col))
                .and_then(|i| record.get(i))
                .unwrap_or("")
        };

        let title = field(0).trim();
        if title.is_empty() {
            skipped += 1;
            continue;
        }

        let mut iv = Intervention::draft(title).with_client(field(1));
        iv.status = parse_status(field(2));
        iv.start = parse_date_time(field(3));
        iv.end = parse_date_time(field(4));
        for name in field(5).split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if let Some(r) = resources.iter().find(|r| r.name.eq_ignore_ascii_case(name)) {
                iv = iv.with_resource(r.id);
            }
        }
        interventions.push(iv);
    }

    Ok((interventions, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;

    #[test]
    fn test_parse_date_time_formats() {
        assert!(parse_date_time("02/03/2026 09:30").is_some());
        assert!(parse_date_time("2026-03-02 09:30").is_some());
        let midnight = parse_date_time("02/03/2026").unwrap();
        assert_eq!(midnight.time(), NaiveTime::MIN);
        assert!(parse_date_time("not a date").is_none());
    }

    #[test]
    fn test_import_resolves_resources_by_name() {
        let crane = Resource::new("LTM 1060", ResourceKind::Crane);
        let resources = vec![crane.clone()];

        let path = std::env::temp_dir().join("rental-planner-import.csv");
        std::fs::write(
            &path,
            "Title;Client;Status;Start;End;Resources\n\
             Bridge lift;Acme;Confirmed;02/03/2026 08:00;02/03/2026 12:00;ltm 1060\n\
             ;;;;;\n",
        )
        .unwrap();

        let (ivs, skipped) = import_csv(&path, &resources).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(ivs.len(), 1);
        assert_eq!(skipped, 1);
        assert_eq!(ivs[0].title, "Bridge lift");
        assert_eq!(ivs[0].status, InterventionStatus::Confirmed);
        assert_eq!(ivs[0].resources, vec![crane.id]);
        assert!(ivs[0].span().is_some());
    }
}
