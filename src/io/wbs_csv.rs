use std::path::Path;

use log::warn;

use crate::model::{Phase, PhaseTask, WorkBreakdown};

/// Try parsing an hour value; accepts a decimal comma ("12,5") as well
/// as a decimal point.
fn parse_hours(s: &str) -> Option<f64> {
    let normalized = s.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|h| h.is_finite())
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
///   0 = phase, 1 = task, 2 = hours, 3 = description
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "phase" | "phasename" | "stage" | "etapa" | "fase" => Some(0),

        "task" | "taskname" | "activity" | "deliverable" | "atividade" | "tarefa" => Some(1),

        "hours" | "estimatedhours" | "hourestimate" | "effort" | "horas" => Some(2),

        "description" | "notes" | "note" | "details" | "descricao" | "descrição" => Some(3),

        _ => None,
    }
}

/// Import a formal work breakdown from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column
/// headers flexibly, in English or Portuguese. Each row names a phase;
/// rows with a task name add a task under that phase, rows without one
/// set the phase's own hour estimate. Rows repeating an earlier phase
/// name are grouped into it.
/// Returns `(breakdown, skipped_count)` on success.
pub fn import_work_breakdown(path: &Path) -> Result<(WorkBreakdown, usize), String> {
    // Read the whole file to detect delimiter from the first line
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    parse_work_breakdown(&content)
}

/// Parse work-breakdown CSV content. Split out from the file wrapper so
/// it can be exercised without touching the filesystem.
pub fn parse_work_breakdown(content: &str) -> Result<(WorkBreakdown, usize), String> {
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

    let has_phase = col_map.iter().any(|c| *c == Some(0));
    let has_hours = col_map.iter().any(|c| *c == Some(2));

    if !has_phase || !has_hours {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing required columns. Found headers: {:?}. \
             Need columns for: phase name, hours.",
            found
        ));
    }

    let mut phases: Vec<Phase> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut phase_val = None;
        let mut task_val = None;
        let mut hours_val = None;
        let mut description_val = None;

        for (col_idx, field) in record.iter().enumerate() {
            if col_idx < col_map.len() {
                match col_map[col_idx] {
                    Some(0) => phase_val = Some(field.trim().to_string()),
                    Some(1) => task_val = Some(field.trim().to_string()),
                    Some(2) => hours_val = Some(field.trim().to_string()),
                    Some(3) => description_val = Some(field.trim().to_string()),
                    _ => {}
                }
            }
        }

        let phase_name = match phase_val {
            Some(n) if !n.is_empty() => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let hours = match hours_val.as_deref().and_then(parse_hours) {
            Some(h) => h,
            None => {
                warn!(
                    "skipping row {}: invalid hours '{}'",
                    i + 2,
                    hours_val.as_deref().unwrap_or("")
                );
                skipped += 1;
                continue;
            }
        };

        // Group rows into an existing phase by name, order of first
        // appearance preserved.
        let position = phases
            .iter()
            .position(|p| p.name.to_lowercase() == phase_name.to_lowercase());
        let phase = match position {
            Some(idx) => &mut phases[idx],
            None => {
                phases.push(Phase::new(phase_name, 0.0));
                let last = phases.len() - 1;
                &mut phases[last]
            }
        };

        if let Some(description) = description_val.filter(|s| !s.is_empty()) {
            if phase.description.is_none() {
                phase.description = Some(description);
            }
        }

        match task_val.filter(|s| !s.is_empty()) {
            Some(task_name) => phase.tasks.push(PhaseTask::new(task_name, hours)),
            None => phase.estimated_hours = hours,
        }
    }

    if phases.is_empty() && skipped > 0 {
        return Err(format!("No valid phases found in CSV ({} rows skipped)", skipped));
    }
    if phases.is_empty() {
        return Err("CSV file is empty or has no data rows".to_string());
    }

    Ok((WorkBreakdown::new(phases), skipped))
}
