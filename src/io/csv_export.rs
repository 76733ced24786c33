use std::path::Path;

use crate::model::Schedule;

/// Export a schedule to a semicolon-delimited CSV file.
///
/// Columns: Phase ; Start Date ; End Date ; Working Days ; Hours ; Milestones
/// Dates are formatted as DD/MM/YYYY.
/// Returns the number of phases written.
pub fn export_schedule_csv(schedule: &Schedule, path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    // Write header
    wtr.write_record([
        "Phase",
        "Start Date",
        "End Date",
        "Working Days",
        "Hours",
        "Milestones",
    ])
    .map_err(|e| format!("Failed to write header: {}", e))?;

    // Write each phase
    for phase in &schedule.phases {
        wtr.write_record([
            &phase.phase_name,
            &phase.start_date.format("%d/%m/%Y").to_string(),
            &phase.end_date.format("%d/%m/%Y").to_string(),
            &phase.working_days.to_string(),
            &phase.hours.to_string(),
            &phase.milestones.join(" | "),
        ])
        .map_err(|e| format!("Failed to write phase '{}': {}", phase.phase_name, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(schedule.phases.len())
}
