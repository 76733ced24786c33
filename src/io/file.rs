use std::path::Path;

use crate::model::{Proposal, WorkBreakdown};

/// Save a proposal to a JSON file.
pub fn save_proposal(proposal: &Proposal, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(proposal).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Load a proposal from a JSON file.
pub fn load_proposal(path: &Path) -> Result<Proposal, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&json).map_err(|e| e.to_string())
}

/// Load a work breakdown from a JSON file.
pub fn load_work_breakdown(path: &Path) -> Result<WorkBreakdown, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&json).map_err(|e| e.to_string())
}
