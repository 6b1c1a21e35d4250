use std::path::Path;

use tracing::info;

use crate::domain::ReportError;
use crate::domain::labels::LabelTables;

/// Load lookup tables from a JSON file. Tables absent from the file keep their defaults.
pub fn load_label_tables(path: &Path) -> Result<LabelTables, ReportError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| ReportError::Labels(format!("{}: {err}", path.display())))?;
    let labels: LabelTables = serde_json::from_str(&contents)
        .map_err(|err| ReportError::Labels(format!("{}: {err}", path.display())))?;
    info!(
        path = %path.display(),
        genres = labels.genre_personas.len(),
        places = labels.place_labels.len(),
        "loaded label tables"
    );
    Ok(labels)
}
