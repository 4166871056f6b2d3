//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    document::Progress,
    export::{ExportOutcome, ExportReport},
    models::MarkedLocation,
};

/// A location that was just marked.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<MarkedLocation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Marked location with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A location after an edit, with the changes that were applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<MarkedLocation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated location with ID: {}", self.resource.id)?;

        if self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "No changes made.")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<MarkedLocation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted location '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

/// Locations removed by a clear-all.
pub struct ClearResult(pub Vec<MarkedLocation>);

impl fmt::Display for ClearResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No locations to clear.");
        }
        writeln!(f, "Cleared {} location(s):", self.0.len())?;
        writeln!(f)?;
        for location in &self.0 {
            writeln!(f, "- {} (ID: {})", location.name, location.id)?;
        }
        Ok(())
    }
}

pub struct ExportResult(pub ExportOutcome);

impl fmt::Display for ExportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ExportOutcome::Saved(report) => write!(f, "{report}"),
            ExportOutcome::Rejected(reason) => writeln!(f, "{reason}"),
        }
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Exported {} location(s) as {} page(s)",
            self.locations, self.pages
        )?;
        writeln!(f)?;
        writeln!(f, "- File: `{}`", self.path.display())
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generating page {}/{}", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use jiff::Timestamp;

    use super::*;
    use crate::{export::ExportRejection, models::Basemap};

    fn location() -> MarkedLocation {
        MarkedLocation {
            id: 2,
            name: "Saddle".to_string(),
            lat: -44.1,
            lng: 169.9,
            zoom: 13,
            basemap: Basemap::OpenStreetMap,
            include_notes: true,
            marker: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result =
            UpdateResult::with_changes(location(), vec!["Renamed to 'Saddle'".to_string()]);
        let output = result.to_string();
        assert!(output.contains("Updated location with ID: 2"));
        assert!(output.contains("- Renamed to 'Saddle'"));

        let unchanged = UpdateResult::with_changes(location(), Vec::new()).to_string();
        assert!(unchanged.contains("No changes made."));
    }

    #[test]
    fn test_export_result_display() {
        let saved = ExportResult(ExportOutcome::Saved(ExportReport {
            path: PathBuf::from("/tmp/field-maps-Saddle-2024-01-01.pdf"),
            locations: 1,
            pages: 2,
        }));
        let output = saved.to_string();
        assert!(output.contains("Exported 1 location(s) as 2 page(s)"));
        assert!(output.contains("field-maps-Saddle-2024-01-01.pdf"));

        let rejected = ExportResult(ExportOutcome::Rejected(ExportRejection::NoLocations));
        assert!(rejected.to_string().contains("Please mark at least one location"));
    }

    #[test]
    fn test_clear_and_progress_display() {
        assert_eq!(ClearResult(Vec::new()).to_string(), "No locations to clear.\n");
        assert!(ClearResult(vec![location()])
            .to_string()
            .contains("- Saddle (ID: 2)"));
        assert_eq!(
            Progress {
                current: 2,
                total: 5
            }
            .to_string(),
            "Generating page 2/5"
        );
    }
}
