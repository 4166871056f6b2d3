//! Markdown rendering of the list view.

use std::fmt;

use crate::list_view::{ListView, EMPTY_STATE};

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Basemap")?;
        writeln!(f)?;
        for (basemap, active) in self.basemap_buttons() {
            if active {
                writeln!(f, "- **{basemap}** (active)")?;
            } else {
                writeln!(f, "- {basemap}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Marked Locations")?;
        writeln!(f)?;
        if self.is_empty() {
            return writeln!(f, "{EMPTY_STATE}");
        }
        for row in self.rows() {
            writeln!(f, "### {}. {} (ID: {})", row.position, row.name, row.id)?;
            writeln!(f)?;
            writeln!(f, "- {}", row.coordinates)?;
            writeln!(f, "- Basemap: {}", row.basemap)?;
            writeln!(
                f,
                "- [{}] Include field notes",
                if row.include_notes { "x" } else { " " }
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}
