//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Basemap, LatLng, MarkedLocation, ViewState};

impl fmt::Display for Basemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Zoom: {})", self.center, self.zoom)
    }
}

impl fmt::Display for MarkedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Coordinates: {}", self.view())?;
        writeln!(f, "- Basemap: {}", self.basemap)?;
        writeln!(
            f,
            "- Field notes: {}",
            if self.include_notes {
                "included"
            } else {
                "not included"
            }
        )?;
        writeln!(f, "- Marked: {}", LocalDateTime(&self.created_at))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn test_view_state_display() {
        let view = ViewState::new(LatLng::new(-41.2865, 174.7762), 13);
        assert_eq!(view.to_string(), "-41.286500, 174.776200 (Zoom: 13)");
    }

    #[test]
    fn test_location_display_lists_fields() {
        let location = MarkedLocation {
            id: 4,
            name: "Hut".to_string(),
            lat: -43.0,
            lng: 171.5,
            zoom: 15,
            basemap: Basemap::LinzAerial,
            include_notes: false,
            marker: None,
            created_at: Timestamp::UNIX_EPOCH,
        };
        let output = location.to_string();
        assert!(output.starts_with("### Hut\n"));
        assert!(output.contains("- ID: 4"));
        assert!(output.contains("-43.000000, 171.500000 (Zoom: 15)"));
        assert!(output.contains("- Basemap: LINZ Aerial"));
        assert!(output.contains("- Field notes: not included"));
    }
}
