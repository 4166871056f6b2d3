//! Basemap identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three swappable background tile layers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Basemap {
    /// LINZ topographic raster
    #[default]
    #[serde(rename = "linz")]
    LinzTopo,

    /// OpenStreetMap standard tiles
    #[serde(rename = "osm")]
    OpenStreetMap,

    /// LINZ aerial imagery
    #[serde(rename = "aerial")]
    LinzAerial,
}

impl Basemap {
    /// Every basemap, in control order.
    pub const ALL: [Basemap; 3] = [
        Basemap::LinzTopo,
        Basemap::OpenStreetMap,
        Basemap::LinzAerial,
    ];

    /// Short key used in session files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Basemap::LinzTopo => "linz",
            Basemap::OpenStreetMap => "osm",
            Basemap::LinzAerial => "aerial",
        }
    }

    /// User-facing name shown on the basemap control and in the list.
    pub fn label(&self) -> &'static str {
        match self {
            Basemap::LinzTopo => "LINZ Topo",
            Basemap::OpenStreetMap => "OpenStreetMap",
            Basemap::LinzAerial => "LINZ Aerial",
        }
    }
}

impl FromStr for Basemap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Basemap::ALL
            .into_iter()
            .find(|b| {
                b.as_str().eq_ignore_ascii_case(needle) || b.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Invalid basemap: {s}"))
    }
}
