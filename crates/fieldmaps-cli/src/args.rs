use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use fieldmaps_core::map::DEFAULT_VIEWPORT;

use crate::cli::{
    BasemapArgs, ClearArgs, ExportArgs, LocationArgs, MarkArgs, MoveArgs, NotesArgs, RenameArgs,
    ViewArgs,
};

/// Mark locations on a map and export them as a printable field map
///
/// Each invocation restores the saved session (map view, basemap and marked
/// locations), applies one command and saves the session again. Exports
/// produce one A4 landscape page per marked location, optionally followed by
/// a grid/ruled notes page.
#[derive(Parser)]
#[command(version, about, name = "fieldmaps")]
pub struct Args {
    /// Path to the session file. Defaults to
    /// $XDG_DATA_HOME/fieldmaps/session.json
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Milliseconds to let tiles settle before each capture
    #[arg(long, global = true)]
    pub settle_ms: Option<u64>,

    /// Map viewport size in pixels, as WIDTHxHEIGHT
    #[arg(long, global = true, default_value_t = Viewport::default())]
    pub viewport: Viewport,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands; with none given the list is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Mark the current map view as a new location
    #[command(alias = "m")]
    Mark(MarkArgs),
    /// Show the marked locations and basemap
    #[command(alias = "ls")]
    List,
    /// Rename a marked location
    Rename(RenameArgs),
    /// Centre the map on a marked location
    Goto(LocationArgs),
    /// Delete a marked location
    #[command(alias = "rm")]
    Delete(LocationArgs),
    /// Include or exclude the field notes page after a location
    Notes(NotesArgs),
    /// Drag a location onto another one to reorder the list
    #[command(alias = "mv")]
    Move(MoveArgs),
    /// Switch the active basemap
    Basemap(BasemapArgs),
    /// Pan and zoom the map
    View(ViewArgs),
    /// Remove every marked location
    Clear(ClearArgs),
    /// Export all marked locations to a PDF
    #[command(alias = "x")]
    Export(ExportArgs),
}

/// Largest accepted viewport side in pixels.
const MAX_VIEWPORT_SIDE: u32 = 4096;

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        let (width, height) = DEFAULT_VIEWPORT;
        Self { width, height }
    }
}

impl From<Viewport> for (u32, u32) {
    fn from(val: Viewport) -> Self {
        (val.width, val.height)
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .ok()
                .filter(|v| (1..=MAX_VIEWPORT_SIDE).contains(v))
                .ok_or_else(|| {
                    format!(
                        "invalid viewport dimension '{part}', expected 1-{MAX_VIEWPORT_SIDE}"
                    )
                })
        };
        Ok(Self {
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_parse() {
        assert_eq!(
            "800x600".parse::<Viewport>().unwrap(),
            Viewport {
                width: 800,
                height: 600
            }
        );
        assert!("800".parse::<Viewport>().is_err());
        assert!("0x600".parse::<Viewport>().is_err());
        assert!("50000x50000".parse::<Viewport>().is_err());
        assert!("4096x4096".parse::<Viewport>().is_ok());
        assert_eq!(Viewport::default().to_string(), "1024x768");
    }
}
