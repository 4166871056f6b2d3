//! Command arguments and their handlers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types with `From`, so the core never depends on clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → FieldMaps
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fieldmaps_core::{
    capture::SchematicRasterizer,
    document::PdfWriter,
    map::{HeadlessMap, MapView},
    params::{
        ClearLocations, ExportDocument, Id, MoveLocation, RenameLocation, SetView, ToggleNotes,
    },
    Basemap, ClearResult, CreateResult, DeleteResult, ExportOutcome, ExportResult, FieldMaps,
    FieldMapsError, ListView, OperationStatus, RowAction, UpdateResult,
};
use log::debug;

use crate::{args::Commands, renderer::TerminalRenderer};

/// Mark the current map view
///
/// Any of `--lat`, `--lng` or `--zoom` moves the map first; the others keep
/// their current values.
#[derive(Args)]
pub struct MarkArgs {
    #[arg(long, allow_negative_numbers = true, help = "Latitude to move to before marking")]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Longitude to move to before marking")]
    pub lng: Option<f64>,
    #[arg(short, long, help = "Zoom level to use before marking")]
    pub zoom: Option<u8>,
    #[arg(short, long, help = "Name for the new location")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct RenameArgs {
    #[arg(help = "ID of the location to rename")]
    pub id: u64,
    #[arg(help = "New name; a blank name keeps the current one")]
    pub name: String,
}

impl From<RenameArgs> for RenameLocation {
    fn from(val: RenameArgs) -> Self {
        RenameLocation {
            id: val.id,
            name: val.name,
        }
    }
}

#[derive(Args)]
pub struct LocationArgs {
    #[arg(help = "ID of the marked location")]
    pub id: u64,
}

impl From<LocationArgs> for Id {
    fn from(val: LocationArgs) -> Self {
        Id { id: val.id }
    }
}

/// Include or exclude the field notes page
///
/// The notes page follows the location's map page on export: a dashed grid
/// on the left half and ruled writing lines on the right.
#[derive(Args)]
pub struct NotesArgs {
    #[arg(help = "ID of the marked location")]
    pub id: u64,
    #[arg(long, help = "Exclude the notes page instead of including it")]
    pub off: bool,
}

impl From<NotesArgs> for ToggleNotes {
    fn from(val: NotesArgs) -> Self {
        ToggleNotes {
            id: val.id,
            included: !val.off,
        }
    }
}

/// Reorder the list by dropping one location onto another
///
/// Dragging down places the location just after the target; dragging up
/// places it just before.
#[derive(Args)]
pub struct MoveArgs {
    #[arg(help = "ID of the location being moved")]
    pub dragged: u64,
    #[arg(help = "ID of the location it is dropped on")]
    pub target: u64,
}

impl From<MoveArgs> for MoveLocation {
    fn from(val: MoveArgs) -> Self {
        MoveLocation {
            dragged: val.dragged,
            target: val.target,
        }
    }
}

#[derive(Args)]
pub struct BasemapArgs {
    #[arg(help = "Basemap to show: linz, osm or aerial")]
    pub basemap: Basemap,
}

#[derive(Args)]
pub struct ViewArgs {
    #[arg(long, allow_negative_numbers = true, help = "Latitude of the map centre")]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true, help = "Longitude of the map centre")]
    pub lng: f64,
    #[arg(short, long, help = "Zoom level (0-19)")]
    pub zoom: u8,
}

impl From<ViewArgs> for SetView {
    fn from(val: ViewArgs) -> Self {
        SetView {
            lat: val.lat,
            lng: val.lng,
            zoom: val.zoom,
        }
    }
}

#[derive(Args)]
pub struct ClearArgs {
    #[arg(long, help = "Confirm removing every marked location")]
    pub confirm: bool,
}

impl From<ClearArgs> for ClearLocations {
    fn from(val: ClearArgs) -> Self {
        ClearLocations {
            confirmed: val.confirm,
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(
        short,
        long,
        default_value = ".",
        help = "Directory to write the PDF into"
    )]
    pub output_dir: PathBuf,
}

impl From<ExportArgs> for ExportDocument {
    fn from(val: ExportArgs) -> Self {
        ExportDocument {
            output_dir: val.output_dir,
        }
    }
}

/// Runs one command against a restored session.
pub struct Cli {
    app: FieldMaps<HeadlessMap, SchematicRasterizer>,
    list: ListView,
    renderer: TerminalRenderer,
    session_path: PathBuf,
}

impl Cli {
    pub fn new(
        app: FieldMaps<HeadlessMap, SchematicRasterizer>,
        renderer: TerminalRenderer,
        session_path: PathBuf,
    ) -> Self {
        let list = ListView::attach(&app);
        Self {
            app,
            list,
            renderer,
            session_path,
        }
    }

    pub async fn run(mut self, command: Option<Commands>) -> Result<()> {
        match command {
            None | Some(Commands::List) => self.show_list(),
            Some(Commands::Mark(args)) => self.mark(args),
            Some(Commands::Rename(args)) => self.rename(args.into()),
            Some(Commands::Goto(args)) => self.go_to(args.into()),
            Some(Commands::Delete(args)) => self.delete(args.into()),
            Some(Commands::Notes(args)) => self.notes(args.into()),
            Some(Commands::Move(args)) => self.move_location(args.into()),
            Some(Commands::Basemap(args)) => self.basemap(args.basemap),
            Some(Commands::View(args)) => self.view(&args.into()),
            Some(Commands::Clear(args)) => self.clear(&args.into()),
            Some(Commands::Export(args)) => self.export(args.into()).await,
        }
    }

    fn save_session(&self) -> Result<()> {
        self.app
            .session()
            .save(&self.session_path)
            .with_context(|| {
                format!(
                    "Failed to save session to {}",
                    self.session_path.display()
                )
            })
    }

    fn show_list(&mut self) -> Result<()> {
        self.list.sync(&self.app);
        let output = format!("Map view: {}\n\n{}", self.app.map().view(), self.list);
        self.renderer.render(&output)
    }

    fn mark(&mut self, args: MarkArgs) -> Result<()> {
        if args.lat.is_some() || args.lng.is_some() || args.zoom.is_some() {
            let current = self.app.map().view();
            self.app
                .set_view(&SetView {
                    lat: args.lat.unwrap_or(current.center.lat),
                    lng: args.lng.unwrap_or(current.center.lng),
                    zoom: args.zoom.unwrap_or(current.zoom),
                })
                .context("Failed to move the map")?;
        }

        let Some(mut location) = self.app.mark_current_view()? else {
            return self
                .renderer
                .render(&OperationStatus::failure("Mark ignored during cool-down").to_string());
        };
        if let Some(name) = args.name {
            self.app.rename_location(&RenameLocation {
                id: location.id,
                name,
            })?;
            if let Some(renamed) = self.app.store().get(location.id) {
                location = renamed.clone();
            }
        }
        self.save_session()?;
        self.renderer.render(&CreateResult::new(location).to_string())
    }

    fn rename(&mut self, params: RenameLocation) -> Result<()> {
        let id = params.id;
        let old_name = self
            .app
            .store()
            .get(id)
            .map(|l| l.name.clone())
            .ok_or(FieldMapsError::LocationNotFound { id })?;
        self.list
            .dispatch(&mut self.app, id, RowAction::Rename(params.name))?;
        let location = self
            .app
            .store()
            .get(id)
            .cloned()
            .ok_or(FieldMapsError::LocationNotFound { id })?;

        let mut changes = Vec::new();
        if location.name != old_name {
            changes.push(format!("Renamed from '{old_name}' to '{}'", location.name));
        }
        self.save_session()?;
        self.renderer
            .render(&UpdateResult::with_changes(location, changes).to_string())
    }

    fn go_to(&mut self, params: Id) -> Result<()> {
        self.list.dispatch(&mut self.app, params.id, RowAction::GoTo)?;
        self.save_session()?;
        self.renderer.render(
            &OperationStatus::success(format!("Map centred on {}", self.app.map().view()))
                .to_string(),
        )
    }

    fn delete(&mut self, params: Id) -> Result<()> {
        let location = self
            .app
            .store()
            .get(params.id)
            .cloned()
            .ok_or(FieldMapsError::LocationNotFound { id: params.id })?;
        self.list
            .dispatch(&mut self.app, params.id, RowAction::Delete)?;
        self.save_session()?;
        self.renderer
            .render(&DeleteResult::new(location).to_string())
    }

    fn notes(&mut self, params: ToggleNotes) -> Result<()> {
        let id = params.id;
        self.list
            .dispatch(&mut self.app, id, RowAction::ToggleNotes(params.included))?;
        let location = self
            .app
            .store()
            .get(id)
            .cloned()
            .ok_or(FieldMapsError::LocationNotFound { id })?;
        let change = if params.included {
            "Field notes page included"
        } else {
            "Field notes page excluded"
        };
        self.save_session()?;
        self.renderer
            .render(&UpdateResult::with_changes(location, vec![change.to_string()]).to_string())
    }

    fn move_location(&mut self, params: MoveLocation) -> Result<()> {
        let MoveLocation { dragged, target } = params;
        for id in [dragged, target] {
            if self.app.store().get(id).is_none() {
                return Err(FieldMapsError::LocationNotFound { id }.into());
            }
        }

        self.list.drag_start(dragged);
        self.list.drag_enter(target);
        let moved = self.list.drop_on(&mut self.app, target);
        self.list.drag_end();
        debug!("Drop of {dragged} on {target} moved: {moved}");

        if moved {
            self.save_session()?;
        }
        self.show_list()
    }

    fn basemap(&mut self, basemap: Basemap) -> Result<()> {
        let message = if self.app.switch_basemap(basemap) {
            format!("Basemap switched to {basemap}")
        } else {
            format!("{basemap} is already active")
        };
        self.save_session()?;
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    fn view(&mut self, params: &SetView) -> Result<()> {
        let view = self.app.set_view(params)?;
        self.save_session()?;
        self.renderer
            .render(&OperationStatus::success(format!("Map view set to {view}")).to_string())
    }

    fn clear(&mut self, params: &ClearLocations) -> Result<()> {
        let removed = self
            .app
            .clear_locations(params)
            .context("Refusing to clear the list; pass --confirm to remove every location")?;
        self.save_session()?;
        self.renderer.render(&ClearResult(removed).to_string())
    }

    async fn export(&mut self, params: ExportDocument) -> Result<()> {
        std::fs::create_dir_all(&params.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                params.output_dir.display()
            )
        })?;

        let mut writer = PdfWriter::default();
        let renderer = &self.renderer;
        let result = self
            .app
            .export(&mut writer, &params, |progress| {
                renderer.progress(&progress.to_string());
            })
            .await;
        if !matches!(result, Ok(ExportOutcome::Rejected(_))) {
            renderer.finish_progress();
        }

        let outcome = result.context("Failed to export PDF")?;
        self.renderer.render(&ExportResult(outcome).to_string())
    }
}
