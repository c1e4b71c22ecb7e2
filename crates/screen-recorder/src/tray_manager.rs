//! System tray icon, control menu and source picker.
//!
//! The tray menu carries the fixed controls plus a "Sources" submenu that
//! is rebuilt every time the host is asked to show the picker.

use crate::{AppError, AppResult, TrayIconState};

use screen_recorder_core::{
    CaptureError, CoreResult, MenuItem as SourceItem, MenuPresenter, SelectionNotifier, Thumbnail,
};

use std::{collections::HashMap, panic::Location};

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tracing::{debug, info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;
const IDLE_COLOR: [u8; 4] = [0x6b, 0x72, 0x80, 0xff];
const RECORDING_COLOR: [u8; 4] = [0xdc, 0x26, 0x26, 0xff];

/// Ids of the fixed tray menu items.
#[derive(Debug, Clone)]
pub struct MenuIds {
    /// "Select Source…"
    pub select_source: MenuId,
    /// "Start Recording"
    pub start: MenuId,
    /// "Stop Recording"
    pub stop: MenuId,
    /// "Open Recordings Folder"
    pub open_folder: MenuId,
    /// "Exit"
    pub exit: MenuId,
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    ids: MenuIds,
    start_item: MenuItem,
    stop_item: MenuItem,
    sources_menu: Submenu,
    source_entries: Vec<MenuItem>,
    selections: HashMap<MenuId, String>,
    notifier: Option<SelectionNotifier>,
    generation: u64,
    preview: Option<(String, Option<Thumbnail>)>,
    state: TrayIconState,
}

impl TrayManager {
    /// Create a new tray manager in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let select_item = MenuItem::new("Select Source…", true, None);
        let sources_menu = Submenu::new("Sources", true);
        let placeholder = MenuItem::new("Use Select Source… to list screens", false, None);
        let start_item = MenuItem::new("Start Recording", true, None);
        let stop_item = MenuItem::new("Stop Recording", false, None);
        let open_folder_item = MenuItem::new("Open Recordings Folder", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        sources_menu
            .append(&placeholder)
            .map_err(|e| tray_error(format!("Failed to add sources placeholder: {}", e)))?;

        menu.append_items(&[
            &select_item,
            &sources_menu,
            &PredefinedMenuItem::separator(),
            &start_item,
            &stop_item,
            &PredefinedMenuItem::separator(),
            &open_folder_item,
            &exit_item,
        ])
        .map_err(|e| tray_error(format!("Failed to build tray menu: {}", e)))?;

        let ids = MenuIds {
            select_source: select_item.id().clone(),
            start: start_item.id().clone(),
            stop: stop_item.id().clone(),
            open_folder: open_folder_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip("Screen Recorder - Ready")
            .with_menu(Box::new(menu))
            .with_icon(Self::status_icon(TrayIconState::Idle)?)
            .build()
            .map_err(|e| tray_error(format!("Failed to create tray icon: {}", e)))?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            ids,
            start_item,
            stop_item,
            sources_menu,
            source_entries: vec![placeholder],
            selections: HashMap::new(),
            notifier: None,
            generation: 0,
            preview: None,
            state: TrayIconState::Idle,
        })
    }

    /// Update the tray icon, tooltip and control items for a new state.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        self.state = state;

        let (icon, tooltip) = match (state, &self.preview) {
            (TrayIconState::Idle, Some((label, thumbnail))) => (
                match thumbnail {
                    Some(thumbnail) => Self::thumbnail_icon(thumbnail)?,
                    None => Self::status_icon(state)?,
                },
                format!("Screen Recorder - {}", label),
            ),
            (TrayIconState::Idle, None) => (
                Self::status_icon(state)?,
                "Screen Recorder - Ready".to_string(),
            ),
            (TrayIconState::Recording, _) => (
                Self::status_icon(state)?,
                format!("Screen Recorder - {}", screen_recorder_core::RECORDING_MESSAGE),
            ),
        };

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| tray_error(format!("Failed to update icon: {}", e)))?;

        self.tray_icon
            .set_tooltip(Some(tooltip))
            .map_err(|e| tray_error(format!("Failed to update tooltip: {}", e)))?;

        self.start_item.set_enabled(state == TrayIconState::Idle);
        self.stop_item.set_enabled(state == TrayIconState::Recording);

        Ok(())
    }

    /// Show the selected source in the tray while idle.
    #[track_caller]
    pub fn show_preview(&mut self, label: String, thumbnail: Option<Thumbnail>) -> AppResult<()> {
        self.preview = Some((label, thumbnail));
        self.update_state(self.state)
    }

    /// Routes a click on a source entry to the picker's notifier.
    #[instrument(skip(self))]
    pub fn activate(&mut self, id: &MenuId) {
        let Some(source_id) = self.selections.get(id) else {
            debug!(menu_id = ?id, "Click on unknown menu item");
            return;
        };
        match &self.notifier {
            Some(notifier) => notifier.notify(source_id),
            None => debug!(source_id = %source_id, "Source clicked with no picker open"),
        }
    }

    /// Fixed menu item ids.
    pub fn menu_ids(&self) -> &MenuIds {
        &self.ids
    }

    #[track_caller]
    fn rebuild_sources(&mut self, items: &[SourceItem]) -> AppResult<()> {
        for entry in self.source_entries.drain(..) {
            self.sources_menu
                .remove(&entry)
                .map_err(|e| tray_error(format!("Failed to clear source entry: {}", e)))?;
        }
        self.selections.clear();
        self.generation += 1;

        if items.is_empty() {
            let empty = MenuItem::new("No sources found", false, None);
            self.sources_menu
                .append(&empty)
                .map_err(|e| tray_error(format!("Failed to add source entry: {}", e)))?;
            self.source_entries.push(empty);
            return Ok(());
        }

        for item in items {
            let id = source_menu_id(self.generation, &item.id);
            let entry = MenuItem::with_id(id.clone(), &item.label, true, None);
            self.sources_menu
                .append(&entry)
                .map_err(|e| tray_error(format!("Failed to add source entry: {}", e)))?;
            self.selections.insert(id, item.id.clone());
            self.source_entries.push(entry);
        }

        Ok(())
    }

    #[track_caller]
    fn status_icon(state: TrayIconState) -> AppResult<Icon> {
        let image = status_image(state);
        let (width, height) = image.dimensions();
        Icon::from_rgba(image.into_raw(), width, height)
            .map_err(|e| tray_error(format!("Failed to create icon from RGBA: {}", e)))
    }

    #[track_caller]
    fn thumbnail_icon(thumbnail: &Thumbnail) -> AppResult<Icon> {
        Icon::from_rgba(
            thumbnail.as_rgba().to_vec(),
            thumbnail.width(),
            thumbnail.height(),
        )
        .map_err(|e| tray_error(format!("Failed to create icon from thumbnail: {}", e)))
    }
}

impl MenuPresenter for TrayManager {
    #[track_caller]
    fn popup(&mut self, items: &[SourceItem], notifier: SelectionNotifier) -> CoreResult<()> {
        self.rebuild_sources(items).map_err(|e| CaptureError::Menu {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        self.notifier = Some(notifier);

        info!(item_count = items.len(), "Source picker ready in tray menu");

        Ok(())
    }
}

/// Menu id of a picker entry. Unique per rebuild so late clicks on a
/// replaced menu are not mistaken for the new one.
pub(crate) fn source_menu_id(generation: u64, source_id: &str) -> MenuId {
    MenuId::new(format!("source:{}:{}", generation, source_id))
}

/// Filled circle on a transparent square, colored by state.
pub(crate) fn status_image(state: TrayIconState) -> RgbaImage {
    let color = match state {
        TrayIconState::Idle => IDLE_COLOR,
        TrayIconState::Recording => RECORDING_COLOR,
    };
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        if dx * dx + dy * dy <= radius * radius {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[track_caller]
fn tray_error(reason: String) -> AppError {
    AppError::TrayError {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
