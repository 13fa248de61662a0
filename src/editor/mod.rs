// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The graph editor facade.
//!
//! [`QuiltGraph`] owns the passage store and everything derived from it. Every mutation goes
//! through here so the edge set is rebuilt and observers are notified afterwards.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, GraphConfig};
use crate::diagnostics::{self, Report};
use crate::events::{Delivery, EventBus, EventKind, GraphEvent, SubscriptionId};
use crate::format::{
    self, export_base_name, extract_links, ExportArtifact, FormatError, SourceFormat, TweeStory,
    DEFAULT_EXPORT_BASE,
};
use crate::graph::{build_edges, EdgeSet};
use crate::interaction::{EditorSession, PointerUpdate};
use crate::model::{Passage, PassageId, PassagePatch, Position};
use crate::render::geometry::{snap_to_grid, Point, Size};
use crate::render::{card_center, route_connectors, Connector};
use crate::store::{PassageStore, StoreError};
use crate::viewport::Viewport;

mod source;

pub use source::{ChangeOrigin, SourceEditor, TextChange};

#[derive(Debug)]
pub enum GraphError {
    Store(StoreError),
    Format(FormatError),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for GraphError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<FormatError> for GraphError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

/// Wheel input as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Ctrl held (or a trackpad pinch): zoom instead of pan.
    pub zoom: bool,
}

#[derive(Debug)]
pub struct QuiltGraph {
    config: GraphConfig,
    store: PassageStore,
    edges: EdgeSet,
    viewport: Viewport,
    session: EditorSession,
    events: EventBus,
    export_base: Option<String>,
}

impl QuiltGraph {
    pub fn new(config: GraphConfig, container: Size) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = Viewport::new(&config, container);
        Ok(Self {
            config,
            store: PassageStore::new(),
            edges: EdgeSet::default(),
            viewport,
            session: EditorSession::new(),
            events: EventBus::new(),
            export_base: None,
        })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn store(&self) -> &PassageStore {
        &self.store
    }

    pub fn passages(&self) -> &[Passage] {
        self.store.all()
    }

    pub fn passage(&self, id: PassageId) -> Option<&Passage> {
        self.store.by_id(id)
    }

    pub fn passage_named(&self, name: &str) -> Option<&Passage> {
        self.store.by_name(name)
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&GraphEvent, &mut Delivery) + 'static,
    ) -> SubscriptionId {
        self.events.on(kind, listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }

    fn rebuild(&mut self) {
        self.edges = build_edges(&mut self.store);
    }

    fn emit_passages(&mut self, kind: EventKind, ids: &[PassageId]) {
        for &id in ids {
            let Some(passage) = self.store.by_id(id).cloned() else {
                continue;
            };
            let event = match kind {
                EventKind::New => GraphEvent::New(passage),
                EventKind::Delete => GraphEvent::Delete(passage),
                EventKind::Selected => GraphEvent::Selected(passage),
                EventKind::Unselected => GraphEvent::Unselected(passage),
                EventKind::DblClick => GraphEvent::DblClick(passage),
                EventKind::Open => continue,
            };
            self.events.emit(&event);
        }
    }

    // ---------------------------------------------------------------- passages

    /// Creates a passage and announces it.
    ///
    /// Without a position the passage goes to the first free grid cell scanning right from
    /// one grid unit inside the left edge of the view, at its vertical middle. Fails only when
    /// the story already holds the largest id.
    pub fn new_passage(
        &mut self,
        name: Option<&str>,
        text: Option<&str>,
        position: Option<Position>,
    ) -> Result<PassageId, GraphError> {
        let grid = self.config.grid_size;
        let position = match position {
            Some(position) => position.snapped(grid),
            None => {
                let view = self.viewport.visible_model_rect();
                let start = Position::new(
                    snap_to_grid(view.x + grid, grid),
                    snap_to_grid(view.y + view.height / 2.0, grid),
                );
                self.store.free_cell_near(start, grid)
            }
        };

        let id = self
            .store
            .create(name.map(ToOwned::to_owned), text.map(ToOwned::to_owned), position)
            .map_err(|err| {
                tracing::warn!(error = %err, "cannot create passage");
                err
            })?
            .id();
        self.rebuild();
        tracing::debug!(id = id.get(), x = position.x, y = position.y, "passage created");
        self.emit_passages(EventKind::New, &[id]);
        Ok(id)
    }

    /// Applies the fields present in `patch`; a new position is snapped to the grid.
    pub fn update_passage(&mut self, id: PassageId, mut patch: PassagePatch) -> Result<(), GraphError> {
        patch.position = patch.position.map(|position| position.snapped(self.config.grid_size));
        self.store.update(id, patch)?;
        self.rebuild();
        Ok(())
    }

    /// Removes a passage and announces a snapshot of it. Links to it simply stop resolving.
    pub fn delete_passage(&mut self, id: PassageId) -> Result<Passage, GraphError> {
        let removed = self.store.delete(id)?;
        self.after_delete(&removed);
        Ok(removed)
    }

    /// Name-keyed delete. A missing name is logged and ignored.
    pub fn delete_passage_named(&mut self, name: &str) -> Option<Passage> {
        let removed = self.store.delete_by_name(name)?;
        self.after_delete(&removed);
        Some(removed)
    }

    pub fn delete_selected(&mut self) -> Vec<Passage> {
        let ids = self.session.selection().in_store_order(&self.store);
        ids.into_iter()
            .filter_map(|id| self.delete_passage(id).ok())
            .collect()
    }

    fn after_delete(&mut self, removed: &Passage) {
        self.session.forget(removed.id());
        self.rebuild();
        tracing::debug!(id = removed.id().get(), name = removed.name(), "passage deleted");
        self.events.emit(&GraphEvent::Delete(removed.clone()));
    }

    /// Selected passages in store order.
    pub fn selected_passages(&self) -> Vec<&Passage> {
        self.store
            .all()
            .iter()
            .filter(|passage| self.session.selection().contains(passage.id()))
            .collect()
    }

    pub fn active_passage(&self) -> Option<&Passage> {
        self.session.active().and_then(|id| self.store.by_id(id))
    }

    // ---------------------------------------------------------------- viewport

    pub fn resize(&mut self, container: Size) {
        self.viewport.resize(container);
    }

    pub fn set_container(&mut self, origin: Point, size: Size) {
        self.viewport.set_container(origin, size);
    }

    pub fn set_zoom(&mut self, z: f64) -> f64 {
        self.viewport.set_zoom(z)
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// Centres the first selected passage, optionally at a new scale. `None` without a
    /// selection.
    pub fn zoom_to_selected(&mut self, target_scale: Option<f64>) -> Option<f64> {
        let first = self.selected_passages().first().map(|passage| passage.position())?;
        let center = card_center(first, self.config.card_size);
        Some(self.viewport.center_on(center, target_scale))
    }

    /// Zoom wheel scales by `1 - delta_y * zoom_speed` (towards the selection if there is
    /// one); a plain wheel pans unless the view is fully zoomed out. Returns whether the
    /// input was consumed.
    pub fn wheel(&mut self, input: WheelInput) -> bool {
        if input.zoom {
            let target = self.viewport.scale() * (1.0 - input.delta_y * self.config.zoom_speed);
            if self.zoom_to_selected(Some(target)).is_none() {
                self.viewport.set_zoom(target);
            }
            return true;
        }
        if self.viewport.is_at_min_zoom() {
            return false;
        }
        self.viewport.pan_by(-input.delta_x, -input.delta_y);
        true
    }

    // ---------------------------------------------------------------- pointer

    pub fn press_card(&mut self, id: PassageId, screen: Point) -> Result<(), GraphError> {
        let change = self.session.press_card(&self.store, &self.viewport, id, screen)?;
        self.emit_passages(EventKind::Unselected, &change.unselected);
        self.emit_passages(EventKind::Selected, &change.selected);
        Ok(())
    }

    pub fn press_background(&mut self, screen: Point) {
        let unselected = self.session.press_background(&self.store, &self.viewport, screen);
        self.emit_passages(EventKind::Unselected, &unselected);
    }

    pub fn pointer_move(&mut self, screen: Point) -> PointerUpdate {
        let update = self
            .session
            .pointer_move(&mut self.store, &self.viewport, &self.config, screen);
        match &update {
            PointerUpdate::Dragged(moved) if !moved.is_empty() => self.rebuild(),
            PointerUpdate::Marquee(change) => {
                self.emit_passages(EventKind::Unselected, &change.unselected);
            }
            _ => {}
        }
        update
    }

    pub fn release(&mut self) {
        let selected = self.session.release(&self.store);
        self.emit_passages(EventKind::Selected, &selected);
    }

    pub fn double_click(&mut self, id: PassageId) -> Result<(), GraphError> {
        self.session.double_click(&self.store, id)?;
        self.emit_passages(EventKind::DblClick, &[id]);
        Ok(())
    }

    // ---------------------------------------------------------------- graph

    pub fn connectors(&self) -> Vec<Connector> {
        route_connectors(&self.store, &self.edges, &self.config)
    }

    pub fn evaluate(&self) -> Report {
        diagnostics::evaluate(&self.store)
    }

    /// Creates a placeholder for every link target that names no passage, either for one
    /// passage or for all of them. Placeholders fan out below and to the right of the linking
    /// passage. Returns the new ids in creation order.
    pub fn create_missing_passages(&mut self, from: Option<PassageId>) -> Result<Vec<PassageId>, GraphError> {
        let sources = match from {
            Some(id) if !self.store.contains(id) => return Err(StoreError::NotFound { id }.into()),
            Some(id) => vec![id],
            None => self.store.ids().collect(),
        };

        let step = self.config.placement_step();
        let mut created = Vec::new();
        for source in sources {
            let Some(passage) = self.store.by_id(source) else {
                continue;
            };
            let links = extract_links(passage.text_or_empty());
            for link in links {
                if self.store.by_name(link.target()).is_some() {
                    continue;
                }
                // Connections are rebuilt after each creation, so later placeholders shift right.
                let Some(origin) = self.store.by_id(source) else {
                    break;
                };
                let fan_out = step * origin.connections().len() as f64;
                let position = origin.position().offset(fan_out, step);
                created.push(self.new_passage(Some(link.target()), None, Some(position))?);
            }
        }

        if !created.is_empty() {
            tracing::info!(created = created.len(), "created placeholder passages");
        }
        Ok(created)
    }

    /// Deletes placeholder passages that no passage links to. Returns the removed passages.
    pub fn clear_empty_passages(&mut self) -> Vec<Passage> {
        let orphans = self
            .store
            .all()
            .iter()
            .filter(|passage| passage.is_placeholder())
            .map(Passage::id)
            .filter(|id| {
                !self
                    .store
                    .all()
                    .iter()
                    .any(|other| other.connections().contains(id))
            })
            .collect::<Vec<_>>();

        orphans
            .into_iter()
            .filter_map(|id| self.delete_passage(id).ok())
            .collect()
    }

    // ---------------------------------------------------------------- load / save

    /// Replaces the whole story. On any error the current story is left untouched.
    pub fn load(&mut self, source_format: SourceFormat, src: &str) -> Result<(), GraphError> {
        let grid = self.config.grid_size;
        let parsed = match source_format {
            SourceFormat::Json => format::import_json(src, grid),
            SourceFormat::Twee => format::parse_twee(src).and_then(|story| format::import_twee_story(&story, grid)),
        };
        let passages = parsed.map_err(|err| {
            tracing::error!(format = source_format.as_str(), error = %err, "cannot load story");
            err
        })?;
        self.install(source_format, passages)
    }

    pub fn load_json_str(&mut self, src: &str) -> Result<(), GraphError> {
        self.load(SourceFormat::Json, src)
    }

    pub fn load_twee_str(&mut self, src: &str) -> Result<(), GraphError> {
        self.load(SourceFormat::Twee, src)
    }

    pub fn load_twee_story(&mut self, story: &TweeStory) -> Result<(), GraphError> {
        let passages = format::import_twee_story(story, self.config.grid_size).map_err(|err| {
            tracing::error!(format = "twee", error = %err, "cannot load story");
            err
        })?;
        self.install(SourceFormat::Twee, passages)
    }

    fn install(&mut self, source_format: SourceFormat, passages: Vec<Passage>) -> Result<(), GraphError> {
        self.store.replace_all(passages)?;
        self.session = EditorSession::new();
        self.rebuild();
        tracing::info!(
            format = source_format.as_str(),
            passages = self.store.len(),
            edges = self.edges.len(),
            "story loaded"
        );
        self.events.emit(&GraphEvent::Open {
            format: source_format,
            passages: self.store.all().to_vec(),
        });
        Ok(())
    }

    /// Reads a `.json` or `.twee` file and loads it. The file's base name becomes the export
    /// name.
    pub async fn open_path(&mut self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        let path = path.as_ref();
        let source_format = SourceFormat::from_path(path).map_err(|err| {
            tracing::warn!(path = %path.display(), "unsupported file type");
            err
        })?;

        let src = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| GraphError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        self.load(source_format, &src)?;
        let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        self.export_base = Some(export_base_name(file_name).to_owned());
        Ok(())
    }

    pub fn export_base_name(&self) -> &str {
        self.export_base.as_deref().unwrap_or(DEFAULT_EXPORT_BASE)
    }

    pub fn export_json(&self) -> Result<String, GraphError> {
        Ok(format::export_json(self.store.all())?)
    }

    pub fn export_artifact(&self) -> Result<ExportArtifact, GraphError> {
        let artifact = ExportArtifact::new(self.export_base_name(), self.export_json()?);
        tracing::info!(file = artifact.file_name(), passages = self.store.len(), "story exported");
        Ok(artifact)
    }

    // ---------------------------------------------------------------- text editor

    /// Makes `id` the active passage and shows its text in `editor`.
    pub fn edit_in<E: SourceEditor + ?Sized>(&mut self, editor: &mut E, id: PassageId) -> Result<(), GraphError> {
        let text = self
            .store
            .by_id(id)
            .ok_or(StoreError::NotFound { id })?
            .text_or_empty()
            .to_owned();
        self.session.set_active(Some(id));
        editor.set_text(&text);
        Ok(())
    }

    /// Writes a user edit into the active passage. Programmatic changes and changes with no
    /// active passage are ignored. Returns whether the story changed.
    pub fn apply_editor_change(&mut self, change: &TextChange) -> Result<bool, GraphError> {
        if change.origin == ChangeOrigin::Programmatic {
            return Ok(false);
        }
        let Some(id) = self.session.active() else {
            return Ok(false);
        };
        self.update_passage(id, PassagePatch::text(change.text.as_str()))?;
        Ok(true)
    }

    /// Pulls the editor's current text into the active passage.
    pub fn sync_from<E: SourceEditor + ?Sized>(&mut self, editor: &E) -> Result<bool, GraphError> {
        self.apply_editor_change(&TextChange::user(editor.text()))
    }
}

#[cfg(test)]
mod tests;
