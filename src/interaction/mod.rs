// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer gestures over the card layer.
//!
//! An [`EditorSession`] owns the selection, the active passage and the gesture in progress.
//! It reads coordinates through the [`Viewport`] and writes positions straight into the
//! [`PassageStore`]; announcing changes is left to the caller.

use std::collections::BTreeSet;

use crate::config::GraphConfig;
use crate::model::{PassageId, Position};
use crate::render::geometry::{clamp_to_extent, floor_to_grid, snap_to_grid, Point, Rect, Size};
use crate::store::{PassageStore, StoreError};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<PassageId>,
}

impl Selection {
    pub fn contains(&self, id: PassageId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PassageId> + '_ {
        self.ids.iter().copied()
    }

    /// Selected ids in store order; ids no longer in the store are skipped.
    pub fn in_store_order(&self, store: &PassageStore) -> Vec<PassageId> {
        store.ids().filter(|id| self.contains(*id)).collect()
    }

    pub(crate) fn insert(&mut self, id: PassageId) -> bool {
        self.ids.insert(id)
    }

    pub(crate) fn remove(&mut self, id: PassageId) -> bool {
        self.ids.remove(&id)
    }

    fn take(&mut self) -> BTreeSet<PassageId> {
        std::mem::take(&mut self.ids)
    }
}

/// Selection changes caused by one pointer event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub selected: Vec<PassageId>,
    pub unselected: Vec<PassageId>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.unselected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerUpdate {
    /// No gesture in progress.
    Idle,
    /// New positions written for each dragged card, master first.
    Dragged(Vec<(PassageId, Position)>),
    /// Marquee membership changed; `selected` are cards that entered the rectangle.
    Marquee(SelectionChange),
}

#[derive(Debug, Clone, PartialEq)]
struct DragState {
    master: PassageId,
    offset: Point,
    /// Press-time positions, master first.
    starts: Vec<(PassageId, Position)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MarqueeState {
    start: Point,
    current: Point,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Drag(DragState),
    Marquee(MarqueeState),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    selection: Selection,
    active: Option<PassageId>,
    gesture: Option<Gesture>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active(&self) -> Option<PassageId> {
        self.active
    }

    pub fn set_active(&mut self, id: Option<PassageId>) {
        self.active = id;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Drag(_)))
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Marquee(_)))
    }

    /// The marquee rectangle in container coordinates while one is being drawn.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Some(Gesture::Marquee(marquee)) => Some(Rect::from_corners(marquee.start, marquee.current)),
            _ => None,
        }
    }

    /// Empties the selection and returns the ids that were selected, in store order.
    pub fn clear_selection(&mut self, store: &PassageStore) -> Vec<PassageId> {
        let previous = Selection { ids: self.selection.take() };
        previous.in_store_order(store)
    }

    /// Adds `id` to the selection. Returns `false` if it was already selected.
    pub fn select(&mut self, id: PassageId) -> bool {
        self.selection.insert(id)
    }

    /// Drops every reference to a passage that left the store.
    pub fn forget(&mut self, id: PassageId) {
        self.selection.remove(id);
        if self.active == Some(id) {
            self.active = None;
        }
        let master_gone = match &mut self.gesture {
            Some(Gesture::Drag(drag)) => {
                drag.starts.retain(|(start_id, _)| *start_id != id);
                drag.master == id
            }
            _ => false,
        };
        if master_gone {
            self.gesture = None;
        }
    }

    /// Pointer down on a card. Collapses the selection to the card unless it is already
    /// selected, then starts dragging the whole selection.
    pub fn press_card(
        &mut self,
        store: &PassageStore,
        viewport: &Viewport,
        id: PassageId,
        screen: Point,
    ) -> Result<SelectionChange, StoreError> {
        let pressed = store.by_id(id).ok_or(StoreError::NotFound { id })?.position();

        let mut change = SelectionChange::default();
        if !self.selection.contains(id) {
            change.unselected = self.clear_selection(store);
            self.selection.insert(id);
            change.selected.push(id);
        }

        let pointer = viewport.screen_to_model(screen);
        let mut starts = vec![(id, pressed)];
        starts.extend(
            store
                .all()
                .iter()
                .filter(|passage| passage.id() != id && self.selection.contains(passage.id()))
                .map(|passage| (passage.id(), passage.position())),
        );

        tracing::debug!(master = id.get(), group = starts.len(), "drag started");
        self.gesture = Some(Gesture::Drag(DragState {
            master: id,
            offset: Point::new(pointer.x - pressed.x, pointer.y - pressed.y),
            starts,
        }));
        Ok(change)
    }

    /// Pointer down on empty background. Clears the selection and starts a marquee.
    pub fn press_background(
        &mut self,
        store: &PassageStore,
        viewport: &Viewport,
        screen: Point,
    ) -> Vec<PassageId> {
        let unselected = self.clear_selection(store);
        let start = container_point(viewport, screen);
        self.gesture = Some(Gesture::Marquee(MarqueeState { start, current: start }));
        unselected
    }

    pub fn pointer_move(
        &mut self,
        store: &mut PassageStore,
        viewport: &Viewport,
        config: &GraphConfig,
        screen: Point,
    ) -> PointerUpdate {
        match &mut self.gesture {
            None => PointerUpdate::Idle,
            Some(Gesture::Drag(drag)) => {
                PointerUpdate::Dragged(drag_to(drag, store, viewport, config, screen))
            }
            Some(Gesture::Marquee(marquee)) => {
                marquee.current = container_point(viewport, screen);
                let rect = Rect::from_corners(marquee.start, marquee.current);
                PointerUpdate::Marquee(hit_test(&mut self.selection, store, viewport, config, &rect))
            }
        }
    }

    /// Ends the gesture. After a marquee, returns every selected card in store order so the
    /// caller can announce each one; after a drag, returns nothing.
    pub fn release(&mut self, store: &PassageStore) -> Vec<PassageId> {
        match self.gesture.take() {
            Some(Gesture::Marquee(_)) => self.selection.in_store_order(store),
            Some(Gesture::Drag(drag)) => {
                tracing::debug!(master = drag.master.get(), "drag finished");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Marks `id` as the passage being edited.
    pub fn double_click(&mut self, store: &PassageStore, id: PassageId) -> Result<(), StoreError> {
        if !store.contains(id) {
            return Err(StoreError::NotFound { id });
        }
        self.active = Some(id);
        Ok(())
    }
}

fn container_point(viewport: &Viewport, screen: Point) -> Point {
    let origin = viewport.container_origin();
    Point::new(screen.x - origin.x, screen.y - origin.y)
}

/// Largest grid-aligned position that keeps a card inside the content layer.
pub fn drag_bounds(viewport: &Viewport, config: &GraphConfig) -> Position {
    let extent = viewport.content_extent();
    Position::new(
        floor_to_grid(extent.width - config.card_size, config.grid_size),
        floor_to_grid(extent.height - config.card_size, config.grid_size),
    )
}

fn drag_to(
    drag: &DragState,
    store: &mut PassageStore,
    viewport: &Viewport,
    config: &GraphConfig,
    screen: Point,
) -> Vec<(PassageId, Position)> {
    let max = drag_bounds(viewport, config);
    let pointer = viewport.screen_to_model(screen);
    let master = Position::new(
        clamp_to_extent(snap_to_grid(pointer.x - drag.offset.x, config.grid_size), max.x),
        clamp_to_extent(snap_to_grid(pointer.y - drag.offset.y, config.grid_size), max.y),
    );

    let Some(&(_, master_start)) = drag.starts.first() else {
        return Vec::new();
    };
    let dx = master.x - master_start.x;
    let dy = master.y - master_start.y;

    let mut moved = Vec::with_capacity(drag.starts.len());
    for (index, &(id, start)) in drag.starts.iter().enumerate() {
        let next = if index == 0 {
            master
        } else {
            Position::new(
                clamp_to_extent(start.x + dx, max.x),
                clamp_to_extent(start.y + dy, max.y),
            )
        };
        if store.set_position(id, next).is_ok() {
            moved.push((id, next));
        }
    }
    moved
}

/// Card box in container coordinates.
pub fn card_screen_rect(viewport: &Viewport, config: &GraphConfig, position: Position) -> Rect {
    let origin = viewport.container_origin();
    let top_left = viewport.model_to_screen(Point::new(position.x, position.y));
    let side = Size::square(config.card_size * viewport.scale());
    Rect::new(top_left.x - origin.x, top_left.y - origin.y, side.width, side.height)
}

fn hit_test(
    selection: &mut Selection,
    store: &PassageStore,
    viewport: &Viewport,
    config: &GraphConfig,
    rect: &Rect,
) -> SelectionChange {
    let mut change = SelectionChange::default();
    for passage in store.all() {
        let card = card_screen_rect(viewport, config, passage.position());
        if card.intersects(rect) {
            if selection.insert(passage.id()) {
                change.selected.push(passage.id());
            }
        } else if selection.remove(passage.id()) {
            change.unselected.push(passage.id());
        }
    }
    change
}

#[cfg(test)]
mod tests;
