// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::model::fixtures::{pid, story};

struct Board {
    store: PassageStore,
    viewport: Viewport,
    config: GraphConfig,
    session: EditorSession,
}

impl Board {
    fn press(&mut self, id: u32, x: f64, y: f64) -> SelectionChange {
        self.session
            .press_card(&self.store, &self.viewport, pid(id), Point::new(x, y))
            .unwrap()
    }

    fn move_to(&mut self, x: f64, y: f64) -> PointerUpdate {
        self.session
            .pointer_move(&mut self.store, &self.viewport, &self.config, Point::new(x, y))
    }

    fn position(&self, id: u32) -> Position {
        self.store.by_id(pid(id)).unwrap().position()
    }
}

/// Three cards at (125,125), (250,250) and (375,375), viewed at zoom 1 with no pan.
fn new_board() -> Board {
    let config = GraphConfig::default();
    let mut viewport = Viewport::new(&config, Size::new(800.0, 600.0));
    viewport.set_zoom(1.0);
    Board {
        store: story(&[("A", None), ("B", None), ("C", None)]),
        viewport,
        config,
        session: EditorSession::new(),
    }
}

#[fixture]
fn board() -> Board {
    new_board()
}

#[rstest]
fn pressing_unselected_card_collapses_selection(mut board: Board) {
    board.session.select(pid(2));
    board.session.select(pid(3));

    let change = board.press(1, 130.0, 130.0);

    assert_eq!(change.selected, vec![pid(1)]);
    assert_eq!(change.unselected, vec![pid(2), pid(3)]);
    assert_eq!(board.session.selection().iter().collect::<Vec<_>>(), vec![pid(1)]);
    assert!(board.session.is_dragging());
}

#[rstest]
fn pressing_selected_card_keeps_selection(mut board: Board) {
    board.session.select(pid(1));
    board.session.select(pid(2));

    let change = board.press(2, 260.0, 260.0);

    assert!(change.is_empty());
    assert_eq!(board.session.selection().len(), 2);
}

#[rstest]
fn single_drag_snaps_to_grid(mut board: Board) {
    board.press(1, 130.0, 130.0);

    // Pointer minus the (5, 5) press offset is (185, 207).
    let update = board.move_to(190.0, 212.0);

    assert_eq!(
        update,
        PointerUpdate::Dragged(vec![(pid(1), Position::new(175.0, 200.0))])
    );
    assert_eq!(board.position(1), Position::new(175.0, 200.0));
    assert_eq!(board.position(2), Position::new(250.0, 250.0));
}

#[rstest]
fn group_drag_moves_others_by_master_delta(mut board: Board) {
    for id in 1..=3 {
        board.session.select(pid(id));
    }
    board.press(2, 260.0, 260.0);

    // Master lands on (325, 200): a delta of (75, -50) from its press position.
    let update = board.move_to(323.0, 198.0);

    assert_eq!(
        update,
        PointerUpdate::Dragged(vec![
            (pid(2), Position::new(325.0, 200.0)),
            (pid(1), Position::new(200.0, 75.0)),
            (pid(3), Position::new(450.0, 325.0)),
        ])
    );
}

#[rstest]
fn group_compresses_against_the_origin(mut board: Board) {
    for id in 1..=3 {
        board.session.select(pid(id));
    }
    board.press(2, 260.0, 260.0);
    board.move_to(110.0, 110.0);

    assert_eq!(board.position(2), Position::new(100.0, 100.0));
    assert_eq!(board.position(1), Position::new(0.0, 0.0));
    assert_eq!(board.position(3), Position::new(225.0, 225.0));
}

#[rstest]
fn drag_stops_at_last_grid_cell_inside_content(mut board: Board) {
    board.press(1, 130.0, 130.0);
    board.move_to(1.0e6, 1.0e6);

    // Content is 9700 x 7275 model units; the card needs 97 of them.
    assert_eq!(drag_bounds(&board.viewport, &board.config), Position::new(9600.0, 7175.0));
    assert_eq!(board.position(1), Position::new(9600.0, 7175.0));
}

#[rstest]
fn marquee_selects_live_and_announces_on_release(mut board: Board) {
    board.session.select(pid(3));
    let unselected = board
        .session
        .press_background(&board.store, &board.viewport, Point::new(0.0, 0.0));
    assert_eq!(unselected, vec![pid(3)]);
    assert!(board.session.is_selecting());

    // The rectangle touches B's top-left corner; the overlap test is inclusive.
    let update = board.move_to(260.0, 250.0);
    assert_eq!(
        update,
        PointerUpdate::Marquee(SelectionChange {
            selected: vec![pid(1), pid(2)],
            unselected: Vec::new(),
        })
    );

    let update = board.move_to(200.0, 200.0);
    assert_eq!(
        update,
        PointerUpdate::Marquee(SelectionChange {
            selected: Vec::new(),
            unselected: vec![pid(2)],
        })
    );

    assert_eq!(board.session.release(&board.store), vec![pid(1)]);
    assert!(!board.session.is_selecting());
}

#[rstest]
fn marquee_normalizes_a_backwards_rectangle(mut board: Board) {
    board
        .session
        .press_background(&board.store, &board.viewport, Point::new(400.0, 400.0));
    board.move_to(300.0, 300.0);

    let rect = board.session.marquee_rect().unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (300.0, 300.0, 100.0, 100.0));
    assert_eq!(board.session.release(&board.store), vec![pid(2), pid(3)]);
}

#[rstest]
fn marquee_hit_test_follows_zoom_and_container_origin(mut board: Board) {
    board
        .viewport
        .set_container(Point::new(20.0, 60.0), Size::new(800.0, 600.0));
    board.viewport.set_zoom(0.5);

    // A is drawn at 62.5..111 inside the container, B starts at 125.
    board
        .session
        .press_background(&board.store, &board.viewport, Point::new(20.0, 60.0));
    board.move_to(90.0, 130.0);

    assert_eq!(board.session.release(&board.store), vec![pid(1)]);
}

#[rstest]
fn release_after_drag_announces_nothing(mut board: Board) {
    board.press(1, 130.0, 130.0);
    board.move_to(200.0, 200.0);
    assert!(board.session.release(&board.store).is_empty());
    assert_eq!(board.move_to(300.0, 300.0), PointerUpdate::Idle);
}

#[rstest]
fn forgetting_the_master_ends_the_drag(mut board: Board) {
    board.press(1, 130.0, 130.0);
    board.session.set_active(Some(pid(1)));
    board.store.delete(pid(1)).unwrap();
    board.session.forget(pid(1));

    assert!(!board.session.is_dragging());
    assert!(board.session.selection().is_empty());
    assert_eq!(board.session.active(), None);
}

#[rstest]
fn unknown_ids_are_reported(mut board: Board) {
    let err = board
        .session
        .press_card(&board.store, &board.viewport, pid(9), Point::new(0.0, 0.0))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound { id: pid(9) });
    assert!(board.session.double_click(&board.store, pid(9)).is_err());

    board.session.double_click(&board.store, pid(2)).unwrap();
    assert_eq!(board.session.active(), Some(pid(2)));
}

proptest! {
    #[test]
    fn group_members_follow_master_delta_within_bounds(x in -500.0f64..12000.0, y in -500.0f64..9000.0) {
        let mut board = new_board();
        for id in 1..=3 {
            board.session.select(pid(id));
        }
        board.press(2, 260.0, 260.0);
        board.move_to(x, y);

        let max = drag_bounds(&board.viewport, &board.config);
        let master = board.position(2);
        let (dx, dy) = (master.x - 250.0, master.y - 250.0);
        prop_assert_eq!(snap_to_grid(master.x, 25.0), master.x);
        prop_assert_eq!(snap_to_grid(master.y, 25.0), master.y);
        for (id, start) in [(1, 125.0), (3, 375.0)] {
            let expected = Position::new(
                clamp_to_extent(start + dx, max.x),
                clamp_to_extent(start + dy, max.y),
            );
            prop_assert_eq!(board.position(id), expected);
        }
    }
}
