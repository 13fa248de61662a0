// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use tracing_test::traced_test;

use super::*;
use crate::model::fixtures::pid;
use crate::model::EdgeKind;

const TRIO: &str = r#":: A {"position":"100,100"}
to [[B]]

:: B {"position":"300,100"}
back to [[A]]

:: C {"position":"500,100"}
alone
"#;

type Log = Rc<RefCell<Vec<(EventKind, Option<PassageId>)>>>;

fn empty_graph() -> QuiltGraph {
    QuiltGraph::new(GraphConfig::default(), Size::new(800.0, 600.0)).unwrap()
}

fn record(graph: &mut QuiltGraph) -> Log {
    let log: Log = Rc::default();
    for kind in EventKind::ALL {
        let log = Rc::clone(&log);
        graph.on(kind, move |event, _| {
            log.borrow_mut().push((event.kind(), event.passage().map(Passage::id)));
        });
    }
    log
}

/// Three cards in a row at zoom 1; A and B link to each other.
#[fixture]
fn trio() -> QuiltGraph {
    let mut graph = empty_graph();
    graph.load_twee_str(TRIO).unwrap();
    graph.set_zoom(1.0);
    graph
}

struct FakeEditor {
    text: String,
}

impl SourceEditor for FakeEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = GraphConfig {
        grid_size: -1.0,
        ..GraphConfig::default()
    };
    assert!(QuiltGraph::new(config, Size::new(800.0, 600.0)).is_err());
}

#[test]
fn new_passages_fill_free_cells_left_of_view() {
    let mut graph = empty_graph();
    graph.set_zoom(1.0);
    let log = record(&mut graph);

    let first = graph.new_passage(None, None, None).unwrap();
    let second = graph.new_passage(None, None, None).unwrap();

    assert_eq!((first, second), (pid(1), pid(2)));
    assert_eq!(graph.passage(first).unwrap().position(), Position::new(25.0, 300.0));
    assert_eq!(graph.passage(second).unwrap().position(), Position::new(50.0, 300.0));
    assert_eq!(graph.passage(first).unwrap().name(), "untitled");
    assert_eq!(
        *log.borrow(),
        vec![(EventKind::New, Some(first)), (EventKind::New, Some(second))]
    );
}

#[test]
fn explicit_positions_are_snapped() {
    let mut graph = empty_graph();
    let id = graph
        .new_passage(Some("Cellar"), Some("dark"), Some(Position::new(37.0, 12.0)))
        .unwrap();
    assert_eq!(graph.passage(id).unwrap().position(), Position::new(25.0, 0.0));

    graph
        .update_passage(id, PassagePatch::position(Position::new(61.0, 90.0)))
        .unwrap();
    assert_eq!(graph.passage(id).unwrap().position(), Position::new(50.0, 100.0));
}

#[rstest]
fn deleting_drops_edges_and_announces_snapshot(mut trio: QuiltGraph) {
    let log = record(&mut trio);
    assert_eq!(trio.edges().kind_between(pid(1), pid(2)), Some(EdgeKind::Bidirectional));

    let removed = trio.delete_passage(pid(2)).unwrap();

    assert_eq!(removed.name(), "B");
    assert!(trio.edges().is_empty());
    assert!(trio.passage(pid(1)).unwrap().connections().is_empty());
    assert_eq!(*log.borrow(), vec![(EventKind::Delete, Some(pid(2)))]);
    assert!(matches!(
        trio.delete_passage(pid(2)),
        Err(GraphError::Store(StoreError::NotFound { .. }))
    ));
}

#[test]
fn largest_id_in_a_loaded_story_blocks_new_passages() {
    let mut graph = empty_graph();
    graph
        .load_json_str(
            r#"{"passages": [{"text": "[[Missing]]", "name": "Edge", "pid": "4294967295",
                              "position": {"x": "0", "y": "0"}}]}"#,
        )
        .unwrap();
    let log = record(&mut graph);

    let err = graph.new_passage(Some("Fresh"), None, None).unwrap_err();
    assert!(matches!(err, GraphError::Store(StoreError::IdsExhausted)));
    let err = graph.create_missing_passages(None).unwrap_err();
    assert!(matches!(err, GraphError::Store(StoreError::IdsExhausted)));

    assert_eq!(graph.passages().len(), 1);
    assert_eq!(graph.passages()[0].id(), pid(u32::MAX));
    assert!(log.borrow().is_empty());
}

#[rstest]
fn deleted_top_id_is_not_reissued(mut trio: QuiltGraph) {
    trio.delete_passage(pid(3)).unwrap();
    assert_eq!(trio.new_passage(Some("D"), None, None).unwrap(), pid(4));
}

#[test]
#[traced_test]
fn deleting_unknown_name_is_logged_noop() {
    let mut graph = empty_graph();
    graph.load_twee_str(TRIO).unwrap();

    assert!(graph.delete_passage_named("Nowhere").is_none());
    assert_eq!(graph.passages().len(), 3);
    assert!(logs_contain("no passage found to delete"));

    assert_eq!(graph.delete_passage_named("C").map(|p| p.id()), Some(pid(3)));
}

#[rstest]
fn pointer_gestures_announce_selection(mut trio: QuiltGraph) {
    let log = record(&mut trio);

    trio.press_card(pid(1), Point::new(110.0, 110.0)).unwrap();
    trio.release();
    trio.press_background(Point::new(0.0, 0.0));
    trio.pointer_move(Point::new(700.0, 300.0));
    trio.release();

    assert_eq!(
        *log.borrow(),
        vec![
            (EventKind::Selected, Some(pid(1))),
            (EventKind::Unselected, Some(pid(1))),
            (EventKind::Selected, Some(pid(1))),
            (EventKind::Selected, Some(pid(2))),
            (EventKind::Selected, Some(pid(3))),
        ]
    );
    assert_eq!(trio.selected_passages().len(), 3);

    let removed = trio.delete_selected();
    assert_eq!(removed.len(), 3);
    assert!(trio.passages().is_empty());
}

#[rstest]
fn dragging_moves_connectors(mut trio: QuiltGraph) {
    let before = trio.connectors()[0].path_data();

    trio.press_card(pid(1), Point::new(110.0, 110.0)).unwrap();
    let update = trio.pointer_move(Point::new(110.0, 310.0));
    trio.release();

    assert_eq!(
        update,
        PointerUpdate::Dragged(vec![(pid(1), Position::new(100.0, 300.0))])
    );
    assert_eq!(trio.passage(pid(1)).unwrap().position(), Position::new(100.0, 300.0));
    assert_ne!(trio.connectors()[0].path_data(), before);
}

#[rstest]
fn double_click_activates_and_feeds_the_editor(mut trio: QuiltGraph) {
    let log = record(&mut trio);
    let mut editor = FakeEditor { text: String::new() };

    trio.double_click(pid(3)).unwrap();
    assert_eq!(*log.borrow(), vec![(EventKind::DblClick, Some(pid(3)))]);
    assert_eq!(trio.active_passage().map(Passage::name), Some("C"));

    trio.edit_in(&mut editor, pid(3)).unwrap();
    assert_eq!(editor.text, "alone");
}

#[rstest]
fn user_edits_reach_the_active_passage(mut trio: QuiltGraph) {
    assert!(!trio.apply_editor_change(&TextChange::user("[[A]]")).unwrap());

    trio.double_click(pid(3)).unwrap();
    assert!(!trio
        .apply_editor_change(&TextChange::programmatic("[[A]]"))
        .unwrap());
    assert_eq!(trio.passage(pid(3)).unwrap().text(), Some("alone"));

    assert!(trio.apply_editor_change(&TextChange::user("now [[A]]")).unwrap());
    assert_eq!(trio.edges().kind_between(pid(3), pid(1)), Some(EdgeKind::Directed));

    let editor = FakeEditor { text: "[[C]] again".to_owned() };
    assert!(trio.sync_from(&editor).unwrap());
    assert_eq!(trio.edges().kind_between(pid(3), pid(3)), Some(EdgeKind::SelfLoop));
}

#[test]
fn zoom_to_selected_centres_first_selected_card() {
    let mut graph = empty_graph();
    assert_eq!(graph.zoom_to_selected(Some(1.0)), None);

    let far = graph
        .new_passage(Some("Far"), None, Some(Position::new(2000.0, 1500.0)))
        .unwrap();
    graph.press_card(far, graph.viewport().model_to_screen(Point::new(2010.0, 1510.0))).unwrap();
    graph.release();

    assert_eq!(graph.zoom_to_selected(Some(1.0)), Some(1.0));
    assert_eq!(graph.viewport().translate(), Point::new(400.0 - 2048.5, 300.0 - 1548.5));
}

#[test]
fn wheel_zooms_with_modifier_and_pans_only_when_zoomed_in() {
    let mut graph = empty_graph();
    let min_zoom = graph.viewport().min_zoom();

    assert!(!graph.wheel(WheelInput { delta_x: 30.0, delta_y: 40.0, zoom: false }));
    assert_eq!(graph.viewport().translate(), Point::default());

    assert!(graph.wheel(WheelInput { delta_x: 0.0, delta_y: -10.0, zoom: true }));
    assert!((graph.viewport().scale() - min_zoom * 1.1).abs() < 1e-12);

    assert!(graph.wheel(WheelInput { delta_x: 30.0, delta_y: 40.0, zoom: false }));
    let translate = graph.viewport().translate();
    assert!((translate.x + 30.0).abs() < 1e-9);
    assert!((translate.y + 40.0).abs() < 1e-9);
}

#[test]
fn create_missing_fans_placeholders_out() {
    let mut graph = empty_graph();
    graph
        .load_twee_str(":: Hub {\"position\":\"100,100\"}\n[[North]] [[South]] [[North]]\n")
        .unwrap();
    let log = record(&mut graph);

    let created = graph.create_missing_passages(None).unwrap();

    assert_eq!(created, vec![pid(2), pid(3)]);
    let north = graph.passage_named("North").unwrap();
    let south = graph.passage_named("South").unwrap();
    assert_eq!(north.position(), Position::new(100.0, 225.0));
    assert_eq!(south.position(), Position::new(225.0, 225.0));
    assert!(north.is_placeholder());
    assert_eq!(graph.edges().len(), 2);
    assert!(graph.evaluate().deadends.is_empty());
    assert_eq!(
        *log.borrow(),
        vec![(EventKind::New, Some(pid(2))), (EventKind::New, Some(pid(3)))]
    );

    assert!(graph.create_missing_passages(Some(pid(1))).unwrap().is_empty());
    assert!(matches!(
        graph.create_missing_passages(Some(pid(42))),
        Err(GraphError::Store(StoreError::NotFound { .. }))
    ));
}

#[test]
fn clear_empty_removes_only_unlinked_placeholders() {
    let mut graph = empty_graph();
    graph
        .load_twee_str(":: Hub {\"position\":\"100,100\"}\n[[North]]\n")
        .unwrap();
    graph.create_missing_passages(None).unwrap();
    let orphan = graph.new_passage(Some("Orphan"), None, None).unwrap();
    let log = record(&mut graph);

    let removed = graph.clear_empty_passages();

    assert_eq!(removed.iter().map(Passage::id).collect::<Vec<_>>(), vec![orphan]);
    assert!(graph.passage_named("North").is_some());
    assert_eq!(*log.borrow(), vec![(EventKind::Delete, Some(orphan))]);
}

#[rstest]
fn failed_load_leaves_story_untouched(mut trio: QuiltGraph) {
    let log = record(&mut trio);

    let err = trio.load_json_str("{\"passages\": [").unwrap_err();
    assert!(matches!(err, GraphError::Format(FormatError::Json { .. })));

    let err = trio
        .load_json_str(
            r#"{"passages": [
                {"name": "X", "pid": "1", "position": {"x": 0, "y": 0}},
                {"name": "Y", "pid": "1", "position": {"x": 0, "y": 0}}
            ]}"#,
        )
        .unwrap_err();
    assert!(matches!(err, GraphError::Format(FormatError::DuplicatePid { .. })));

    assert_eq!(trio.passages().len(), 3);
    assert_eq!(trio.edges().len(), 1);
    assert!(log.borrow().is_empty());
}

#[rstest]
fn json_load_replaces_story_and_announces_open(mut trio: QuiltGraph) {
    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&opened);
    trio.on(EventKind::Open, move |event, _| {
        if let GraphEvent::Open { format, passages } = event {
            sink.borrow_mut().push((*format, passages.len()));
        }
    });

    trio.load_json_str(
        r#"{"passages": [{"text": "[[Y]]", "name": "X", "pid": "10", "position": {"x": "0", "y": "0"}},
                         {"text": "", "name": "Y", "pid": "11", "position": {"x": "125", "y": "0"}}]}"#,
    )
    .unwrap();

    assert_eq!(*opened.borrow(), vec![(SourceFormat::Json, 2)]);
    assert_eq!(trio.edges().kind_between(pid(10), pid(11)), Some(EdgeKind::Directed));
    assert!(trio.session().selection().is_empty());
    assert_eq!(trio.new_passage(None, None, None).unwrap(), pid(12));
}

#[test]
fn twee_story_object_loads_with_sequential_ids() {
    let mut graph = empty_graph();
    let story: TweeStory = serde_json::from_str(
        r#"{"passages": [{"name": "One", "text": "[[Two]]"}, {"name": "Two", "text": "[[One]]"}]}"#,
    )
    .unwrap();

    graph.load_twee_story(&story).unwrap();

    assert_eq!(graph.passage_named("Two").unwrap().id(), pid(2));
    assert_eq!(graph.passage(pid(2)).unwrap().position(), Position::new(50.0, 50.0));
    assert_eq!(graph.edges().kind_between(pid(1), pid(2)), Some(EdgeKind::Bidirectional));
}

#[rstest]
fn export_artifact_defaults_to_story_json(trio: QuiltGraph) {
    let artifact = trio.export_artifact().unwrap();

    assert_eq!(artifact.file_name(), "story.json");
    let value: serde_json::Value = serde_json::from_str(artifact.contents()).unwrap();
    assert_eq!(value["passages"][2]["name"], "C");
    assert_eq!(value["passages"][0]["links"][0]["link"], "B");
    assert!(artifact.data_url().starts_with("data:application/json;base64,"));
}

#[tokio::test]
async fn open_path_reads_file_and_names_export() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("quilt-open-{}.story.twee", std::process::id()));
    std::fs::write(&path, TRIO).unwrap();

    let mut graph = empty_graph();
    let result = graph.open_path(&path).await;
    std::fs::remove_file(&path).unwrap();
    result.unwrap();

    assert_eq!(graph.passages().len(), 3);
    assert_eq!(graph.export_base_name(), format!("quilt-open-{}", std::process::id()));
    assert_eq!(
        graph.export_artifact().unwrap().file_name(),
        format!("quilt-open-{}.json", std::process::id())
    );
}

#[tokio::test]
async fn open_path_rejects_unknown_extension_and_missing_files() {
    let mut graph = empty_graph();

    let err = graph.open_path("notes.txt").await.unwrap_err();
    assert!(matches!(
        err,
        GraphError::Format(FormatError::UnsupportedFileType { .. })
    ));

    let err = graph
        .open_path("/definitely/not/here/story.json")
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Io { .. }));
    assert_eq!(graph.export_base_name(), "story");
}
