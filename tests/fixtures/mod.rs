// Helper functions to build editors in common states

#![allow(dead_code)]

use glam::Vec2;
use led_cube_editor::{
    camera_position, Coord, CubeEditor, EditorEvent, EditorObserver, EditorOptions,
    EditorStatus, SoftwareScene,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Editor over an in-process scene with default options and cube size `n`
pub fn editor(n: usize) -> CubeEditor<SoftwareScene> {
    editor_with(EditorOptions {
        dimension: n,
        ..Default::default()
    })
}

pub fn editor_with(options: EditorOptions) -> CubeEditor<SoftwareScene> {
    let scene = SoftwareScene::new(camera_position(&options), Vec2::new(1280.0, 800.0));
    CubeEditor::new(options, scene).unwrap()
}

/// Editor wired to a recorder; returns the shared event log
pub fn recorded_editor(n: usize) -> (CubeEditor<SoftwareScene>, Rc<RefCell<Vec<(EditorEvent, EditorStatus)>>>) {
    let options = EditorOptions {
        dimension: n,
        ..Default::default()
    };
    let scene = SoftwareScene::new(camera_position(&options), Vec2::new(1280.0, 800.0));
    let recorder = Recorder::default();
    let log = recorder.0.clone();
    let editor = CubeEditor::with_observer(options, scene, Box::new(recorder)).unwrap();
    (editor, log)
}

#[derive(Default)]
pub struct Recorder(Rc<RefCell<Vec<(EditorEvent, EditorStatus)>>>);

impl EditorObserver for Recorder {
    fn notify(&mut self, event: EditorEvent, status: &EditorStatus) {
        self.0.borrow_mut().push((event, *status));
    }
}

/// Key down then up
pub fn tap(editor: &mut CubeEditor<SoftwareScene>, code: &str) {
    editor.on_key(code, true);
    editor.on_key(code, false);
}

/// Hold `modifier` while tapping `code`
pub fn chord(editor: &mut CubeEditor<SoftwareScene>, modifier: &str, code: &str) {
    editor.on_key(modifier, true);
    tap(editor, code);
    editor.on_key(modifier, false);
}

/// From view mode: enter edit and highlight row `r` through the keyboard
pub fn highlight_row(editor: &mut CubeEditor<SoftwareScene>, r: usize) {
    tap(editor, "KeyM");
    tap(editor, "ShiftLeft");
    for _ in 0..r {
        tap(editor, "ArrowUp");
    }
}

/// From view mode: enter edit and highlight col `c` through the keyboard
pub fn highlight_col(editor: &mut CubeEditor<SoftwareScene>, c: usize) {
    tap(editor, "KeyM");
    tap(editor, "ShiftLeft");
    tap(editor, "ShiftRight");
    for _ in 0..c {
        tap(editor, "ArrowLeft");
    }
}

/// Point at the centre of `coord` and run a frame
pub fn hover(editor: &mut CubeEditor<SoftwareScene>, coord: Coord) -> Option<Coord> {
    let position = editor.grid().cell(coord).position();
    let ndc = editor.scene().camera().project(position)?;
    editor.on_pointer_move(ndc.truncate());
    editor.tick();
    editor.hovered()
}
