// End-to-end editing sessions driven through the host entry points

mod fixtures;

use fixtures::*;
use glam::Vec2;
use led_cube_editor::{
    Axis, Command, Coord, Direction, EditorEvent, EditorOptions, Highlight, Mode, SceneBackend,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;

#[test]
fn test_select_row_and_toggle_by_pointer() {
    let mut editor = editor(8);
    let options = editor.options().clone();

    // Nothing to pick in view mode
    assert_eq!(hover(&mut editor, Coord::new(3, 2, 7)), None);
    editor.on_pointer_button(true);
    editor.on_pointer_button(false);
    assert_eq!(editor.cells_on(), 0);

    highlight_row(&mut editor, 2);
    assert_eq!(editor.highlight(), Highlight::Row(2));
    assert_eq!(editor.candidate_count(), 512);

    tap(&mut editor, "Space");
    assert_eq!(editor.selected(), Some(2));
    assert_eq!(editor.scene().visible_count(), 64);
    assert_eq!(editor.candidate_count(), 64);

    let target = hover(&mut editor, Coord::new(3, 2, 7)).unwrap();
    assert_eq!(target.j, 2);

    editor.on_pointer_button(true);
    assert!(editor.grid().cell(target).is_on());
    assert_eq!(editor.cells_on(), 1);
    assert!(!editor.scene().controls_enabled());

    let handle = editor.grid().cell(target).handle();
    assert_eq!(
        editor.scene().material(handle),
        Some(options.on_material().with_color(options.hover_on_color))
    );

    editor.on_pointer_button(false);
    assert!(editor.scene().controls_enabled());

    // Second click turns it back off and the resting look is restored
    editor.on_pointer_button(true);
    editor.on_pointer_button(false);
    assert!(!editor.grid().cell(target).is_on());
    assert_eq!(editor.grid().cell(target).material(), options.selected_material());

    tap(&mut editor, "Enter");
    assert_eq!(editor.selected(), None);
    assert_eq!(editor.scene().visible_count(), 512);
    assert_eq!(editor.candidate_count(), 512);
}

#[test]
fn test_drag_press_without_hit_keeps_controls() {
    let mut editor = editor(4);
    highlight_row(&mut editor, 0);
    tap(&mut editor, "Space");

    editor.on_pointer_move(Vec2::new(0.99, -0.99));
    editor.tick();
    assert_eq!(editor.hovered(), None);

    editor.on_pointer_button(true);
    assert!(editor.scene().controls_enabled());
    assert!(editor.is_pointer_down());
    editor.on_pointer_button(false);
    assert!(!editor.is_pointer_down());
}

#[test]
fn test_copy_row_onto_other_row() {
    let mut editor = editor(4);
    highlight_row(&mut editor, 1);
    tap(&mut editor, "Space");

    for coord in [Coord::new(0, 1, 0), Coord::new(2, 1, 3), Coord::new(3, 1, 1)] {
        editor.toggle_cell(coord);
    }
    let pattern = editor.grid().plane_states(Axis::Row, 1);

    chord(&mut editor, "ControlLeft", "KeyC");
    assert!(editor.has_copy(Axis::Row));
    assert!(!editor.has_copy(Axis::Col));

    tap(&mut editor, "Space");
    tap(&mut editor, "ArrowUp");
    tap(&mut editor, "ArrowUp");
    assert_eq!(editor.highlight(), Highlight::Row(3));

    chord(&mut editor, "MetaLeft", "KeyV");
    assert_eq!(editor.grid().plane_states(Axis::Row, 3), pattern);
    assert_eq!(editor.grid().plane_states(Axis::Row, 1), pattern);
    assert_eq!(editor.cells_on(), 6);

    // Pasting again is idempotent
    chord(&mut editor, "ControlRight", "KeyV");
    assert_eq!(editor.cells_on(), 6);
}

#[test]
fn test_paste_needs_buffer_of_same_axis() {
    let mut editor = editor(4);
    highlight_row(&mut editor, 0);
    editor.toggle_cell(Coord::new(1, 0, 1));
    chord(&mut editor, "ControlLeft", "KeyC");

    tap(&mut editor, "ShiftLeft");
    assert_eq!(editor.highlight(), Highlight::Col(0));
    chord(&mut editor, "ControlLeft", "KeyV");
    assert_eq!(editor.cells_on(), 1);

    // KeyV without a modifier is not a paste
    tap(&mut editor, "ShiftLeft");
    tap(&mut editor, "ShiftLeft");
    tap(&mut editor, "ArrowUp");
    tap(&mut editor, "KeyV");
    assert_eq!(editor.cells_on(), 1);
}

#[test]
fn test_col_highlight_moves_on_inverted_keys() {
    let mut editor = editor(4);
    highlight_col(&mut editor, 2);
    assert_eq!(editor.highlight(), Highlight::Col(2));

    tap(&mut editor, "ArrowUp");
    assert_eq!(editor.highlight(), Highlight::Col(1));
    tap(&mut editor, "ArrowRight");
    tap(&mut editor, "ArrowRight");
    assert_eq!(editor.highlight(), Highlight::Col(0));
}

#[test]
fn test_observer_sees_events_in_order() {
    let (mut editor, log) = recorded_editor(4);

    tap(&mut editor, "KeyM");
    tap(&mut editor, "ShiftLeft");
    tap(&mut editor, "ArrowUp");
    tap(&mut editor, "Space");
    // Refused while a plane is selected
    tap(&mut editor, "ArrowUp");

    let events: Vec<EditorEvent> = log.borrow().iter().map(|(event, _)| *event).collect();
    assert_eq!(
        events,
        vec![
            EditorEvent::ModeChanged,
            EditorEvent::HighlightChanged,
            EditorEvent::SelectionChanged,
            EditorEvent::HighlightChanged,
            EditorEvent::HighlightChanged,
            EditorEvent::SelectionChanged,
        ]
    );

    let log = log.borrow();
    let (_, first) = log[0];
    assert_eq!(first.mode(), Mode::Edit);
    assert_eq!(first.highlight(), Highlight::None);
    let (_, last) = log[log.len() - 1];
    assert_eq!(last.selected(), Some(1));
    assert_eq!(last.selected_or_minus_one(), 1);
}

#[test]
fn test_clear_mode_shows_only_lit_cells() {
    let mut editor = editor(3);
    highlight_row(&mut editor, 0);
    editor.toggle_cell(Coord::new(0, 0, 0));
    editor.toggle_cell(Coord::new(2, 0, 1));

    tap(&mut editor, "KeyM");
    assert_eq!(editor.mode(), Mode::Clear);
    assert_eq!(editor.scene().visible_count(), 2);
    assert_eq!(editor.candidate_count(), 0);

    tap(&mut editor, "KeyM");
    assert_eq!(editor.mode(), Mode::View);
    assert_eq!(editor.scene().visible_count(), 27);
    assert_eq!(editor.cells_on(), 2);
}

#[test]
fn test_spacing_clamped_to_range() {
    let mut editor = editor(4);
    let start_distance = editor.scene().controls().distance();

    tap(&mut editor, "Minus");
    assert_eq!(editor.spacing(), 0.5);

    let mut expansions = 0;
    while editor.execute(Command::Expand) {
        expansions += 1;
    }
    assert_eq!(expansions, 8);
    assert!((editor.spacing() - 8.5).abs() < 1e-4);
    assert!((editor.scene().controls().distance() - start_distance - 200.0).abs() < 1e-3);

    let corner = editor.grid().cell(Coord::new(0, 0, 0));
    let step = editor.grid().cell_size() + editor.grid().spacing();
    assert!((corner.position().x + 1.5 * step).abs() < 1e-3);

    tap(&mut editor, "NumpadSubtract");
    assert!((editor.spacing() - 7.5).abs() < 1e-4);
}

#[test]
fn test_options_file_drives_editor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r##"{{"dimension": 5, "on_color": "#123456", "max_spacing": 2.5}}"##).unwrap();

    let options = EditorOptions::load(file.path()).unwrap();
    let mut editor = editor_with(options);
    assert_eq!(editor.grid().len(), 125);

    highlight_row(&mut editor, 0);
    editor.toggle_cell(Coord::new(0, 0, 0));
    let material = editor.grid().cell(Coord::new(0, 0, 0)).material();
    assert_eq!(material.color.to_string(), "#123456");

    assert!(editor.execute(Command::Expand));
    assert!(editor.execute(Command::Expand));
    assert!(!editor.execute(Command::Expand));
}

#[test]
fn test_invalid_options_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"dimension": 0}}"#).unwrap();
    assert!(EditorOptions::load(file.path()).is_err());
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::CycleMode),
        Just(Command::CycleHighlight),
        Just(Command::MoveHighlight(Direction::Increase)),
        Just(Command::MoveHighlight(Direction::Decrease)),
        Just(Command::ToggleSelection),
        Just(Command::Copy),
        Just(Command::Paste),
        Just(Command::Expand),
        Just(Command::Contract),
    ]
}

proptest! {
    #[test]
    fn test_state_stays_consistent(commands in prop::collection::vec(command(), 0..40)) {
        let n = 3;
        let mut editor = editor(n);

        for command in commands {
            editor.execute(command);

            if let Some(index) = editor.highlight().index() {
                prop_assert!(index < n);
            }
            if let Some(selected) = editor.selected() {
                prop_assert_eq!(editor.mode(), Mode::Edit);
                prop_assert_eq!(editor.highlight().index(), Some(selected));
            }

            let (visible, candidates) = match (editor.mode(), editor.highlight(), editor.selected()) {
                (Mode::View, _, _) => (n * n * n, 0),
                (Mode::Clear, _, _) => (editor.cells_on(), 0),
                (Mode::Edit, _, Some(_)) => (n * n, n * n),
                (Mode::Edit, Highlight::None, None) => (n * n * n, 0),
                (Mode::Edit, _, None) => (n * n * n, n * n * n),
            };
            prop_assert_eq!(editor.scene().visible_count(), visible);
            prop_assert_eq!(editor.candidate_count(), candidates);
            prop_assert!(editor.spacing() >= 0.5 - 1e-4 && editor.spacing() <= 8.5 + 1e-4);
        }
    }
}
