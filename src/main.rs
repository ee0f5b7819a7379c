use anyhow::Result;
use glam::{Vec2, Vec3};
use led_cube_editor::{
    camera_position, Coord, CubeEditor, EditorOptions, SceneBackend, SoftwareScene,
};
use std::path::Path;

/// Headless walkthrough of an editing session driven by key codes
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => EditorOptions::load(Path::new(&path))?,
        None => EditorOptions::default(),
    };

    println!("LED Cube Editor - Headless Session");
    println!("==================================\n");

    let scene = SoftwareScene::new(camera_position(&options), Vec2::new(1280.0, 800.0));
    let mut editor = CubeEditor::new(options, scene)?;
    let n = editor.grid().dimension();

    println!("✓ Created {n}×{n}×{n} cube");
    println!("  Cells: {}", editor.grid().len());
    println!("  Visible: {}", editor.scene().visible_count());

    // Clicking does nothing until a plane is selected
    let refused = !editor.toggle_hovered();
    println!("\n✓ Click in view mode refused: {}", refused);

    press(&mut editor, "KeyM");
    println!("\n✓ Mode: {:?}", editor.mode());

    press(&mut editor, "ShiftLeft");
    release(&mut editor, "ShiftLeft");
    for _ in 0..2 {
        press(&mut editor, "ArrowUp");
    }
    println!("  Highlight: {:?}", editor.highlight());
    println!("  Pick candidates: {}", editor.candidate_count());

    press(&mut editor, "Space");
    println!("\n✓ Selected plane {:?}", editor.selected());
    println!("  Visible: {}", editor.scene().visible_count());
    println!("  Pick candidates: {}", editor.candidate_count());

    // Draw a diagonal across the isolated row plane
    let row = editor.selected().unwrap_or(0);
    for i in 0..n {
        editor.toggle_cell(Coord::new(i, row, i));
    }
    println!("  LEDs on: {}", editor.cells_on());

    press_with(&mut editor, "ControlLeft", "KeyC");
    press(&mut editor, "Space");
    press(&mut editor, "ArrowDown");
    press(&mut editor, "Space");
    press_with(&mut editor, "ControlLeft", "KeyV");
    println!("\n✓ Pasted onto plane {:?}", editor.selected());
    println!("  LEDs on: {}", editor.cells_on());
    press(&mut editor, "Space");
    println!("  Pick candidates after deselect: {}", editor.candidate_count());

    press(&mut editor, "KeyM");
    println!("\n✓ Mode: {:?}", editor.mode());
    println!("  Visible: {} (lit cells only)", editor.scene().visible_count());

    let before = editor.spacing();
    press(&mut editor, "Equal");
    println!("\n✓ Expanded spacing {:.1} → {:.1}", before, editor.spacing());

    // Pointer over the middle of the viewport, then one frame
    editor.on_pointer_move(Vec2::ZERO);
    editor.tick();
    println!("  Camera at {}", format_vec(editor.scene().camera().position));
    println!("  Controls enabled: {}", editor.scene().controls_enabled());

    println!("\n📊 Session summary:");
    println!("  └─ Mode: {:?}", editor.mode());
    println!("  └─ LEDs on: {}", editor.cells_on());
    println!("  └─ Spacing: {:.1}", editor.spacing());
    Ok(())
}

fn press(editor: &mut CubeEditor<SoftwareScene>, code: &str) {
    editor.on_key(code, true);
}

fn release(editor: &mut CubeEditor<SoftwareScene>, code: &str) {
    editor.on_key(code, false);
}

fn press_with(editor: &mut CubeEditor<SoftwareScene>, modifier: &str, code: &str) {
    press(editor, modifier);
    press(editor, code);
    release(editor, code);
    release(editor, modifier);
}

fn format_vec(v: Vec3) -> String {
    format!("({:.1}, {:.1}, {:.1})", v.x, v.y, v.z)
}
