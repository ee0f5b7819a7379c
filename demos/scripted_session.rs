/// Example: Drawing a pattern and stamping it through the cube
///
/// This example demonstrates:
/// - Loading editor options from JSON
/// - Highlighting and selecting a plane
/// - Toggling LEDs inside the selected plane
/// - Copying the plane and pasting it onto every other plane of the axis
/// - Printing each plane as a text grid
use anyhow::Result;
use glam::Vec2;
use led_cube_editor::*;

const OPTIONS: &str = r##"{
    "dimension": 5,
    "cell_size": 2.0,
    "on_color": "#33FF66",
    "axes_helper": false
}"##;

/// Letter drawn on the first col plane, as (i, j) pairs
const LETTER_L: [(usize, usize); 7] = [(0, 4), (0, 3), (0, 2), (0, 1), (0, 0), (1, 0), (2, 0)];

fn main() -> Result<()> {
    println!("=== LED Cube Editor: Scripted Session Example ===\n");

    // Step 1: Build the editor
    println!("Step 1: Creating editor...");
    let options = EditorOptions::from_json_str(OPTIONS)?;
    let scene = SoftwareScene::new(camera_position(&options), Vec2::new(800.0, 600.0));
    let mut editor = CubeEditor::new(options, scene)?;
    let n = editor.grid().dimension();
    println!("  ✓ {n}×{n}×{n} cube, spacing {:.1}", editor.spacing());

    // Step 2: Highlight col 0 and isolate it
    println!("\nStep 2: Selecting col plane 0...");
    editor.execute(Command::CycleMode);
    editor.execute(Command::CycleHighlight);
    editor.execute(Command::CycleHighlight);
    editor.execute(Command::ToggleSelection);
    println!("  ✓ Highlight {:?}, selected {:?}", editor.highlight(), editor.selected());
    println!("  ✓ {} cells visible", editor.scene().visible_count());

    // Step 3: Draw
    println!("\nStep 3: Drawing the letter L...");
    for (i, j) in LETTER_L {
        editor.toggle_cell(Coord::new(i, j, 0));
    }
    print_plane(&editor, Axis::Col, 0);

    // Step 4: Copy and stamp through the cube
    println!("\nStep 4: Stamping onto every col plane...");
    editor.execute(Command::Copy);
    editor.execute(Command::ToggleSelection);
    for _ in 1..n {
        // Col planes advance on the decrease keys
        editor.execute(Command::MoveHighlight(Direction::Decrease));
        editor.execute(Command::Paste);
    }
    println!("  ✓ {} LEDs on", editor.cells_on());
    print_plane(&editor, Axis::Col, n - 1);

    // Step 5: Clear mode shows only lit cells
    println!("\nStep 5: Switching to clear mode...");
    editor.execute(Command::CycleMode);
    println!(
        "  ✓ Mode {:?}, {} cells visible",
        editor.mode(),
        editor.scene().visible_count()
    );

    println!("\n=== Session complete ===");
    Ok(())
}

/// Print a plane with j running down the rows and i across
fn print_plane(editor: &CubeEditor<SoftwareScene>, axis: Axis, index: usize) {
    let n = editor.grid().dimension();
    println!("  {:?} {}:", axis, index);
    for j in (0..n).rev() {
        let line: String = (0..n)
            .map(|i| {
                let coord = match axis {
                    Axis::Row => Coord::new(i, index, j),
                    Axis::Col => Coord::new(i, j, index),
                };
                if editor.grid().cell(coord).is_on() {
                    '●'
                } else {
                    '·'
                }
            })
            .collect();
        println!("    {}", line);
    }
}
