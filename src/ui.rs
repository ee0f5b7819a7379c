use crate::{
    camera_position, input, Axis, Camera, Command, CubeEditor, EditorObserver, EditorOptions,
    EditorStatus, Highlight, Material, Mode, Rgb, SceneBackend, SoftwareScene,
};
use anyhow::Result;
use egui::{pos2, vec2, Color32, Pos2, Rect, Sense, Shape, Stroke};
use glam::{Vec2 as GVec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

/// Length of each axis line drawn by the axes helper
const AXES_LENGTH: f32 = 50.0;

/// Scroll pixels to camera distance
const SCROLL_DOLLY_SPEED: f32 = 0.1;

/// Lines shown in the status bar, written by editor notifications
#[derive(Debug, Default)]
struct StatusBoard {
    mode: String,
    highlight: String,
    selection: String,
}

/// Keeps the status bar in sync with the editor
#[derive(Clone, Default)]
struct StatusObserver(Rc<RefCell<StatusBoard>>);

impl EditorObserver for StatusObserver {
    fn mode_changed(&mut self, status: &EditorStatus) {
        self.0.borrow_mut().mode = format!("Mode: {}", mode_label(status.mode()));
    }

    fn highlight_changed(&mut self, status: &EditorStatus) {
        self.0.borrow_mut().highlight = highlight_label(status.highlight());
    }

    fn selection_changed(&mut self, status: &EditorStatus) {
        self.0.borrow_mut().selection = match status.selected() {
            Some(index) => format!("Plane {} isolated, click cells to toggle", index),
            None => "No plane selected".to_string(),
        };
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::View => "View",
        Mode::Edit => "Edit",
        Mode::Clear => "Clear",
    }
}

fn highlight_label(highlight: Highlight) -> String {
    match highlight {
        Highlight::None => "No plane highlighted".to_string(),
        Highlight::Row(index) => format!("Row {} highlighted", index),
        Highlight::Col(index) => format!("Col {} highlighted", index),
    }
}

fn to_color32(color: Rgb, opacity: f32, shade: f32) -> Color32 {
    let channel = |c: u8| (c as f32 * shade).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(
        channel(color.r()),
        channel(color.g()),
        channel(color.b()),
        (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Map an egui key to the editor's key codes
fn editor_key(key: egui::Key) -> Option<input::Key> {
    use egui::Key as K;
    let key = match key {
        K::M => input::Key::KeyM,
        K::C => input::Key::KeyC,
        K::V => input::Key::KeyV,
        K::ArrowUp => input::Key::ArrowUp,
        K::ArrowDown => input::Key::ArrowDown,
        K::ArrowLeft => input::Key::ArrowLeft,
        K::ArrowRight => input::Key::ArrowRight,
        K::Space => input::Key::Space,
        K::Enter => input::Key::Enter,
        K::Equals | K::Plus => input::Key::Equal,
        K::Minus => input::Key::Minus,
        _ => return None,
    };
    Some(key)
}

/// One visible cube face, ready to paint
struct Face {
    depth: f32,
    points: Vec<Pos2>,
    fill: Color32,
}

/// Desktop host for the editor
pub struct CubeEditorApp {
    editor: CubeEditor<SoftwareScene>,

    /// Shared with the observer registered on the editor
    status: Rc<RefCell<StatusBoard>>,

    /// Modifier state seen last frame, to synthesize modifier key events
    last_modifiers: egui::Modifiers,

    /// Available size last passed to `on_resize`
    last_available: Option<egui::Vec2>,

    pixels_per_point_applied: bool,
}

impl CubeEditorApp {
    pub fn new(options: EditorOptions) -> Result<Self> {
        let scene = SoftwareScene::new(camera_position(&options), GVec2::new(1280.0, 800.0));
        let status = Rc::new(RefCell::new(StatusBoard {
            mode: format!("Mode: {}", mode_label(Mode::View)),
            highlight: highlight_label(Highlight::None),
            selection: "No plane selected".to_string(),
        }));
        let observer = StatusObserver(status.clone());
        let editor = CubeEditor::with_observer(options, scene, Box::new(observer))?;

        Ok(Self {
            editor,
            status,
            last_modifiers: egui::Modifiers::default(),
            last_available: None,
            pixels_per_point_applied: false,
        })
    }

    pub fn editor(&self) -> &CubeEditor<SoftwareScene> {
        &self.editor
    }

    fn render_ui(&mut self, ctx: &egui::Context) {
        if !self.pixels_per_point_applied {
            if let Some(density) = self.editor.options().pixel_density {
                ctx.set_pixels_per_point(density);
            }
            self.pixels_per_point_applied = true;
        }

        self.forward_keys(ctx);

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(format!("Mode: {} (M)", mode_label(self.editor.mode()))).clicked() {
                    self.editor.execute(Command::CycleMode);
                }
                ui.separator();
                if ui.button("Expand (+)").clicked() {
                    self.editor.execute(Command::Expand);
                }
                if ui.button("Contract (-)").clicked() {
                    self.editor.execute(Command::Contract);
                }
                ui.separator();
                ui.label(format!(
                    "LEDs on: {} / {}",
                    self.editor.cells_on(),
                    self.editor.grid().len()
                ));
                ui.label(format!("Spacing: {:.1}", self.editor.spacing()));
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status = self.status.borrow();
            ui.horizontal(|ui| {
                ui.label(status.mode.as_str());
                ui.separator();
                ui.label(status.highlight.as_str());
                ui.separator();
                ui.label(status.selection.as_str());
            });
        });

        // Right panel (properties)
        egui::SidePanel::right("properties_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.render_properties_panel(ui);
            });

        // Central panel (cube)
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.render_canvas(ui);
            });

        ctx.request_repaint();
    }

    /// Turn egui key and modifier state into `on_key` calls
    fn forward_keys(&mut self, ctx: &egui::Context) {
        let (events, modifiers) = ctx.input(|i| (i.events.clone(), i.modifiers));

        let transitions = [
            (self.last_modifiers.shift, modifiers.shift, input::Key::ShiftLeft),
            (self.last_modifiers.ctrl, modifiers.ctrl, input::Key::ControlLeft),
            (self.last_modifiers.mac_cmd, modifiers.mac_cmd, input::Key::MetaLeft),
        ];
        for (was, now, key) in transitions {
            if was != now {
                self.editor.on_key(key.code(), now);
            }
        }
        self.last_modifiers = modifiers;

        // Ctrl+C / Ctrl+V may arrive as clipboard events instead of keys
        let mut copy_sent = false;
        let mut paste_sent = false;
        for event in &events {
            match event {
                egui::Event::Key { key, pressed, .. } => {
                    if let Some(key) = editor_key(*key) {
                        copy_sent |= *pressed && key == input::Key::KeyC && modifiers.command;
                        paste_sent |= *pressed && key == input::Key::KeyV && modifiers.command;
                        self.editor.on_key(key.code(), *pressed);
                    }
                }
                egui::Event::Copy if !copy_sent => {
                    copy_sent = true;
                    self.editor.execute(Command::Copy);
                }
                egui::Event::Paste(_) if !paste_sent => {
                    paste_sent = true;
                    self.editor.execute(Command::Paste);
                }
                _ => {}
            }
        }
    }

    fn render_properties_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("LED Cube");
        ui.separator();

        let dimension = self.editor.grid().dimension();
        ui.label(format!("Cube: {0}×{0}×{0}", dimension));
        ui.label(format!("Mode: {}", mode_label(self.editor.mode())));
        ui.label(highlight_label(self.editor.highlight()));
        ui.label(match self.editor.selected() {
            Some(index) => format!("Selected plane: {}", index),
            None => "Selected plane: none".to_string(),
        });
        ui.label(format!("Pick candidates: {}", self.editor.candidate_count()));
        if let Some(coord) = self.editor.hovered() {
            let state = if self.editor.grid().cell(coord).is_on() { "on" } else { "off" };
            ui.label(format!("Hovered: {} ({})", coord, state));
        }

        ui.separator();
        ui.label("Copy buffers");
        for (axis, name) in [(Axis::Row, "Row"), (Axis::Col, "Col")] {
            let text = match self.editor.copy_buffer().get(axis) {
                Some(pattern) => format!(
                    "{}: {} of {} on",
                    name,
                    pattern.iter().filter(|&&on| on).count(),
                    pattern.len()
                ),
                None => format!("{}: empty", name),
            };
            ui.label(text);
        }

        ui.separator();
        ui.label("Keys");
        for line in [
            "M: cycle view / edit / clear",
            "Shift: cycle row / col highlight",
            "Arrows: move highlight",
            "Space: select / deselect plane",
            "Click: toggle LED (plane selected)",
            "Ctrl+C / Ctrl+V: copy / paste plane",
            "+ / -: expand / contract",
            "Drag: orbit, scroll: zoom",
        ] {
            ui.small(line);
        }
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        if self.last_available != Some(available) {
            self.last_available = Some(available);
            self.editor.on_resize(GVec2::new(available.x, available.y));
        }

        let options = self.editor.options();
        let size = vec2(
            available.x * options.width_fraction,
            available.y * options.height_fraction,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        if let Some(pos) = response.hover_pos() {
            self.editor.on_pointer_move(to_ndc(pos, rect));
        }

        let (pressed, released) =
            ui.input(|i| (i.pointer.primary_pressed(), i.pointer.primary_released()));
        // Releases count only for presses that started on the canvas
        if pressed && response.hovered() {
            self.editor.on_pointer_button(true);
        }
        if released && self.editor.is_pointer_down() {
            self.editor.on_pointer_button(false);
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.editor
                .scene_mut()
                .controls_mut()
                .rotate(GVec2::new(delta.x, delta.y));
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.editor.scene_mut().dolly(-scroll * SCROLL_DOLLY_SPEED);
            }
        }

        self.editor.tick();

        let options = self.editor.options();
        painter.rect_filled(rect, 0.0, to_color32(options.background_color, 1.0, 1.0));

        let camera = self.editor.scene().camera().clone();
        if options.axes_helper {
            draw_axes(&painter, &camera, rect);
        }
        draw_cubes(&painter, &camera, rect, self.editor.scene());
    }
}

fn to_ndc(pos: Pos2, rect: Rect) -> GVec2 {
    GVec2::new(
        (pos.x - rect.left()) / rect.width() * 2.0 - 1.0,
        -((pos.y - rect.top()) / rect.height() * 2.0 - 1.0),
    )
}

fn to_screen(ndc: Vec3, rect: Rect) -> Pos2 {
    pos2(
        rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
    )
}

fn draw_axes(painter: &egui::Painter, camera: &Camera, rect: Rect) {
    let Some(origin) = camera.project(Vec3::ZERO) else {
        return;
    };
    let axes = [
        (Vec3::X, Color32::from_rgb(255, 80, 80)),
        (Vec3::Y, Color32::from_rgb(80, 255, 80)),
        (Vec3::Z, Color32::from_rgb(80, 140, 255)),
    ];
    for (direction, color) in axes {
        if let Some(tip) = camera.project(direction * AXES_LENGTH) {
            painter.line_segment(
                [to_screen(origin, rect), to_screen(tip, rect)],
                Stroke::new(1.5, color),
            );
        }
    }
}

/// Paint every visible cube face back to front, shaded by a light at the camera
fn draw_cubes(painter: &egui::Painter, camera: &Camera, rect: Rect, scene: &SoftwareScene) {
    const NORMALS: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];

    let mut faces = Vec::new();
    for (_, renderable) in scene.visible() {
        let half = renderable.scale * 0.5;
        for normal in NORMALS {
            let center = renderable.position + normal * half;
            let to_camera = camera.position - center;
            if to_camera.dot(normal) <= 0.0 {
                continue;
            }

            let (u, v) = if normal.x != 0.0 {
                (Vec3::Y, Vec3::Z)
            } else if normal.y != 0.0 {
                (Vec3::X, Vec3::Z)
            } else {
                (Vec3::X, Vec3::Y)
            };
            let corners = [-u - v, u - v, u + v, -u + v].map(|offset| center + offset * half);
            let Some(points) = corners
                .iter()
                .map(|&corner| camera.project(corner).map(|ndc| to_screen(ndc, rect)))
                .collect::<Option<Vec<Pos2>>>()
            else {
                continue;
            };

            let light = normal.dot(to_camera.normalize_or_zero()).max(0.0);
            faces.push(Face {
                depth: to_camera.length(),
                points,
                fill: shaded(renderable.material, 0.45 + 0.55 * light),
            });
        }
    }

    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for face in faces {
        painter.add(Shape::convex_polygon(face.points, face.fill, Stroke::NONE));
    }
}

fn shaded(material: Material, shade: f32) -> Color32 {
    to_color32(material.color, material.opacity, shade)
}

impl eframe::App for CubeEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_mapping() {
        let rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 100.0));
        assert_eq!(to_ndc(pos2(100.0, 50.0), rect), GVec2::new(-1.0, 1.0));
        assert_eq!(to_ndc(pos2(300.0, 150.0), rect), GVec2::new(1.0, -1.0));
        assert_eq!(to_ndc(pos2(200.0, 100.0), rect), GVec2::ZERO);

        assert_eq!(to_screen(Vec3::new(-1.0, 1.0, 0.5), rect), pos2(100.0, 50.0));
    }

    #[test]
    fn test_color_conversion() {
        let color = to_color32(Rgb(0xFF8000), 1.0, 0.5);
        assert_eq!(color, Color32::from_rgba_unmultiplied(128, 64, 0, 255));
    }

    #[test]
    fn test_editor_keys() {
        assert_eq!(editor_key(egui::Key::M), Some(input::Key::KeyM));
        assert_eq!(editor_key(egui::Key::Plus), Some(input::Key::Equal));
        assert_eq!(editor_key(egui::Key::Q), None);
    }

    #[test]
    fn test_status_observer_tracks_editor() {
        let mut app = CubeEditorApp::new(EditorOptions {
            dimension: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(app.editor().grid().len(), 8);

        app.editor.execute(Command::CycleMode);
        app.editor.execute(Command::CycleHighlight);
        let status = app.status.borrow();
        assert_eq!(status.mode, "Mode: Edit");
        assert_eq!(status.highlight, "Row 0 highlighted");
        assert_eq!(status.selection, "No plane selected");
    }
}
