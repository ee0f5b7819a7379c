use crate::cell::{Coord, Material};
use crate::config::EditorOptions;
use crate::event::{EditorEvent, EditorObserver, EditorStatus, NoopObserver};
use crate::grid::{Axis, Grid, SPACE_DELTA_FACTOR};
use crate::input::{resolve, Command, Direction, Key, Modifiers};
use crate::picker::PointerPicker;
use crate::scene::{RenderHandle, SceneBackend};
use anyhow::Result;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Spacing change requested by one expand/contract key press
pub const SPACING_KEY_STEP: f32 = 0.5;

/// Camera travel accompanying one expand/contract step
pub const CAMERA_DOLLY_STEP: f32 = 25.0;

const SPACING_EPSILON: f32 = 1e-4;

/// Editor mode, cycled View → Edit → Clear → View
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    View,
    Edit,
    /// Edit view with every off cell hidden
    Clear,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Mode::View => Mode::Edit,
            Mode::Edit => Mode::Clear,
            Mode::Clear => Mode::View,
        }
    }
}

/// The plane the highlight cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    None,
    Row(usize),
    Col(usize),
}

impl Highlight {
    fn on(axis: Axis, index: usize) -> Self {
        match axis {
            Axis::Row => Highlight::Row(index),
            Axis::Col => Highlight::Col(index),
        }
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            Highlight::None => None,
            Highlight::Row(_) => Some(Axis::Row),
            Highlight::Col(_) => Some(Axis::Col),
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Highlight::None => None,
            Highlight::Row(index) | Highlight::Col(index) => Some(index),
        }
    }

    /// `(axis, index)` when a plane is highlighted
    pub fn plane(self) -> Option<(Axis, usize)> {
        self.axis().zip(self.index())
    }

    /// Highlighted index, `-1` for none
    pub fn index_or_minus_one(self) -> isize {
        self.index().map_or(-1, |index| index as isize)
    }

    /// None → Row(0) → Col(0) → None
    fn next_kind(self) -> Self {
        match self {
            Highlight::None => Highlight::Row(0),
            Highlight::Row(_) => Highlight::Col(0),
            Highlight::Col(_) => Highlight::None,
        }
    }
}

/// One captured on/off pattern per axis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyBuffer {
    row: Option<Vec<bool>>,
    col: Option<Vec<bool>>,
}

impl CopyBuffer {
    pub fn get(&self, axis: Axis) -> Option<&[bool]> {
        match axis {
            Axis::Row => self.row.as_deref(),
            Axis::Col => self.col.as_deref(),
        }
    }

    fn set(&mut self, axis: Axis, pattern: Vec<bool>) {
        match axis {
            Axis::Row => self.row = Some(pattern),
            Axis::Col => self.col = Some(pattern),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct EditorState {
    mode: Mode,
    highlight: Highlight,
    selected: Option<usize>,
    copy_buffer: CopyBuffer,
    pointer_down: bool,
}

/// LED cube editor over a scene backend `S`.
///
/// Owns the grid, the scene backend and the pointer picker, and turns host
/// input into mode, highlight, selection and copy-buffer transitions.
/// Disallowed input is filtered by guards and ignored; every command method
/// reports whether it took effect.
pub struct CubeEditor<S: SceneBackend> {
    options: EditorOptions,
    grid: Grid,
    scene: S,
    picker: PointerPicker,
    state: EditorState,
    modifiers: Modifiers,
    observer: Box<dyn EditorObserver>,
}

impl<S: SceneBackend> CubeEditor<S> {
    /// Build the editor with a no-op observer
    pub fn new(options: EditorOptions, scene: S) -> Result<Self> {
        Self::with_observer(options, scene, Box::new(NoopObserver))
    }

    /// Build the editor, creating and adding one renderable per cell
    pub fn with_observer(
        options: EditorOptions,
        mut scene: S,
        observer: Box<dyn EditorObserver>,
    ) -> Result<Self> {
        options.ensure_valid()?;

        let grid = Grid::new(
            options.dimension,
            options.cell_size,
            options.initial_spacing,
            options.default_material(),
            |_, position, scale, material| {
                let handle = scene.create_cube(position, scale, material);
                scene.add(handle);
                handle
            },
        );
        let picker = PointerPicker::new(options.hover_on_color, options.hover_off_color);

        log::info!(
            "Created {n}x{n}x{n} LED cube editor ({} cells)",
            grid.len(),
            n = options.dimension
        );

        Ok(Self {
            options,
            grid,
            scene,
            picker,
            state: EditorState::default(),
            modifiers: Modifiers::default(),
            observer,
        })
    }

    // ========== Accessors ==========

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn highlight(&self) -> Highlight {
        self.state.highlight
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    pub fn status(&self) -> EditorStatus {
        EditorStatus {
            mode: self.state.mode,
            highlight: self.state.highlight,
            selected: self.state.selected,
        }
    }

    pub fn copy_buffer(&self) -> &CopyBuffer {
        &self.state.copy_buffer
    }

    pub fn has_copy(&self, axis: Axis) -> bool {
        self.state.copy_buffer.get(axis).is_some()
    }

    pub fn hovered(&self) -> Option<Coord> {
        self.picker.hovered()
    }

    /// Size of the current pick candidate set
    pub fn candidate_count(&self) -> usize {
        self.picker.candidates().len()
    }

    pub fn spacing(&self) -> f32 {
        self.grid.spacing()
    }

    pub fn cells_on(&self) -> usize {
        self.grid.count_on()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.state.pointer_down
    }

    // ========== Host entry points ==========

    /// Record the pointer; picking happens on the next [`tick`](Self::tick)
    pub fn on_pointer_move(&mut self, ndc: Vec2) {
        self.picker.record_pointer(ndc);
    }

    /// Primary button press (`true`) or release (`false`). A press while
    /// the button is already down toggles nothing; release always hands
    /// the camera back to the controls.
    pub fn on_pointer_button(&mut self, is_down: bool) {
        let was_down = std::mem::replace(&mut self.state.pointer_down, is_down);
        if is_down {
            if was_down {
                log::trace!("press ignored: button already down");
                return;
            }
            self.toggle_hovered();
        } else if !self.scene.controls_enabled() {
            self.scene.set_controls_enabled(true);
        }
    }

    /// Keyboard input by `KeyboardEvent.code`; unknown codes are ignored
    pub fn on_key(&mut self, code: &str, is_down: bool) {
        let Some(key) = Key::from_code(code) else {
            return;
        };

        // Held modifiers auto-repeat; only the first press counts
        let repeat = is_down && self.modifiers.is_held(key);
        let is_modifier = self.modifiers.update(key, is_down);
        if !is_down || repeat {
            return;
        }

        match resolve(key, &self.modifiers) {
            Some(command) => {
                self.execute(command);
            }
            None if !is_modifier => log::trace!("no binding for {}", key.code()),
            None => {}
        }
    }

    /// Viewport size in pixels before the configured fractions apply
    pub fn on_resize(&mut self, size: Vec2) {
        let viewport = Vec2::new(
            size.x * self.options.width_fraction,
            size.y * self.options.height_fraction,
        );
        self.scene.resize(viewport);
    }

    /// Per-frame work: advance camera controls, then pick
    pub fn tick(&mut self) {
        self.scene.update_controls();
        self.picker.pick(&self.grid, &mut self.scene);
    }

    /// Run a command; returns whether its guard let it through
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::CycleMode => self.cycle_mode(),
            Command::CycleHighlight => self.cycle_highlight(),
            Command::MoveHighlight(direction) => self.move_highlight(direction),
            Command::ToggleSelection => self.toggle_selection(),
            Command::Copy => self.copy_plane(),
            Command::Paste => self.paste_plane(),
            Command::Expand => self.expand(),
            Command::Contract => self.contract(),
        }
    }

    // ========== Mode ==========

    /// Advance View → Edit → Clear → View. Always succeeds.
    pub fn cycle_mode(&mut self) -> bool {
        let from = self.state.mode;
        let to = from.next();

        self.state.mode = to;
        self.state.highlight = Highlight::None;
        self.state.selected = None;

        // Leaving edit drops any isolation; view shows everything again
        if from == Mode::Edit || to == Mode::View {
            self.set_all_visible();
        }
        if to == Mode::Clear {
            let off: Vec<Coord> = self
                .grid
                .iter()
                .filter(|c| !c.is_on())
                .map(|c| c.coord())
                .collect();
            for coord in off {
                self.set_visible(coord, false);
            }
        }

        self.repaint_all();
        self.settle();
        log::debug!("mode {:?} -> {:?}", from, to);

        self.notify(EditorEvent::ModeChanged);
        self.notify(EditorEvent::HighlightChanged);
        self.notify(EditorEvent::SelectionChanged);
        true
    }

    // ========== Highlight ==========

    /// Cycle the highlight kind None → Row(0) → Col(0) → None.
    /// Edit mode only, with nothing selected.
    pub fn cycle_highlight(&mut self) -> bool {
        if self.state.mode != Mode::Edit || self.state.selected.is_some() {
            log::trace!("highlight cycle ignored");
            return false;
        }

        let old = self.state.highlight;
        self.state.highlight = old.next_kind();

        if let Some((axis, index)) = old.plane() {
            self.repaint_plane(axis, index);
        }
        if let Some((axis, index)) = self.state.highlight.plane() {
            self.repaint_plane(axis, index);
        }
        self.settle();

        log::debug!("highlight {:?}", self.state.highlight);
        self.notify(EditorEvent::HighlightChanged);
        true
    }

    /// Move the highlighted plane one step. Row planes move up on the
    /// increase pair and down on the decrease pair; col planes use the
    /// same keys with the sign flipped. Stepping past either end is a no-op.
    pub fn move_highlight(&mut self, direction: Direction) -> bool {
        if self.state.mode != Mode::Edit || self.state.selected.is_some() {
            log::trace!("highlight move ignored");
            return false;
        }
        let Some((axis, index)) = self.state.highlight.plane() else {
            log::trace!("highlight move ignored: nothing highlighted");
            return false;
        };

        let step: isize = match (axis, direction) {
            (Axis::Row, Direction::Increase) | (Axis::Col, Direction::Decrease) => 1,
            (Axis::Row, Direction::Decrease) | (Axis::Col, Direction::Increase) => -1,
        };
        let target = index as isize + step;
        if target < 0 || target >= self.grid.dimension() as isize {
            log::trace!("highlight move ignored: {:?} {} is at the edge", axis, index);
            return false;
        }

        let target = target as usize;
        self.state.highlight = Highlight::on(axis, target);
        self.repaint_plane(axis, index);
        self.repaint_plane(axis, target);
        self.picker.refresh(&self.grid, &mut self.scene);

        log::debug!("highlight {:?}", self.state.highlight);
        self.notify(EditorEvent::HighlightChanged);
        true
    }

    // ========== Selection ==========

    /// Isolate the highlighted plane, or release the current isolation.
    /// Edit mode only, with a plane highlighted.
    pub fn toggle_selection(&mut self) -> bool {
        if self.state.mode != Mode::Edit {
            log::trace!("selection ignored outside edit mode");
            return false;
        }
        let Some((axis, index)) = self.state.highlight.plane() else {
            log::trace!("selection ignored: nothing highlighted");
            return false;
        };

        match self.state.selected {
            None => {
                self.state.selected = Some(index);
                for other in (0..self.grid.dimension()).filter(|&p| p != index) {
                    for coord in self.grid.plane(axis, other) {
                        self.set_visible(coord, false);
                    }
                }
                self.repaint_plane(axis, index);
                log::debug!("selected {:?} {}", axis, index);
            }
            Some(selected) => {
                self.state.selected = None;
                self.set_all_visible();
                self.repaint_plane(axis, selected);
                if selected != index {
                    self.repaint_plane(axis, index);
                }
                log::debug!("deselected {:?} {}", axis, selected);
            }
        }

        self.settle();
        self.notify(EditorEvent::SelectionChanged);
        true
    }

    // ========== Cell toggling ==========

    /// Flip the cell under the pointer. Requires edit mode, a highlight and
    /// a selection. Disables camera controls until the button is released.
    pub fn toggle_hovered(&mut self) -> bool {
        if self.state.mode != Mode::Edit
            || self.state.highlight == Highlight::None
            || self.state.selected.is_none()
        {
            log::trace!("toggle ignored: no plane selected");
            return false;
        }
        let Some(coord) = self.picker.hovered() else {
            log::trace!("toggle ignored: nothing under the pointer");
            return false;
        };

        self.scene.set_controls_enabled(false);
        self.toggle_cell(coord);
        true
    }

    /// Flip one cell unconditionally; returns its new state
    pub fn toggle_cell(&mut self, coord: Coord) -> bool {
        let on = !self.grid.cell(coord).is_on();
        self.set_cell(coord, on);
        self.picker.refresh(&self.grid, &mut self.scene);
        log::debug!("cell {} {}", coord, if on { "on" } else { "off" });
        on
    }

    // ========== Copy / paste ==========

    /// Capture the highlighted plane into the buffer of its axis
    pub fn copy_plane(&mut self) -> bool {
        if self.state.mode != Mode::Edit {
            log::trace!("copy ignored outside edit mode");
            return false;
        }
        let Some((axis, index)) = self.state.highlight.plane() else {
            log::trace!("copy ignored: nothing highlighted");
            return false;
        };

        let pattern = self.grid.plane_states(axis, index);
        log::debug!(
            "copied {:?} {} ({} on)",
            axis,
            index,
            pattern.iter().filter(|&&on| on).count()
        );
        self.state.copy_buffer.set(axis, pattern);
        true
    }

    /// Apply the buffer of the highlighted axis to the highlighted plane.
    /// The buffer is kept, so pasting can be repeated.
    pub fn paste_plane(&mut self) -> bool {
        if self.state.mode != Mode::Edit {
            log::trace!("paste ignored outside edit mode");
            return false;
        }
        let Some((axis, index)) = self.state.highlight.plane() else {
            log::trace!("paste ignored: nothing highlighted");
            return false;
        };
        let Some(pattern) = self.state.copy_buffer.get(axis).map(<[bool]>::to_vec) else {
            log::trace!("paste ignored: {:?} buffer empty", axis);
            return false;
        };

        let plane = self.grid.plane(axis, index);
        for (coord, on) in plane.into_iter().zip(pattern) {
            self.set_cell(coord, on);
        }
        self.picker.refresh(&self.grid, &mut self.scene);
        log::debug!("pasted onto {:?} {}", axis, index);
        true
    }

    // ========== Spacing ==========

    /// Spread the cells apart by one step, up to `max_spacing`
    pub fn expand(&mut self) -> bool {
        self.adjust_spacing(1.0)
    }

    /// Pull the cells together by one step, down to `initial_spacing`
    pub fn contract(&mut self) -> bool {
        self.adjust_spacing(-1.0)
    }

    fn adjust_spacing(&mut self, sign: f32) -> bool {
        let delta = sign * SPACING_KEY_STEP;
        let target = self.grid.spacing() + delta * SPACE_DELTA_FACTOR;
        if target > self.options.max_spacing + SPACING_EPSILON
            || target < self.options.initial_spacing - SPACING_EPSILON
        {
            log::trace!("spacing change ignored: {} outside range", target);
            return false;
        }

        self.grid.space(delta);
        for cell in self.grid.iter() {
            self.scene
                .set_transform(cell.handle(), cell.position(), cell.scale());
        }
        self.scene.dolly(sign * CAMERA_DOLLY_STEP);

        log::debug!("spacing now {}", self.grid.spacing());
        true
    }

    // ========== Presentation ==========

    /// What a cell shows when not hovered
    fn resting_material(&self, coord: Coord, on: bool) -> Material {
        if on {
            return self.options.on_material();
        }
        if let Some((axis, index)) = self.state.highlight.plane() {
            if axis.contains(index, coord) {
                return if self.state.selected == Some(index) {
                    self.options.selected_material()
                } else {
                    self.options.highlight_material()
                };
            }
        }
        self.options.default_material()
    }

    /// Set state and matching presentation on one cell
    fn set_cell(&mut self, coord: Coord, on: bool) {
        let material = self.resting_material(coord, on);
        let cell = self.grid.cell_mut(coord);
        if on {
            cell.set_on(material);
        } else {
            cell.set_off(material);
        }
        self.scene.set_material(cell.handle(), material);
    }

    fn repaint(&mut self, coord: Coord) {
        let on = self.grid.cell(coord).is_on();
        let material = self.resting_material(coord, on);
        let cell = self.grid.cell_mut(coord);
        cell.set_material(material);
        self.scene.set_material(cell.handle(), material);
    }

    fn repaint_plane(&mut self, axis: Axis, index: usize) {
        for coord in self.grid.plane(axis, index) {
            self.repaint(coord);
        }
    }

    fn repaint_all(&mut self) {
        let coords: Vec<Coord> = self.grid.iter().map(|c| c.coord()).collect();
        for coord in coords {
            self.repaint(coord);
        }
    }

    fn set_visible(&mut self, coord: Coord, visible: bool) {
        let cell = self.grid.cell_mut(coord);
        if cell.is_visible() == visible {
            return;
        }
        cell.set_visible(visible);
        let handle = cell.handle();
        if visible {
            self.scene.add(handle);
        } else {
            self.scene.remove(handle);
        }
    }

    fn set_all_visible(&mut self) {
        let hidden: Vec<Coord> = self
            .grid
            .iter()
            .filter(|c| !c.is_visible())
            .map(|c| c.coord())
            .collect();
        for coord in hidden {
            self.set_visible(coord, true);
        }
    }

    // ========== Picking scope ==========

    /// Cells the pointer may target right now
    fn candidate_handles(&self) -> Vec<RenderHandle> {
        if self.state.mode != Mode::Edit {
            return Vec::new();
        }
        match (self.state.highlight.axis(), self.state.selected) {
            (None, _) => Vec::new(),
            (Some(axis), Some(selected)) => self
                .grid
                .plane(axis, selected)
                .into_iter()
                .map(|coord| self.grid.cell(coord).handle())
                .collect(),
            (Some(_), None) => self
                .grid
                .iter()
                .filter(|c| c.is_visible())
                .map(|c| c.handle())
                .collect(),
        }
    }

    /// Re-snapshot the hovered cell from its new resting material, then
    /// narrow or widen the candidates (which may drop the hover)
    fn settle(&mut self) {
        self.picker.refresh(&self.grid, &mut self.scene);
        let candidates = self.candidate_handles();
        self.picker.set_candidates(candidates, &mut self.scene);
    }

    fn notify(&mut self, event: EditorEvent) {
        let status = self.status();
        self.observer.notify(event, &status);
    }
}

/// Camera position from the options as a vector
pub fn camera_position(options: &EditorOptions) -> Vec3 {
    Vec3::from_array(options.camera_position)
}
