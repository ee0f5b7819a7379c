use crate::cell::{Coord, Material, Rgb};
use crate::grid::Grid;
use crate::scene::{RenderHandle, SceneBackend};
use glam::Vec2;

/// Cell currently showing hover styling
#[derive(Debug, Clone, Copy, PartialEq)]
struct Hit {
    handle: RenderHandle,
    coord: Coord,
    /// Material to put back when the hover ends
    saved: Material,
}

/// Resolves which cell the pointer is over and keeps hover styling on at
/// most one cell.
///
/// Pointer moves only record a position; [`PointerPicker::pick`] runs once
/// per frame against the latest one.
#[derive(Debug, Clone)]
pub struct PointerPicker {
    pointer: Option<Vec2>,
    candidates: Vec<RenderHandle>,
    current: Option<Hit>,
    hover_on: Rgb,
    hover_off: Rgb,
}

impl PointerPicker {
    /// `hover_on` is shown over on cells, `hover_off` over off cells
    pub fn new(hover_on: Rgb, hover_off: Rgb) -> Self {
        Self {
            pointer: None,
            candidates: Vec::new(),
            current: None,
            hover_on,
            hover_off,
        }
    }

    /// Remember the pointer in normalized device coordinates
    pub fn record_pointer(&mut self, ndc: Vec2) {
        self.pointer = Some(ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)));
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn candidates(&self) -> &[RenderHandle] {
        &self.candidates
    }

    /// Cell under the pointer as of the last pick
    pub fn hovered(&self) -> Option<Coord> {
        self.current.map(|hit| hit.coord)
    }

    /// Replace the candidate set. A hovered cell that is no longer a
    /// candidate is restored straight away.
    pub fn set_candidates<S: SceneBackend + ?Sized>(
        &mut self,
        candidates: Vec<RenderHandle>,
        scene: &mut S,
    ) {
        self.candidates = candidates;
        if let Some(hit) = self.current {
            if !self.candidates.contains(&hit.handle) {
                self.restore(scene);
            }
        }
    }

    /// Cast from the camera through the latest pointer position and move
    /// the hover styling to the nearest hit
    pub fn pick<S: SceneBackend + ?Sized>(&mut self, grid: &Grid, scene: &mut S) -> Option<Coord> {
        let Some(pointer) = self.pointer else {
            return self.hovered();
        };

        let hit = scene
            .raycast(pointer, &self.candidates)
            .and_then(|handle| grid.coord_of(handle).map(|coord| (handle, coord)));

        match hit {
            Some((handle, coord)) => {
                if self.current.map(|h| h.handle) != Some(handle) {
                    self.restore(scene);
                    self.hover(handle, coord, grid, scene);
                }
            }
            None => self.restore(scene),
        }

        self.hovered()
    }

    /// Re-apply hover styling after the hovered cell's resting material or
    /// state changed underneath it
    pub fn refresh<S: SceneBackend + ?Sized>(&mut self, grid: &Grid, scene: &mut S) {
        if let Some(hit) = self.current {
            self.hover(hit.handle, hit.coord, grid, scene);
        }
    }

    /// Drop hover styling, if any
    pub fn restore<S: SceneBackend + ?Sized>(&mut self, scene: &mut S) {
        if let Some(hit) = self.current.take() {
            scene.set_material(hit.handle, hit.saved);
            log::trace!("hover left {}", hit.coord);
        }
    }

    fn hover<S: SceneBackend + ?Sized>(
        &mut self,
        handle: RenderHandle,
        coord: Coord,
        grid: &Grid,
        scene: &mut S,
    ) {
        let cell = grid.cell(coord);
        let saved = cell.material();
        let color = if cell.is_on() { self.hover_on } else { self.hover_off };

        scene.set_material(handle, saved.with_color(color));
        self.current = Some(Hit {
            handle,
            coord,
            saved,
        });
        log::trace!("hover entered {}", coord);
    }
}
