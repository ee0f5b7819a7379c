use crate::camera::{Camera, OrbitControls};
use crate::cell::Material;
use glam::{Vec2, Vec3};
use std::collections::HashSet;

/// Opaque identity of a renderable owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(u32);

impl RenderHandle {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Operations the editor consumes from the rendering engine.
///
/// The editor creates one unit cube per cell, adds and removes them from
/// the scene, mutates their material and transform, and asks for the
/// nearest ray hit among a candidate list. [`SoftwareScene`] is the
/// in-process implementation.
pub trait SceneBackend {
    /// Create a unit cube renderable (not yet added to the scene)
    fn create_cube(&mut self, position: Vec3, scale: f32, material: Material) -> RenderHandle;

    fn add(&mut self, handle: RenderHandle);

    fn remove(&mut self, handle: RenderHandle);

    fn set_material(&mut self, handle: RenderHandle, material: Material);

    fn material(&self, handle: RenderHandle) -> Option<Material>;

    fn set_transform(&mut self, handle: RenderHandle, position: Vec3, scale: f32);

    /// Nearest renderable among `candidates` hit by the ray through `pointer`
    fn raycast(&self, pointer: Vec2, candidates: &[RenderHandle]) -> Option<RenderHandle>;

    fn set_controls_enabled(&mut self, enabled: bool);

    fn controls_enabled(&self) -> bool;

    /// Advance camera controls for this frame
    fn update_controls(&mut self);

    /// Move the camera along its view axis
    fn dolly(&mut self, amount: f32);

    /// New viewport size in pixels
    fn resize(&mut self, size: Vec2);
}

/// A cube renderable as stored by [`SoftwareScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub position: Vec3,
    pub scale: f32,
    pub material: Material,
}

/// CPU-side scene: keeps renderables, a camera and orbit controls, and
/// resolves picks with ray/box intersection.
#[derive(Debug, Clone)]
pub struct SoftwareScene {
    renderables: Vec<Renderable>,
    in_scene: HashSet<RenderHandle>,
    camera: Camera,
    controls: OrbitControls,
    viewport: Vec2,
}

impl SoftwareScene {
    pub fn new(camera_position: Vec3, viewport: Vec2) -> Self {
        let aspect = aspect_of(viewport);
        let camera = Camera::new(camera_position, Vec3::ZERO, 45.0, aspect);
        let controls = OrbitControls::from_camera(&camera);
        Self {
            renderables: Vec::new(),
            in_scene: HashSet::new(),
            camera,
            controls,
            viewport,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_in_scene(&self, handle: RenderHandle) -> bool {
        self.in_scene.contains(&handle)
    }

    pub fn renderable(&self, handle: RenderHandle) -> Option<&Renderable> {
        self.renderables.get(handle.raw() as usize)
    }

    /// Renderables currently in the scene, in creation order
    pub fn visible(&self) -> impl Iterator<Item = (RenderHandle, &Renderable)> {
        self.renderables
            .iter()
            .enumerate()
            .map(|(index, renderable)| (RenderHandle::new(index as u32), renderable))
            .filter(move |(handle, _)| self.in_scene.contains(handle))
    }

    pub fn visible_count(&self) -> usize {
        self.in_scene.len()
    }
}

fn aspect_of(size: Vec2) -> f32 {
    if size.y > 0.0 {
        size.x / size.y
    } else {
        1.0
    }
}

impl SceneBackend for SoftwareScene {
    fn create_cube(&mut self, position: Vec3, scale: f32, material: Material) -> RenderHandle {
        let handle = RenderHandle::new(self.renderables.len() as u32);
        self.renderables.push(Renderable {
            position,
            scale,
            material,
        });
        handle
    }

    fn add(&mut self, handle: RenderHandle) {
        if self.renderable(handle).is_some() {
            self.in_scene.insert(handle);
        }
    }

    fn remove(&mut self, handle: RenderHandle) {
        self.in_scene.remove(&handle);
    }

    fn set_material(&mut self, handle: RenderHandle, material: Material) {
        if let Some(renderable) = self.renderables.get_mut(handle.raw() as usize) {
            renderable.material = material;
        }
    }

    fn material(&self, handle: RenderHandle) -> Option<Material> {
        self.renderable(handle).map(|r| r.material)
    }

    fn set_transform(&mut self, handle: RenderHandle, position: Vec3, scale: f32) {
        if let Some(renderable) = self.renderables.get_mut(handle.raw() as usize) {
            renderable.position = position;
            renderable.scale = scale;
        }
    }

    fn raycast(&self, pointer: Vec2, candidates: &[RenderHandle]) -> Option<RenderHandle> {
        let ray = self.camera.ray_through(pointer);
        candidates
            .iter()
            .filter(|handle| self.in_scene.contains(*handle))
            .filter_map(|&handle| {
                let renderable = self.renderable(handle)?;
                ray.intersect_cube(renderable.position, renderable.scale)
                    .map(|distance| (handle, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls.enabled = enabled;
    }

    fn controls_enabled(&self) -> bool {
        self.controls.enabled
    }

    fn update_controls(&mut self) {
        self.controls.update(&mut self.camera);
    }

    fn dolly(&mut self, amount: f32) {
        self.controls.dolly(amount);
    }

    fn resize(&mut self, size: Vec2) {
        self.viewport = size;
        self.camera.aspect = aspect_of(size);
    }
}
