use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

const NEAR: f32 = 0.1;
const FAR: f32 = 10_000.0;
const MIN_DISTANCE: f32 = 1.0;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Half-line used for picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance along the ray to an axis-aligned cube centred at `center`
    /// with edge length `size`, or `None` when the ray misses it.
    pub fn intersect_cube(&self, center: Vec3, size: f32) -> Option<f32> {
        let half = Vec3::splat(size * 0.5);
        let min = center - half;
        let max = center + half;

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            if dir.abs() < f32::EPSILON {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - origin) / dir;
            let t2 = (max[axis] - origin) / dir;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Perspective camera looking at a target point, with NDC projection and
/// picking rays
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            target,
            fov_y_degrees,
            aspect,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect.max(1e-3), NEAR, FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray from the camera through a normalized device coordinate in [-1,1]²
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse * ndc.extend(-1.0).extend(1.0);
        let far = inverse * ndc.extend(1.0).extend(1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;
        Ray::new(near, far - near)
    }

    /// Project a world point to NDC; `z` carries depth. `None` behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= NEAR * 0.5 {
            return None;
        }
        Some(clip.xyz() / clip.w)
    }
}

/// Orbit controls rotating the camera around its target
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    yaw: f32,
    pitch: f32,
    distance: f32,
    rotate_speed: f32,
}

impl OrbitControls {
    /// Derive orbit angles from the camera's current placement
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            enabled: true,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            rotate_speed: 0.005,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Rotate by a pointer drag given in pixels. Ignored while disabled.
    pub fn rotate(&mut self, drag: Vec2) {
        if !self.enabled {
            return;
        }
        self.yaw -= drag.x * self.rotate_speed;
        self.pitch = (self.pitch + drag.y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move the camera towards (negative) or away from (positive) the target
    pub fn dolly(&mut self, amount: f32) {
        self.distance = (self.distance + amount).max(MIN_DISTANCE);
    }

    /// Write the orbit state back into the camera
    pub fn update(&self, camera: &mut Camera) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance;
        camera.position = camera.target + offset;
    }
}
