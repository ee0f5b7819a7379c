use crate::scene::RenderHandle;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer address of a cell inside the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

/// 24-bit RGB colour stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "u32")]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Rgb)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> Self {
        color.0
    }
}

/// Colours are accepted either as plain integers or as `"#RRGGBB"` strings
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Number(u32),
    Hex(String),
}

impl TryFrom<ColorRepr> for Rgb {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Number(value) if value <= 0xff_ffff => Ok(Rgb(value)),
            ColorRepr::Number(value) => Err(format!("colour {value:#x} exceeds 0xFFFFFF")),
            ColorRepr::Hex(text) => {
                Rgb::parse_hex(&text).ok_or_else(|| format!("invalid colour string: {text:?}"))
            }
        }
    }
}

/// Colour/opacity pair applied to a cell's renderable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Rgb,
    pub opacity: f32,
}

impl Material {
    pub fn new(color: Rgb, opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// Same opacity, different colour
    pub fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }
}

/// One LED of the cube
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,

    /// On/off state, the only domain data a cell carries
    state: bool,

    /// Resting presentation (hover styling is never stored here)
    material: Material,

    position: Vec3,

    scale: f32,

    /// Whether the renderable is currently part of the scene
    visible: bool,

    handle: RenderHandle,
}

impl Cell {
    /// Create an off, visible cell
    pub fn new(
        coord: Coord,
        position: Vec3,
        scale: f32,
        material: Material,
        handle: RenderHandle,
    ) -> Self {
        Self {
            coord,
            state: false,
            material,
            position,
            scale,
            visible: true,
            handle,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_on(&self) -> bool {
        self.state
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    /// Turn the cell on and show it with `material`
    pub fn set_on(&mut self, material: Material) {
        self.state = true;
        self.material = material;
    }

    /// Turn the cell off and show it with `material`
    pub fn set_off(&mut self, material: Material) {
        self.state = false;
        self.material = material;
    }

    /// Change presentation only; the on/off state is untouched
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_layout(&mut self, position: Vec3, scale: f32) {
        self.position = position;
        self.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn off() -> Material {
        Material::new(Rgb(0x0CBCDC), 0.45)
    }

    fn on() -> Material {
        Material::new(Rgb(0xFF2D55), 0.95)
    }

    #[test]
    fn test_cell_creation() {
        let cell = Cell::new(
            Coord::new(1, 2, 3),
            Vec3::new(1.0, 2.0, 3.0),
            3.0,
            off(),
            RenderHandle::new(7),
        );

        assert_eq!(cell.coord(), Coord::new(1, 2, 3));
        assert!(!cell.is_on());
        assert!(cell.is_visible());
        assert_eq!(cell.material(), off());
        assert_eq!(cell.scale(), 3.0);
        assert_eq!(cell.handle(), RenderHandle::new(7));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut cell = Cell::new(Coord::new(0, 0, 0), Vec3::ZERO, 1.0, off(), RenderHandle::new(0));

        cell.set_on(on());
        assert!(cell.is_on());
        assert_eq!(cell.material(), on());

        cell.set_off(off());
        assert!(!cell.is_on());
        assert_eq!(cell.material(), off());
    }

    #[test]
    fn test_set_material_keeps_state() {
        let mut cell = Cell::new(Coord::new(0, 0, 0), Vec3::ZERO, 1.0, off(), RenderHandle::new(0));
        cell.set_on(on());
        cell.set_material(off().with_color(Rgb(0x123456)));

        assert!(cell.is_on());
        assert_eq!(cell.material().color, Rgb(0x123456));
        assert_eq!(cell.material().opacity, 0.45);
    }

    #[test]
    fn test_rgb_components_and_parsing() {
        let color = Rgb(0x0CBCDC);
        assert_eq!((color.r(), color.g(), color.b()), (0x0C, 0xBC, 0xDC));
        assert_eq!(color.to_string(), "#0CBCDC");

        assert_eq!(Rgb::parse_hex("#ff0000"), Some(Rgb(0xFF0000)));
        assert_eq!(Rgb::parse_hex("00ff00"), Some(Rgb(0x00FF00)));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_rgb_deserialization() {
        let from_number: Rgb = serde_json::from_str("16711680").unwrap();
        let from_string: Rgb = serde_json::from_str("\"#FF0000\"").unwrap();
        assert_eq!(from_number, from_string);

        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
        assert!(serde_json::from_str::<Rgb>("33554432").is_err());

        assert_eq!(serde_json::to_string(&Rgb(0xFF0000)).unwrap(), "16711680");
    }
}
