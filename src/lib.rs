// LED Cube Editor - Core Library

pub mod camera;
pub mod cell;
pub mod config;
pub mod editor;
pub mod event;
pub mod grid;
pub mod input;
pub mod picker;
pub mod scene;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use camera::{Camera, OrbitControls, Ray};
pub use cell::{Cell, Coord, Material, Rgb};
pub use config::EditorOptions;
pub use editor::{camera_position, CopyBuffer, CubeEditor, Highlight, Mode};
pub use event::{EditorEvent, EditorObserver, EditorStatus, NoopObserver};
pub use grid::{Axis, Grid};
pub use input::{Command, Direction, Key, Modifiers};
pub use picker::PointerPicker;
pub use scene::{RenderHandle, SceneBackend, SoftwareScene};
pub use ui::CubeEditorApp;
pub use validation::{validate_options, ValidationIssue, ValidationResult, ValidationSeverity};
