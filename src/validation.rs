use crate::config::EditorOptions;
use crate::grid::SPACE_DELTA_FACTOR;
use serde::{Deserialize, Serialize};

/// Largest cube the editor accepts
pub const MAX_DIMENSION: usize = 64;

/// Above this the O(N³) per-input work starts to show
pub const RECOMMENDED_MAX_DIMENSION: usize = 16;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,
    Warning,
    Error,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    Dimension,
    CellSize,
    SpacingRange,
    Opacity,
    ViewportFraction,
    PixelDensity,
    CameraPosition,
}

/// Validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
    pub issue_type: ValidationIssueType,
}

impl ValidationIssue {
    fn new(severity: ValidationSeverity, issue_type: ValidationIssueType, message: String) -> Self {
        Self {
            severity,
            message,
            issue_type,
        }
    }
}

/// Complete validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn of_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.of_severity(ValidationSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.of_severity(ValidationSeverity::Warning)
    }

    pub fn info(&self) -> Vec<&ValidationIssue> {
        self.of_severity(ValidationSeverity::Info)
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Check editor options for values the editor cannot work with
pub fn validate_options(options: &EditorOptions) -> ValidationResult {
    use ValidationIssueType as Kind;
    use ValidationSeverity::*;

    let mut result = ValidationResult::new();

    if options.dimension == 0 || options.dimension > MAX_DIMENSION {
        result.add_issue(ValidationIssue::new(
            Error,
            Kind::Dimension,
            format!(
                "dimension must be between 1 and {}, got {}",
                MAX_DIMENSION, options.dimension
            ),
        ));
    } else if options.dimension > RECOMMENDED_MAX_DIMENSION {
        result.add_issue(ValidationIssue::new(
            Warning,
            Kind::Dimension,
            format!(
                "dimension {} means {} cells; editing may feel sluggish",
                options.dimension,
                options.dimension.pow(3)
            ),
        ));
    }

    if !options.cell_size.is_finite() || options.cell_size <= 0.0 {
        result.add_issue(ValidationIssue::new(
            Error,
            Kind::CellSize,
            format!("cell_size must be a positive number, got {}", options.cell_size),
        ));
    }

    let spacings = [
        ("initial_spacing", options.initial_spacing),
        ("max_spacing", options.max_spacing),
    ];
    let mut spacings_finite = true;
    for (name, value) in spacings {
        if !value.is_finite() {
            spacings_finite = false;
            result.add_issue(ValidationIssue::new(
                Error,
                Kind::SpacingRange,
                format!("{} must be a finite number, got {}", name, value),
            ));
        }
    }

    if spacings_finite {
        validate_spacing_range(options, &mut result);
    }

    let opacities = [
        ("default_opacity", options.default_opacity),
        ("on_opacity", options.on_opacity),
        ("highlight_opacity", options.highlight_opacity),
        ("selected_opacity", options.selected_opacity),
    ];
    for (name, value) in opacities {
        if !(0.0..=1.0).contains(&value) {
            result.add_issue(ValidationIssue::new(
                Error,
                Kind::Opacity,
                format!("{} must be within 0..=1, got {}", name, value),
            ));
        }
    }

    for (name, value) in [
        ("width_fraction", options.width_fraction),
        ("height_fraction", options.height_fraction),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            result.add_issue(ValidationIssue::new(
                Error,
                Kind::ViewportFraction,
                format!("{} must be within (0, 1], got {}", name, value),
            ));
        }
    }

    if let Some(density) = options.pixel_density {
        if !density.is_finite() || density <= 0.0 {
            result.add_issue(ValidationIssue::new(
                Error,
                Kind::PixelDensity,
                format!("pixel_density must be a positive number, got {}", density),
            ));
        }
    }

    if options.camera_position.iter().any(|c| !c.is_finite()) {
        result.add_issue(ValidationIssue::new(
            Error,
            Kind::CameraPosition,
            format!(
                "camera_position must hold finite numbers, got {:?}",
                options.camera_position
            ),
        ));
    }

    result
}

/// Spacing bounds, once both are known to be finite
fn validate_spacing_range(options: &EditorOptions, result: &mut ValidationResult) {
    use ValidationIssueType as Kind;
    use ValidationSeverity::*;

    if options.initial_spacing < 0.0 {
        result.add_issue(ValidationIssue::new(
            Error,
            Kind::SpacingRange,
            format!("initial_spacing must not be negative, got {}", options.initial_spacing),
        ));
    }

    if options.max_spacing < options.initial_spacing {
        result.add_issue(ValidationIssue::new(
            Error,
            Kind::SpacingRange,
            format!(
                "max_spacing ({}) is below initial_spacing ({})",
                options.max_spacing, options.initial_spacing
            ),
        ));
        return;
    }

    let step = crate::editor::SPACING_KEY_STEP * SPACE_DELTA_FACTOR;
    let steps = (options.max_spacing - options.initial_spacing) / step;
    if (steps - steps.round()).abs() > 1e-4 {
        result.add_issue(ValidationIssue::new(
            Info,
            Kind::SpacingRange,
            format!(
                "spacing range {}..{} is not a whole number of {} steps; max_spacing is never reached exactly",
                options.initial_spacing, options.max_spacing, step
            ),
        ));
    }
}
