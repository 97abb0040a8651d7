use crate::foundation::error::{QrylicError, QrylicResult};
use crate::spec::color::ColorSpec;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Positional color function applied to dark pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Gradient stage disabled.
    None,
    /// Position runs top to bottom.
    #[serde(alias = "linear-vertical")]
    LinearVertical,
    /// Position runs left to right.
    #[serde(alias = "linear-horizontal")]
    LinearHorizontal,
    /// Position is the normalized distance from the image center.
    Radial,
}

/// Gradient configuration: a kind plus an ordered stop list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Gradient kind; `none` skips the stage.
    #[serde(default = "default_gradient_kind")]
    pub kind: GradientKind,
    /// Ordered color stops, evenly spaced over `[0, 1]`. A single stop acts
    /// as a flat recolor.
    #[serde(default)]
    pub stops: Vec<ColorSpec>,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            kind: default_gradient_kind(),
            stops: Vec::new(),
        }
    }
}

/// Shape each dark module is redrawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleShape {
    /// Keep the full bounding box (identity).
    Square,
    /// Inscribed circle.
    Dots,
    /// All four corners rounded at the configured ratio.
    Rounded,
    /// All four corners rounded at a larger ratio.
    #[serde(alias = "extra-rounded")]
    ExtraRounded,
    /// Two diagonal corners rounded at a smaller ratio.
    Classy,
    /// Two diagonal corners rounded at the configured ratio.
    #[serde(alias = "classy-rounded")]
    ClassyRounded,
}

/// Module reshaping configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleStyleSpec {
    /// Shape to redraw dark modules with.
    #[serde(default = "default_module_shape")]
    pub shape: ModuleShape,
    /// Corner rounding radius as a fraction of the module size, in `[0, 0.5]`.
    #[serde(default = "default_corner_radius_ratio")]
    pub corner_radius_ratio: f64,
}

impl Default for ModuleStyleSpec {
    fn default() -> Self {
        Self {
            shape: default_module_shape(),
            corner_radius_ratio: default_corner_radius_ratio(),
        }
    }
}

/// Decorative frame style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStyle {
    /// Frame stage disabled.
    None,
    /// Border only.
    Basic,
    /// Border plus a circular alpha mask over the bordered square.
    Circular,
    /// Border plus an inner accent ring.
    Edge,
    /// Border plus an accent band across the bottom.
    Banner,
}

/// Caption rendered below the bordered image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionSpec {
    /// Caption text. Empty or whitespace-only text disables the caption.
    pub text: String,
    /// Font size in pixels.
    #[serde(default = "default_caption_size_px")]
    pub size_px: f32,
    /// Text color.
    #[serde(default = "default_caption_color")]
    pub color: ColorSpec,
    /// Optional font file path, relative to the assets root. Absent, a
    /// system sans-serif face is used.
    #[serde(default)]
    pub font_source: Option<String>,
}

/// Frame configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Frame style; `none` skips the stage.
    #[serde(default = "default_frame_style")]
    pub style: FrameStyle,
    /// Border fill color.
    #[serde(default = "default_frame_color")]
    pub color: ColorSpec,
    /// Optional caption below the bordered image.
    #[serde(default)]
    pub caption: Option<CaptionSpec>,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            style: default_frame_style(),
            color: default_frame_color(),
            caption: None,
        }
    }
}

impl FrameSpec {
    /// The caption that will actually render: present and non-blank.
    pub(crate) fn effective_caption(&self) -> Option<&CaptionSpec> {
        self.caption.as_ref().filter(|c| !c.text.trim().is_empty())
    }
}

/// Logo overlay configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogoSpec {
    /// Logo source: an `http(s)` URL or a path relative to the assets root.
    pub source: String,
    /// Target size as a percentage of the raster's shorter edge, in `(0, 100]`.
    #[serde(default = "default_logo_size_percent")]
    pub size_percent: f64,
}

/// Aggregate styling configuration for one pipeline.
///
/// Every section defaults to "off" (no gradient, square modules, no frame, no
/// logo), making the default configuration an exact pass-through of the base
/// raster.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Gradient stage configuration.
    #[serde(default)]
    pub gradient: GradientSpec,
    /// Module reshaping stage configuration.
    #[serde(default)]
    pub modules: ModuleStyleSpec,
    /// Frame stage configuration.
    #[serde(default)]
    pub frame: FrameSpec,
    /// Logo overlay stage configuration.
    #[serde(default)]
    pub logo: Option<LogoSpec>,
}

impl StyleConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> QrylicResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| QrylicError::config(format!("parse style config JSON: {e}")))?;
        Ok(config)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> QrylicResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            QrylicError::config(format!("open style config '{}': {e}", path.display()))
        })?;
        let r = BufReader::new(f);
        Self::from_reader(r)
    }

    /// Check range rules that deserialization cannot express.
    ///
    /// Runs once at pipeline construction; stages assume a validated config.
    pub fn validate(&self) -> QrylicResult<()> {
        if self.gradient.kind != GradientKind::None && self.gradient.stops.is_empty() {
            return Err(QrylicError::config(
                "gradient requires at least one color stop",
            ));
        }
        for stop in &self.gradient.stops {
            if !stop.is_finite() {
                return Err(QrylicError::config("gradient stop channels must be finite"));
            }
        }

        let ratio = self.modules.corner_radius_ratio;
        if !ratio.is_finite() || !(0.0..=0.5).contains(&ratio) {
            return Err(QrylicError::config(format!(
                "corner_radius_ratio {ratio} must be within [0, 0.5]"
            )));
        }

        if !self.frame.color.is_finite() {
            return Err(QrylicError::config("frame color channels must be finite"));
        }
        if let Some(caption) = self.frame.effective_caption() {
            if self.frame.style == FrameStyle::None {
                return Err(QrylicError::config(
                    "caption requires a frame style other than none",
                ));
            }
            if !caption.size_px.is_finite() || caption.size_px <= 0.0 {
                return Err(QrylicError::config("caption size_px must be finite and > 0"));
            }
            if !caption.color.is_finite() {
                return Err(QrylicError::config("caption color channels must be finite"));
            }
        }

        if let Some(logo) = &self.logo {
            if logo.source.trim().is_empty() {
                return Err(QrylicError::config("logo source must be non-empty"));
            }
            let pct = logo.size_percent;
            if !pct.is_finite() || pct <= 0.0 || pct > 100.0 {
                return Err(QrylicError::config(format!(
                    "logo size_percent {pct} must be within (0, 100]"
                )));
            }
        }

        Ok(())
    }
}

fn default_gradient_kind() -> GradientKind {
    GradientKind::None
}

fn default_module_shape() -> ModuleShape {
    ModuleShape::Square
}

fn default_corner_radius_ratio() -> f64 {
    0.3
}

fn default_frame_style() -> FrameStyle {
    FrameStyle::None
}

fn default_frame_color() -> ColorSpec {
    ColorSpec::rgba(0.0, 0.0, 0.0, 1.0)
}

fn default_caption_size_px() -> f32 {
    28.0
}

fn default_caption_color() -> ColorSpec {
    ColorSpec::rgba(1.0, 1.0, 1.0, 1.0)
}

fn default_logo_size_percent() -> f64 {
    20.0
}

#[cfg(test)]
#[path = "../../tests/unit/spec/model.rs"]
mod tests;
