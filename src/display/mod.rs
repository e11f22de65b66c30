//! Display Surface
//!
//! Phases describe what to show as a `Scene`: text and image stimuli placed
//! on a logical canvas (origin at the centre, y pointing up). A `Surface`
//! turns a scene into something the participant can see.

mod recording;
mod terminal;

pub use recording::RecordingSurface;
pub use terminal::TerminalSurface;

use image::DynamicImage;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ExperimentError, Result};

/// Logical extent of the display surface
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Centre position and size of a stimulus, in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone)]
pub enum Stimulus {
    Text {
        text: String,
        placement: Placement,
        bold: bool,
    },
    Image {
        source: PathBuf,
        image: DynamicImage,
        placement: Placement,
    },
}

/// Everything shown on one screen, drawn back to front
#[derive(Debug, Clone, Default)]
pub struct Scene {
    stimuli: Vec<Stimulus>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>, placement: Placement) -> Self {
        self.stimuli.push(Stimulus::Text {
            text: text.into(),
            placement,
            bold: false,
        });
        self
    }

    pub fn heading(mut self, text: impl Into<String>, placement: Placement) -> Self {
        self.stimuli.push(Stimulus::Text {
            text: text.into(),
            placement,
            bold: true,
        });
        self
    }

    pub fn image(mut self, source: impl Into<PathBuf>, image: DynamicImage, placement: Placement) -> Self {
        self.stimuli.push(Stimulus::Image {
            source: source.into(),
            image,
            placement,
        });
        self
    }

    pub fn stimuli(&self) -> &[Stimulus] {
        &self.stimuli
    }

    /// Text content of every text stimulus, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.stimuli.iter().filter_map(|s| match s {
            Stimulus::Text { text, .. } => Some(text.as_str()),
            Stimulus::Image { .. } => None,
        })
    }

    /// Source paths of every image stimulus, in draw order
    pub fn image_sources(&self) -> impl Iterator<Item = &Path> {
        self.stimuli.iter().filter_map(|s| match s {
            Stimulus::Image { source, .. } => Some(source.as_path()),
            Stimulus::Text { .. } => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// A place scenes can be shown on
pub trait Surface {
    /// Replace whatever is currently shown with `scene`
    fn present(&mut self, scene: &Scene) -> Result<()>;
}

/// Open and decode an image resource
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| ExperimentError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}
