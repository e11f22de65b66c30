use super::{Scene, Surface};
use crate::error::Result;

/// Keeps every presented scene in memory. Used for headless runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    scenes: Vec<Scene>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn last(&self) -> Option<&Scene> {
        self.scenes.last()
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        self.scenes.push(scene.clone());
        Ok(())
    }
}
