//! Experiment Phases
//!
//! Bootstrap → learning → testing → results, run once each, top to bottom.
//! Everything a phase needs travels in `SessionContext`.

pub mod bootstrap;
pub mod learning;
pub mod testing;

use image::DynamicImage;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::display::{load_image, Surface};
use crate::error::Result;
use crate::input::KeySource;
use crate::results::ResponseLogger;
use crate::session::{ParticipantSession, Response};

/// State threaded through the learning and testing phases
pub struct SessionContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub keys: &'a mut dyn KeySource,
    pub session: ParticipantSession,
    /// Directory image paths are resolved against
    pub assets: &'a Path,
}

impl<'a> SessionContext<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        keys: &'a mut dyn KeySource,
        session: ParticipantSession,
        assets: &'a Path,
    ) -> Self {
        Self {
            surface,
            keys,
            session,
            assets,
        }
    }

    pub fn resolve(&self, image: &str) -> PathBuf {
        self.assets.join(image)
    }

    /// Load an image stimulus. Failures are logged and the caller carries on
    /// without the visual.
    pub fn load_visual(&self, image: &str) -> Option<(PathBuf, DynamicImage)> {
        let path = self.resolve(image);
        match load_image(&path) {
            Ok(decoded) => Some((path, decoded)),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

#[derive(Debug)]
pub enum SessionOutcome {
    /// The participant dialog was cancelled; nothing was written
    Cancelled,
    Completed {
        session: ParticipantSession,
        responses: Vec<Response>,
    },
}

/// Run one full session and append its responses to `logger`
pub fn run_session<R: Rng + ?Sized>(
    surface: &mut dyn Surface,
    keys: &mut dyn KeySource,
    rng: &mut R,
    assets: &Path,
    logger: &ResponseLogger,
) -> Result<SessionOutcome> {
    let Some(session) = bootstrap::run(surface, keys, rng)? else {
        info!("Participant dialog cancelled, exiting without saving");
        return Ok(SessionOutcome::Cancelled);
    };

    let mut ctx = SessionContext::new(surface, keys, session, assets);
    learning::run(&mut ctx)?;
    let responses = testing::run(&mut ctx, rng)?;
    logger.append(&ctx.session, &responses)?;

    Ok(SessionOutcome::Completed {
        session: ctx.session,
        responses,
    })
}
