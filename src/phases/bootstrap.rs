//! Session Bootstrap
//!
//! Participant dialog, group assignment and the introduction screen.

use rand::Rng;
use tracing::info;

use crate::display::{Scene, Surface};
use crate::error::Result;
use crate::input::{wait_any, Key, KeySource};
use crate::session::{Group, ParticipantSession};
use crate::stimuli::{FORM_BOX, FORM_HINT_BOX, INTRO_BOX, INTRO_TEXT};

/// Ask for the participant identifier. `None` means the dialog was cancelled.
pub fn prompt_participant(surface: &mut dyn Surface, keys: &mut dyn KeySource) -> Result<Option<String>> {
    let mut value = String::new();
    loop {
        surface.present(&form_scene(&value))?;
        match keys.next_key()? {
            Key::Enter => return Ok(Some(value)),
            Key::Esc | Key::Interrupt => return Ok(None),
            Key::Backspace => {
                value.pop();
            }
            Key::Char(c) if !c.is_control() => value.push(c),
            _ => {}
        }
    }
}

fn form_scene(value: &str) -> Scene {
    Scene::new()
        .heading(format!("Participant: {}_", value), FORM_BOX)
        .text("Enter: OK    Esc: Cancel", FORM_HINT_BOX)
}

/// Collect participant metadata, assign a group and show the introduction
pub fn run<R: Rng + ?Sized>(
    surface: &mut dyn Surface,
    keys: &mut dyn KeySource,
    rng: &mut R,
) -> Result<Option<ParticipantSession>> {
    let Some(identifier) = prompt_participant(surface, keys)? else {
        return Ok(None);
    };

    let group = Group::draw(rng);
    info!("Participant {} is in Group {}", identifier, group);
    let session = ParticipantSession::new(identifier, group);

    surface.present(&Scene::new().text(INTRO_TEXT, INTRO_BOX))?;
    wait_any(keys)?;

    Ok(Some(session))
}
