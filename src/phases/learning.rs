//! Learning Phase
//!
//! Shows the assigned group's category description with each exemplar
//! illustration and its instruction, one key press per exemplar.

use tracing::{debug, info};

use super::SessionContext;
use crate::display::Scene;
use crate::error::Result;
use crate::input::wait_any;
use crate::stimuli::{category, DESCRIPTION_BOX, EXEMPLAR_BOX, INSTRUCTION_BOX};

pub fn run(ctx: &mut SessionContext<'_>) -> Result<()> {
    let definition = category(ctx.session.group());
    info!(
        "Learning phase: group {}, {} exemplar(s)",
        ctx.session.group(),
        definition.exemplars.len()
    );

    for exemplar in definition.exemplars {
        let mut scene = Scene::new().heading(definition.description, DESCRIPTION_BOX);
        // A missing illustration still leaves the texts on screen
        if let Some((path, image)) = ctx.load_visual(exemplar) {
            scene = scene.image(path, image, EXEMPLAR_BOX);
        }
        scene = scene.text(definition.instruction, INSTRUCTION_BOX);

        ctx.surface.present(&scene)?;
        let key = wait_any(ctx.keys)?;
        debug!("Exemplar {} acknowledged with {:?}", exemplar, key);
    }

    Ok(())
}
