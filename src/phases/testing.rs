//! Testing Phase
//!
//! Every test item is shown exactly once, in a fresh random order. A "yes"
//! is followed by a typicality rating; a "no" moves straight on.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::SessionContext;
use crate::display::Scene;
use crate::error::Result;
use crate::input::wait_map;
use crate::session::{Rating, Response};
use crate::stimuli::{
    TestItem, DECISION_PROMPT, NO_KEY, QUESTION_BOX, RATING_BOX, RATING_PROMPT, TEST_IMAGE_BOX, TEST_ITEMS, YES_KEY,
};

/// Uniformly random permutation of the fixed test items
pub fn shuffled_items<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static TestItem> {
    let mut items: Vec<&'static TestItem> = TEST_ITEMS.iter().collect();
    items.shuffle(rng);
    items
}

pub fn run<R: Rng + ?Sized>(ctx: &mut SessionContext<'_>, rng: &mut R) -> Result<Vec<Response>> {
    let order = shuffled_items(rng);
    info!(
        "Testing phase order: {:?}",
        order.iter().map(|item| item.label).collect::<Vec<_>>()
    );
    run_items(ctx, &order)
}

/// Present `items` in the given order and collect one response per item
pub fn run_items(ctx: &mut SessionContext<'_>, items: &[&TestItem]) -> Result<Vec<Response>> {
    let mut responses = Vec::with_capacity(items.len());
    for item in items {
        let response = present_item(ctx, item)?;
        debug!("{} -> {:?}", item.label, response.decision());
        responses.push(response);
    }
    Ok(responses)
}

fn present_item(ctx: &mut SessionContext<'_>, item: &TestItem) -> Result<Response> {
    debug!("Presenting {}", item.description);

    let mut scene = Scene::new();
    if let Some((path, image)) = ctx.load_visual(item.image) {
        scene = scene.image(path, image, TEST_IMAGE_BOX);
    }
    scene = scene.text(DECISION_PROMPT, QUESTION_BOX);
    ctx.surface.present(&scene)?;

    let belongs = wait_map(ctx.keys, |c| match c {
        YES_KEY => Some(true),
        NO_KEY => Some(false),
        _ => None,
    })?;
    if !belongs {
        return Ok(Response::no(item.label));
    }

    ctx.surface.present(&Scene::new().text(RATING_PROMPT, RATING_BOX))?;
    let rating = wait_map(ctx.keys, Rating::from_key)?;
    Ok(Response::yes(item.label, rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingSurface;
    use crate::input::ScriptedKeys;
    use crate::session::{Decision, Group, ParticipantSession};
    use image::DynamicImage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_shuffle_covers_all_orderings() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<&str>, usize> = HashMap::new();

        for _ in 0..1000 {
            let order: Vec<&str> = shuffled_items(&mut rng).iter().map(|i| i.label).collect();
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (order, n) in &counts {
            // Expected 166.7 per ordering, sd ≈ 11.8
            assert!((110..=225).contains(n), "{:?} seen {} times", order, n);
        }
    }

    #[test]
    fn test_shuffle_keeps_every_item_once() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut labels: Vec<&str> = shuffled_items(&mut rng).iter().map(|i| i.label).collect();
            labels.sort_unstable();
            assert_eq!(labels, vec!["Consistent A", "Consistent B", "Control"]);
        }
    }

    #[test]
    fn test_no_skips_rating_prompt() {
        let mut surface = RecordingSurface::new();
        let mut keys = ScriptedKeys::from_chars("n");
        let mut ctx = SessionContext::new(
            &mut surface,
            &mut keys,
            ParticipantSession::new("P01", Group::A),
            Path::new("."),
        );

        let responses = run_items(&mut ctx, &[&TEST_ITEMS[2]]).unwrap();

        assert_eq!(responses, vec![Response::no("Control")]);
        assert_eq!(surface.scenes().len(), 1);
        assert!(!surface.scenes()[0].contains_text(RATING_PROMPT));
    }

    #[test]
    fn test_yes_asks_for_rating_and_ignores_other_keys() {
        let mut surface = RecordingSurface::new();
        // 'q' and '8' are not accepted at either prompt
        let mut keys = ScriptedKeys::from_chars("qy809");
        let mut ctx = SessionContext::new(
            &mut surface,
            &mut keys,
            ParticipantSession::new("P01", Group::A),
            Path::new("."),
        );

        let err = run_items(&mut ctx, &[&TEST_ITEMS[0]]).unwrap_err();
        // '8', '0' and '9' are all outside 1-7, so the rating prompt is still waiting
        assert!(matches!(err, crate::error::ExperimentError::InputExhausted));
        assert_eq!(surface.scenes().len(), 2);
        assert!(surface.scenes()[1].contains_text(RATING_PROMPT));
    }

    #[test]
    fn test_uppercase_decision_is_accepted() {
        let mut surface = RecordingSurface::new();
        let mut keys = ScriptedKeys::from_chars("Y6N");
        let mut ctx = SessionContext::new(
            &mut surface,
            &mut keys,
            ParticipantSession::new("P01", Group::A),
            Path::new("."),
        );

        let responses = run_items(&mut ctx, &[&TEST_ITEMS[0], &TEST_ITEMS[2]]).unwrap();

        assert_eq!(
            responses,
            vec![
                Response::yes("Consistent A", Rating::new(6).unwrap()),
                Response::no("Control"),
            ]
        );
    }

    #[test]
    fn test_decision_screen_shows_item_image() {
        let assets = tempdir().unwrap();
        DynamicImage::new_rgb8(16, 16)
            .save(assets.path().join("A.jpg"))
            .unwrap();

        let mut surface = RecordingSurface::new();
        let mut keys = ScriptedKeys::from_chars("n");
        let mut ctx = SessionContext::new(
            &mut surface,
            &mut keys,
            ParticipantSession::new("P01", Group::A),
            assets.path(),
        );

        run_items(&mut ctx, &[&TEST_ITEMS[0]]).unwrap();

        let scene = surface.last().unwrap();
        assert!(scene.contains_text(DECISION_PROMPT));
        assert_eq!(
            scene.image_sources().collect::<Vec<_>>(),
            vec![assets.path().join(TEST_ITEMS[0].image).as_path()]
        );
    }

    #[test]
    fn test_decision_key_mapping() {
        let mut surface = RecordingSurface::new();
        let mut keys = ScriptedKeys::from_chars("xy3n");
        let mut ctx = SessionContext::new(
            &mut surface,
            &mut keys,
            ParticipantSession::new("P01", Group::B),
            Path::new("."),
        );

        let responses = run_items(&mut ctx, &[&TEST_ITEMS[0], &TEST_ITEMS[1]]).unwrap();

        assert_eq!(
            responses[0].decision(),
            Decision::Yes {
                rating: Rating::new(3).unwrap()
            }
        );
        assert_eq!(responses[1].decision(), Decision::No);
        assert_eq!(responses[1].rating(), None);
    }
}
