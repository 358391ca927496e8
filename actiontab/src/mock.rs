use rand::Rng;

use crate::types::PredictedAction;

/// Phrases a mock text prediction is drawn from
pub const MOCK_TEXT_PREDICTIONS: &[&str] = &[
    "Hello, world!",
    "Thank you for your message.",
    "Sounds good!",
    "npm install",
    "git commit -m 'update'",
];

const CLICK_PROBABILITY: f64 = 0.75;
const MAX_CLICK_OFFSET: i32 = 150;

/// Produces plausible random actions when no model is available.
///
/// Used for running the desktop client end to end without a GPU. Never
/// returns [`PredictedAction::None`].
pub struct MockActionGenerator;

impl MockActionGenerator {
    pub fn generate(cursor_x: i32, cursor_y: i32) -> PredictedAction {
        Self::generate_with(&mut rand::thread_rng(), cursor_x, cursor_y)
    }

    /// Same as [`Self::generate`] with a caller-supplied random source.
    pub fn generate_with<R: Rng + ?Sized>(
        rng: &mut R,
        cursor_x: i32,
        cursor_y: i32,
    ) -> PredictedAction {
        if rng.gen_bool(CLICK_PROBABILITY) {
            let dx = rng.gen_range(-MAX_CLICK_OFFSET..=MAX_CLICK_OFFSET);
            let dy = rng.gen_range(-MAX_CLICK_OFFSET..=MAX_CLICK_OFFSET);
            PredictedAction::Click {
                x: cursor_x.saturating_add(dx).max(0),
                y: cursor_y.saturating_add(dy).max(0),
                confidence: rng.gen_range(0.3..=0.95),
            }
        } else {
            let phrase = MOCK_TEXT_PREDICTIONS[rng.gen_range(0..MOCK_TEXT_PREDICTIONS.len())];
            PredictedAction::Text {
                text: phrase.to_string(),
                confidence: rng.gen_range(0.4..=0.9),
            }
        }
    }
}
