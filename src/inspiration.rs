//! Motivational quotes for the "inspire me" panel.
//!
//! The quotes are a fixed, hand-written list picked at random. No model or
//! service is consulted; [`InspirationSource`] is the seam for one.

use rand::seq::SliceRandom;
use rand::Rng;

pub const INSPIRATIONS: &[&str] = &[
    "Every great dream begins with a dreamer. Remember, you have within you the strength, patience, and passion to reach for the stars.",
    "Your vision will become clear only when you look into your heart. Who looks outside, dreams; who looks inside, awakens.",
    "The future belongs to those who believe in the beauty of their dreams. Take one small step today.",
    "Don't watch the clock; do what it does. Keep going. Your consistent effort compounds over time.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. Keep pushing forward!",
];

/// Pick one quote uniformly at random.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    INSPIRATIONS.choose(rng).copied().unwrap_or_default()
}

/// Produces the text shown in the inspiration panel.
pub trait InspirationSource {
    fn next_inspiration(&mut self) -> String;
}

/// Static quotes drawn from [`INSPIRATIONS`].
pub struct StaticInspiration<R> {
    rng: R,
}

impl<R: Rng> StaticInspiration<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> InspirationSource for StaticInspiration<R> {
    fn next_inspiration(&mut self) -> String {
        pick(&mut self.rng).to_string()
    }
}
