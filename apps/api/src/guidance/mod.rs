// Guidance synthesis: one generation call, strict parse-or-fail, no fallback.
// Job data in the result always comes from the matcher, never from the model.

pub mod prompts;
pub mod synthesizer;

pub use synthesizer::{synthesize_guidance, GuidanceError};
