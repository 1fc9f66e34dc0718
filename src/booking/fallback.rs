use rand::seq::SliceRandom;
use rand::Rng;

/// Clarification prompts for intents the upstream layer could not map to
/// anything we handle.
const PROMPTS: &[&str] = &[
    "I'm not sure what you're asking.",
    "Could you please rephrase that?",
    "I didn't quite catch that. Can you say it again?",
];

/// Pick a clarification prompt uniformly at random.
///
/// The randomness source is supplied by the caller so tests can pin the
/// draw with a seeded generator. No other state is involved.
pub fn respond<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PROMPTS.choose(rng).copied().expect("prompt set is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draws_from_the_prompt_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(PROMPTS.contains(&respond(&mut rng)));
        }
    }

    #[test]
    fn same_seed_gives_same_prompt() {
        let a = respond(&mut StdRng::seed_from_u64(42));
        let b = respond(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
