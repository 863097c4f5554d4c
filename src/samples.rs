use rand::seq::SliceRandom;

/// Built-in practice sentences. One is picked at random per session.
pub const SAMPLE_TEXTS: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "Typing practice improves both speed and accuracy over time.",
    "Every developer should learn how to debug efficiently.",
    "React makes it painless to create interactive UIs.",
    "Short sentences are best for testing typing speed.",
];

pub fn random_sample() -> String {
    let mut rng = rand::thread_rng();
    SAMPLE_TEXTS
        .choose(&mut rng)
        .unwrap_or(&SAMPLE_TEXTS[0])
        .to_string()
}

/// A fresh sample for the "new text" action, never the text currently on
/// screen unless there is nothing else to pick.
pub fn random_sample_excluding(current: &str) -> String {
    let mut rng = rand::thread_rng();
    let candidates: Vec<&str> = SAMPLE_TEXTS
        .iter()
        .copied()
        .filter(|text| *text != current)
        .collect();
    candidates
        .choose(&mut rng)
        .map(|text| text.to_string())
        .unwrap_or_else(|| current.to_string())
}
