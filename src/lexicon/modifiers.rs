//! Intensity modifiers used by the sentiment scorer.

/// Scalar added to a sentiment-bearing word that follows a booster.
pub const BOOST_INCREMENT: f64 = 0.293;

const INCREMENTS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
    "fabulously", "fully", "greatly", "highly", "hugely", "incredibly", "intensely",
    "majorly", "more", "most", "particularly", "purely", "quite", "really",
    "remarkably", "so", "substantially", "thoroughly", "totally", "tremendously",
    "unbelievably", "unusually", "utterly", "very",
];

const DECREMENTS: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont",
    "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt",
    "never", "none", "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant",
    "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt", "rarely", "seldom",
    "despite",
];

/// Booster scalar for `word` (already lowercased), if it is an intensifier.
pub fn booster_scalar(word: &str) -> Option<f64> {
    if INCREMENTS.contains(&word) {
        Some(BOOST_INCREMENT)
    } else if DECREMENTS.contains(&word) {
        Some(-BOOST_INCREMENT)
    } else {
        None
    }
}

pub fn is_negation(word: &str) -> bool {
    let lower = word.to_lowercase();
    if lower.contains("n't") {
        return true;
    }
    NEGATIONS.contains(&lower.replace('\'', "").as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booster_scalar() {
        assert_eq!(booster_scalar("very"), Some(BOOST_INCREMENT));
        assert_eq!(booster_scalar("slightly"), Some(-BOOST_INCREMENT));
        assert_eq!(booster_scalar("market"), None);
    }

    #[test]
    fn test_negation_forms() {
        assert!(is_negation("not"));
        assert!(is_negation("don't"));
        assert!(is_negation("Isn't"));
        assert!(is_negation("never"));
        assert!(!is_negation("now"));
    }
}
