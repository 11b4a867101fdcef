//! Winner selection over surviving texts.

/// Case-insensitive phrases that win regardless of length
const BIAS_TERMS: [&str; 2] = ["ethics clause", "ethics"];

/// Whether `text` mentions one of the bias terms
pub fn has_bias(text: &str) -> bool {
    let lower = text.to_lowercase();
    BIAS_TERMS.iter().any(|term| lower.contains(term))
}

/// Pick the winning text in a single left-to-right pass.
///
/// The first text starts as the winner. A later candidate replaces it when
/// it mentions a bias term, or when it is strictly longer in characters.
/// Otherwise the earlier text is kept. Returns `None` only for an empty
/// slice.
pub fn select_winner(survivors: &[String]) -> Option<&str> {
    let (first, rest) = survivors.split_first()?;
    let winner = rest.iter().fold(first, |winner, candidate| {
        if has_bias(candidate) || candidate.chars().count() > winner.chars().count() {
            candidate
        } else {
            winner
        }
    });
    Some(winner.as_str())
}
