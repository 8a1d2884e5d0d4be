//! # Command Suggestions
//!
//! When a user mistypes a command name, the error should tell them what went
//! wrong AND what they probably meant. This module ranks the registered
//! command names by edit distance to the unknown word.
//!
//! ## Usage
//!
//! ```
//! use illa::suggestions::similar_names;
//!
//! let names = ["deploy", "doctor", "list"];
//! assert_eq!(similar_names("deplyo", names), vec!["deploy".to_string()]);
//! assert!(similar_names("zzzzzz", names).is_empty());
//! ```

/// Maximum edit distance for a name to count as a suggestion.
pub const MAX_DISTANCE: usize = 2;

/// Return the candidates that are close to `input`, closest first.
///
/// A candidate qualifies when its edit distance is at most [`MAX_DISTANCE`]
/// and smaller than the input length, or when it starts with `input`.
/// Ties keep the candidates' original order.
pub fn similar_names<'a, I>(input: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lowered = input.to_lowercase();
    let mut ranked: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate_lowered = candidate.to_lowercase();
            let distance = edit_distance(&lowered, &candidate_lowered);
            let close = distance <= MAX_DISTANCE && distance < input.chars().count();
            let prefix = !lowered.is_empty() && candidate_lowered.starts_with(&lowered);
            (close || prefix).then_some((distance, candidate))
        })
        .collect();

    ranked.sort_by_key(|(distance, _)| *distance);
    ranked
        .into_iter()
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single-row variant: `prev[j]` is the distance between a[..i] and b[..j].
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
