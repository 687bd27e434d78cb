//! String distance primitives shared by all validators.

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of the full matrix for memory efficiency
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity in [0.0, 1.0] based on Levenshtein distance over
/// the longer string's character count.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0; // Both empty strings are identical
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

/// Jaccard overlap of the word sets of two strings, in [0.0, 1.0].
pub fn token_set_overlap(a: &str, b: &str) -> f64 {
    let a_tokens: std::collections::HashSet<&str> = a.split_whitespace().collect();
    let b_tokens: std::collections::HashSet<&str> = b.split_whitespace().collect();

    if a_tokens.is_empty() && b_tokens.is_empty() {
        return 1.0;
    }

    let intersection = a_tokens.intersection(&b_tokens).count();
    let union = a_tokens.union(&b_tokens).count();
    intersection as f64 / union as f64
}

/// Fraction of word positions that hold the same word in both strings,
/// measured over the longer token sequence. Captures word order, which the
/// set overlap deliberately ignores.
pub fn token_order_overlap(a: &str, b: &str) -> f64 {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();

    let max_len = a_tokens.len().max(b_tokens.len());
    if max_len == 0 {
        return 1.0;
    }

    let matched = a_tokens
        .iter()
        .zip(b_tokens.iter())
        .filter(|(x, y)| x == y)
        .count();
    matched as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_levenshtein_multibyte() {
        assert_eq!(levenshtein_distance("かな", "かに"), 1);
        assert_eq!(levenshtein_distance("食べる", "食べた"), 1);
    }

    #[test]
    fn test_normalized_similarity() {
        assert_eq!(normalized_similarity("abc", "abc"), 1.0);
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert!(normalized_similarity("kitten", "sitting") > 0.5);
        assert!(normalized_similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [("happy", "hapy"), ("sunday", "saturday"), ("", "abc")];
        for (a, b) in pairs {
            assert_eq!(normalized_similarity(a, b), normalized_similarity(b, a));
        }
    }

    #[test]
    fn single_substitution_similarity() {
        // One substitution in a string of length L gives 1 - 1/L.
        assert_eq!(normalized_similarity("hello", "hallo"), 1.0 - 1.0 / 5.0);
        assert_eq!(normalized_similarity("ab", "ac"), 0.5);
    }

    #[test]
    fn test_token_set_overlap() {
        assert_eq!(token_set_overlap("the cat sat", "the cat sat"), 1.0);
        assert_eq!(token_set_overlap("", ""), 1.0);
        assert_eq!(token_set_overlap("a b", "c d"), 0.0);
        // {the, cat} vs {the, dog}: intersection 1, union 3
        assert!((token_set_overlap("the cat", "the dog") - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_order_overlap() {
        assert_eq!(token_order_overlap("a b c", "a b c"), 1.0);
        assert_eq!(token_order_overlap("a b c", "c b a"), 1.0 / 3.0);
        assert_eq!(token_order_overlap("a b", "a b c d"), 0.5);
    }
}
