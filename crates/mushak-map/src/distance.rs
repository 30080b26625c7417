//! Exact Levenshtein edit distance.

/// Number of single-character insertions, deletions or substitutions
/// needed to turn `a` into `b`.
///
/// Characters are Unicode scalar values. Uses a two-row O(m·n) table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_cases() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("VAT", "VAT"), 0);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("VAT", "VATT"), 1);
        assert_eq!(levenshtein("TTI", "TTII"), 1);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein("মূসক", "মূসক"), 0);
        assert_eq!(levenshtein("ভ্যাট", "ভ্যাটি"), 1);
        assert_eq!(levenshtein("", "মূ"), 2);
    }
}
