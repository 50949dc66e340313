//! Elision of overlong common prefixes and suffixes.
//!
//! When two long strings share a long common prefix (or suffix), the shared
//! part is replaced by `...`, keeping only the characters next to the point
//! of difference. Lengths are counted in characters, not bytes.

/// A common part longer than this many characters is elided.
pub const OVERLONG_THRESHOLD: usize = 40;

/// Characters of the common part kept next to the point of difference.
pub const KEEP_CONTEXT_CHARS: usize = 15;

const ELLIPSIS: &str = "...";

/// Elide an overlong common prefix from both strings.
pub fn remove_overlong_common_prefix(a: &str, b: &str) -> (String, String) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let prefix = common_prefix_len(&a, &b);
    (elide(&a, prefix, 0), elide(&b, prefix, 0))
}

/// Elide an overlong common prefix and an overlong common suffix from both
/// strings. The suffix is measured only over what follows the common prefix,
/// so the two never overlap.
pub fn remove_overlong_common_prefix_and_suffix(a: &str, b: &str) -> (String, String) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let prefix = common_prefix_len(&a, &b);
    let suffix = common_suffix_len(&a, &b, prefix);
    (elide(&a, prefix, suffix), elide(&b, prefix, suffix))
}

fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &[char], b: &[char], prefix: usize) -> usize {
    let limit = a.len().min(b.len()) - prefix;
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take(limit)
        .take_while(|(x, y)| x == y)
        .count()
}

fn elide(chars: &[char], prefix: usize, suffix: usize) -> String {
    let elide_prefix = prefix > OVERLONG_THRESHOLD;
    let elide_suffix = suffix > OVERLONG_THRESHOLD;
    let start = if elide_prefix {
        prefix - KEEP_CONTEXT_CHARS
    } else {
        0
    };
    let end = if elide_suffix {
        chars.len() - suffix + KEEP_CONTEXT_CHARS
    } else {
        chars.len()
    };

    let mut out = String::new();
    if elide_prefix {
        out.push_str(ELLIPSIS);
    }
    out.extend(&chars[start..end]);
    if elide_suffix {
        out.push_str(ELLIPSIS);
    }
    out
}
