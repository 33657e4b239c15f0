//! Near-duplicate text detection.
//!
//! Used by the crawler and the payload optimizer to drop content that has
//! already been seen on an earlier page (navigation bars, repeated pricing
//! paragraphs, boilerplate footers).

/// Strings shorter than this are never flagged as duplicates; similarity
/// scores on tiny inputs are too noisy to act on.
pub const MIN_COMPARE_LEN: usize = 50;

/// Length-ratio floor below which two strings are not worth comparing.
const LENGTH_RATIO_FLOOR: f64 = 0.5;

/// Inputs at or under this many characters are compared in full; longer
/// inputs are sampled, since the matching-block scan is quadratic and
/// unbounded page texts would make comparison cost explode.
const COMPARE_WINDOW: usize = 2000;

/// Size of each sampled segment (head, middle, tail) on long inputs.
const SEGMENT_LEN: usize = COMPARE_WINDOW / 3;

/// Computes the Ratcliff/Obershelp similarity of two strings over their
/// characters: `2 * matches / (len(a) + len(b))`, symmetric, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matches = matching_chars(&a, &b);
    (2.0 * matches as f64) / total as f64
}

/// Counts the characters covered by recursively matching blocks: find the
/// longest common block, then match the regions to its left and right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (a_start, b_start, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_chars(&a[..a_start], &b[..b_start])
        + matching_chars(&a[a_start + len..], &b[b_start + len..])
}

/// Finds the longest common contiguous block between `a` and `b`.
///
/// Returns `(start_in_a, start_in_b, length)`. Standard dynamic-programming
/// scan keeping only the previous row.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                row[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = row;
    }

    best
}

/// Checks whether `candidate` is a near-duplicate of anything in `seen`.
///
/// Short inputs (under [`MIN_COMPARE_LEN`] chars) are never duplicates.
/// Exact matches short-circuit before any similarity computation, and a
/// length-ratio pre-filter skips entries that cannot plausibly score above
/// the threshold. Returns at the first entry scoring `>= threshold`.
///
/// This function has no side effects: the caller decides whether to record
/// `candidate` into `seen` after a non-duplicate verdict.
pub fn is_duplicate<'a, I>(candidate: &str, seen: I, threshold: f64) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let candidate_len = candidate.chars().count();
    if candidate_len < MIN_COMPARE_LEN {
        return false;
    }

    for entry in seen {
        if entry == candidate {
            return true;
        }

        let entry_len = entry.chars().count();
        let (min, max) = if candidate_len < entry_len {
            (candidate_len, entry_len)
        } else {
            (entry_len, candidate_len)
        };
        if max == 0 || (min as f64 / max as f64) < LENGTH_RATIO_FLOOR {
            continue;
        }

        if sampled_similarity(candidate, candidate_len, entry, entry_len) >= threshold {
            return true;
        }
    }

    false
}

/// Bounded-cost similarity for possibly-long strings.
///
/// Inputs within [`COMPARE_WINDOW`] chars are compared in full. Longer
/// inputs are sampled at three aligned relative positions (head, middle,
/// tail) and the lowest segment score is returned, so two texts sharing
/// only an opening block cannot pass as near-duplicates.
fn sampled_similarity(a: &str, a_len: usize, b: &str, b_len: usize) -> f64 {
    if a_len <= COMPARE_WINDOW && b_len <= COMPARE_WINDOW {
        return similarity(a, b);
    }

    let mut lowest = 1.0_f64;
    for part in 0..3 {
        let sa = char_slice(a, part * a_len / 3, SEGMENT_LEN);
        let sb = char_slice(b, part * b_len / 3, SEGMENT_LEN);
        let score = similarity(sa, sb);
        if score < lowest {
            lowest = score;
        }
    }
    lowest
}

/// Up to `count` characters of `text` starting at char offset `start`,
/// clamped to char boundaries and the end of the string.
fn char_slice(text: &str, start: usize, count: usize) -> &str {
    let begin = match text.char_indices().nth(start) {
        Some((idx, _)) => idx,
        None => return "",
    };
    let rest = &text[begin..];
    match rest.char_indices().nth(count) {
        Some((idx, _)) => &rest[..idx],
        None => rest,
    }
}

/// Running set of previously-seen text used by the payload optimizer.
///
/// Wraps the stateless [`is_duplicate`] check with the insert-on-miss
/// bookkeeping so callers can process fields in encounter order.
#[derive(Debug)]
pub struct SeenText {
    entries: Vec<String>,
    threshold: f64,
}

impl SeenText {
    pub fn new(threshold: f64) -> Self {
        Self {
            entries: Vec::new(),
            threshold,
        }
    }

    /// Returns true if `candidate` duplicates earlier content; records it
    /// as seen otherwise.
    pub fn check_and_insert(&mut self, candidate: &str) -> bool {
        if is_duplicate(candidate, &self.entries, self.threshold) {
            return true;
        }
        self.entries.push(candidate.to_string());
        false
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(text: &str) -> String {
        // Pad a distinctive prefix out past the minimum comparison length
        format!("{text} {}", "lorem ipsum filler text for length ".repeat(3))
    }

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("green fees", "green fees"), 1.0);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(similarity("aaaa", "bbbb"), 0.0);
    }

    #[test]
    fn test_similarity_symmetric() {
        let a = "weekday rates from $45 including cart";
        let b = "weekend rates from $65 including cart";
        assert!((similarity(a, b) - similarity(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_partial_overlap() {
        let score = similarity("abcdef", "abcxef");
        assert!(score > 0.5 && score < 1.0);
    }

    #[test]
    fn test_short_strings_never_duplicates() {
        let seen = vec!["green fees $45".to_string()];
        // Identical, but below the minimum comparison length
        assert!(!is_duplicate("green fees $45", &seen, 0.8));
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let text = long("exact duplicate paragraph");
        let seen = vec![text.clone()];
        assert!(is_duplicate(&text, &seen, 0.99));
    }

    #[test]
    fn test_length_ratio_prefilter_skips_mismatched() {
        let candidate = long("short");
        let huge = candidate.repeat(10);
        let seen = vec![huge];
        // Ratio is far below 0.5, so the entry is skipped outright
        assert!(!is_duplicate(&candidate, &seen, 0.1));
    }

    #[test]
    fn test_near_duplicate_detected() {
        let a = long("weekday green fees are $45 per player with cart included");
        let b = a.replace("$45", "$46");
        let seen = vec![a];
        assert!(is_duplicate(&b, &seen, 0.9));
    }

    #[test]
    fn test_long_texts_sharing_only_a_prefix_are_not_duplicates() {
        // Shared opening longer than the comparison window, then bodies
        // with nothing in common
        let prefix = "welcome to the cedar ridge weekly newsletter and club update ".repeat(44);
        let a = format!(
            "{prefix}{}",
            "tee times fill quickly on holiday weekends so call ahead ".repeat(180)
        );
        let b = format!(
            "{prefix}{}",
            "the pro shop stocks a full range of clubs shoes and apparel ".repeat(175)
        );
        let seen = vec![a];
        assert!(!is_duplicate(&b, &seen, 0.9));
    }

    #[test]
    fn test_long_near_identical_texts_detected() {
        let a = "the championship course measures 7100 yards from the back tees ".repeat(170);
        let b = format!("{a} now accepting outside tournament bookings");
        let seen = vec![a];
        assert!(is_duplicate(&b, &seen, 0.9));
    }

    #[test]
    fn test_seen_text_first_occurrence_survives() {
        let mut seen = SeenText::new(0.85);
        let text = long("the clubhouse restaurant is open daily");
        assert!(!seen.check_and_insert(&text));
        assert!(seen.check_and_insert(&text));
        assert_eq!(seen.len(), 1);
    }
}
