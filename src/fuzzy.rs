//! Approximate matching support for meaning search.

/// Levenshtein edit distance between two strings, counted over Unicode
/// code points rather than bytes.
///
/// Classic single-row dynamic programming. Symmetric, zero iff the inputs
/// are code-point-identical; callers normalize case and whitespace
/// beforehand if they want to ignore them.
///
/// # Example
/// ```
/// use cedict::fuzzy::levenshtein;
///
/// assert_eq!(levenshtein("中文", "中國"), 1);
/// assert_eq!(levenshtein("", "中文老師"), 4);
/// ```
pub fn levenshtein(src: &str, dst: &str) -> usize {
    if src == dst {
        return 0;
    }
    let mut s1: Vec<char> = src.chars().collect();
    let mut s2: Vec<char> = dst.chars().collect();
    if s1.len() > s2.len() {
        std::mem::swap(&mut s1, &mut s2);
    }

    // row[j] holds the distance between the first i chars of s2 and the
    // first j chars of s1, rolled forward one s2 char at a time.
    let mut row: Vec<usize> = (0..=s1.len()).collect();
    for (i, c2) in s2.iter().enumerate() {
        let mut prev = i + 1;
        for (j, c1) in s1.iter().enumerate() {
            let curr = if c1 == c2 {
                row[j]
            } else {
                row[j].min(row[j + 1]).min(prev) + 1
            };
            row[j] = prev;
            prev = curr;
        }
        row[s1.len()] = prev;
    }
    row[s1.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_distances() {
        let cases = [
            ("", "中文老師", 4),
            ("中文老師", "", 4),
            ("中文老師", "中文老師", 0),
            ("中文", "中國", 1),
            ("中國人", "美國人", 1),
            ("小籠包", "人", 3),
            ("I like learning chinese.", "Do you like learning chinese?", 7),
            ("Wǒ xǐhuān xuéxí zhōngwén.", "Nǐ xǐhuān xué zhōngwén ma?", 8),
            ("我喜欢学习中文。", "你喜欢学中文吗？", 4),
            ("我喜歡學習中文。", "你喜歡學中文嗎？", 4),
        ];
        for (src, dst, want) in cases {
            assert_eq!(levenshtein(src, dst), want, "levenshtein({src:?}, {dst:?})");
        }
    }

    #[test]
    fn symmetry_and_triangle() {
        let words = ["", "中", "中文", "中文老師", "chinese", "chines"];
        for a in words {
            for b in words {
                assert_eq!(levenshtein(a, b), levenshtein(b, a));
                assert_eq!(levenshtein(a, b) == 0, a == b);
                for c in words {
                    assert!(levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c));
                }
            }
        }
    }
}
