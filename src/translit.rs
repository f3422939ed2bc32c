//! Hanzi-to-pinyin transliteration.
//!
//! Input text may mix hanzi, Latin letters, digits and punctuation.
//! Full-width CJK punctuation is first mapped character-by-character to its
//! half-width Latin equivalent, then the text is segmented left to right by
//! greedy longest dictionary match. Characters the dictionary cannot
//! resolve pass through verbatim; transliteration never fails.

use phf::phf_map;

use crate::entry::Entry;
use crate::trie::Trie;

/// Full-width CJK punctuation to half-width Latin equivalents.
static SYMBOLS: phf::Map<char, char> = phf_map! {
    '？' => '?',
    '！' => '!',
    '：' => ':',
    '。' => '.',
    '・' => '.',
    '，' => ',',
    '；' => ';',
    '（' => '(',
    '）' => ')',
    '【' => '[',
    '】' => ']',
};

/// True if the character is a Han ideograph.
///
/// Code-point range check over the CJK Unified Ideograph blocks (base,
/// extensions A-G and the compatibility block).
pub fn is_han(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0xF900..=0xFAFF
        | 0x20000..=0x2A6DF
        | 0x2A700..=0x2EBEF
        | 0x30000..=0x3134A
    )
}

/// True if every character is Han or recognized CJK punctuation.
///
/// This is the caller-facing mode switch: strings that pass route to
/// transliteration, everything else routes to meaning search.
pub fn is_hanzi(s: &str) -> bool {
    s.chars().all(|c| is_han(c) || SYMBOLS.contains_key(&c))
}

/// Replace full-width CJK punctuation with half-width Latin equivalents.
pub fn convert_symbols(s: &str) -> String {
    s.chars()
        .map(|c| SYMBOLS.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Remove the spaces the segmentation loop leaves around punctuation, so
/// the result reads with natural spacing: no space before `? . ! : ; ,`
/// or a closing bracket, none after an opening bracket.
pub fn fix_symbol_spaces(s: &str) -> String {
    s.replace(" ?", "?")
        .replace(" .", ".")
        .replace(" !", "!")
        .replace(" :", ":")
        .replace(" ;", ";")
        .replace(" ,", ",")
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace("( ", "(")
        .replace(" )", ")")
}

/// Greedy longest-match segmentation over the symbol-converted input.
///
/// Non-Han runs copy through verbatim followed by one separating space; at
/// each Han position the trie yields the longest traditional-or-simplified
/// key starting there, emitting that entry's stored pinyin, or the single
/// character verbatim when nothing matches. The result is trimmed,
/// double spaces are collapsed, and the first character is capitalized
/// with the remainder lowercased.
pub(crate) fn hanzi_to_pinyin(entries: &[Entry], trie: &Trie, s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        return String::new();
    }
    let s = convert_symbols(s);
    let chars: Vec<char> = s.chars().collect();

    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if !is_han(chars[i]) {
            while i < chars.len() && !is_han(chars[i]) {
                out.push(chars[i]);
                i += 1;
            }
            out.push(' ');
            continue;
        }
        match trie.longest_match(&chars, i) {
            Some((end, entry)) => {
                out.push_str(&entries[entry].pinyin);
                out.push(' ');
                i = end;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    capitalize(&collapse_spaces(out.trim()))
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }
    out
}

/// Uppercase the first character, lowercase the rest. Applied
/// unconditionally; a leading punctuation character is its own uppercase.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
    }
}
