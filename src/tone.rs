//! Pinyin tone notation conversion.
//!
//! Two notations are supported: **numbered**, with an ASCII digit 1-5 on
//! each syllable (5 is the neutral tone), and **diacritic**, where one vowel
//! carries a precomposed tone mark. Conversion never fails: tokens outside
//! the defined alphabet pass through unchanged, since this feeds a
//! display-oriented surface.
//!
//! The tone mark lands on the first vowel found in the fixed priority order
//! `A a E e i O o u ü r`, which encodes standard Mandarin placement rules.
//! The `r` row exists only for the erhua suffix and is identical across all
//! five tones.

use phf::phf_map;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Tone-placement priority. Earlier entries win regardless of position.
const VOWELS: [char; 10] = ['A', 'a', 'E', 'e', 'i', 'O', 'o', 'u', 'ü', 'r'];

/// Base vowel to its five tone glyphs, tones 1-4 then the bare vowel.
static NUM_TO_TONE: phf::Map<char, &'static str> = phf_map! {
    'A' => "ĀÁǍÀA",
    'a' => "āáǎàa",
    'E' => "ĒÉĚÈE",
    'e' => "ēéěèe",
    'i' => "īíǐìi",
    'O' => "ŌÓǑÒO",
    'o' => "ōóǒòo",
    'u' => "ūúǔùu",
    'ü' => "ǖǘǚǜü",
    'r' => "rrrrr",
};

/// Toned glyph to its base spelling plus tone digit. The bare umlaut vowel
/// maps to `u:` with no digit (the trailing space is trimmed off), so
/// `ü` round-trips through the `u:` convention.
static TONE_TO_NUM: phf::Map<char, &'static str> = phf_map! {
    'Ā' => "A1", 'Á' => "A2", 'Ǎ' => "A3", 'À' => "A4",
    'ā' => "a1", 'á' => "a2", 'ǎ' => "a3", 'à' => "a4",
    'Ē' => "E1", 'É' => "E2", 'Ě' => "E3", 'È' => "E4",
    'ē' => "e1", 'é' => "e2", 'ě' => "e3", 'è' => "e4",
    'ī' => "i1", 'í' => "i2", 'ǐ' => "i3", 'ì' => "i4",
    'Ō' => "O1", 'Ó' => "O2", 'Ǒ' => "O3", 'Ò' => "O4",
    'ō' => "o1", 'ó' => "o2", 'ǒ' => "o3", 'ò' => "o4",
    'ū' => "u1", 'ú' => "u2", 'ǔ' => "u3", 'ù' => "u4",
    'ü' => "u: ",
    'ǖ' => "u:1", 'ǘ' => "u:2", 'ǚ' => "u:3", 'ǜ' => "u:4",
};

/// Convert numbered-tone pinyin to diacritic notation.
///
/// Works across a whole space-delimited string. Both the CC-CEDICT digit
/// position (`Zhong1`) and the inline position (`Zho1ng`) are accepted.
/// Digit 5 removes the digit without placing a mark; a missing digit, a
/// missing vowel or a digit outside 1-5 leaves the token untouched.
///
/// # Example
/// ```
/// use cedict::tone::to_diacritics;
///
/// assert_eq!(to_diacritics("Zhong1 wen2"), "Zhōng wén");
/// assert_eq!(to_diacritics("Ni3 hao2 ma5"), "Nǐ háo ma");
/// assert_eq!(to_diacritics("nu:3"), "nǚ");
/// ```
pub fn to_diacritics(s: &str) -> String {
    let s = s.replace("u:", "ü");
    let words: Vec<String> = s.split(' ').map(mark_word).collect();
    words.join(" ").trim().to_string()
}

fn mark_word(w: &str) -> String {
    let chars: Vec<char> = w.chars().collect();
    let vowel = VOWELS
        .iter()
        .find_map(|v| chars.iter().position(|c| c == v));
    let digit = chars
        .iter()
        .position(|c| ('1'..='5').contains(c));
    let (vi, di) = match (vowel, digit) {
        (Some(vi), Some(di)) => (vi, di),
        _ => return w.to_string(),
    };

    let tone_idx = (chars[di] as usize) - ('1' as usize);
    let glyph = match NUM_TO_TONE
        .get(&chars[vi])
        .and_then(|row| row.chars().nth(tone_idx))
    {
        Some(glyph) => glyph,
        None => return w.to_string(),
    };

    let mut out = chars;
    out.remove(di);
    let vi = if di < vi { vi - 1 } else { vi };
    out[vi] = glyph;
    out.into_iter().collect()
}

/// Convert diacritic-tone pinyin to numbered notation.
///
/// The inverse of [`to_diacritics`]: each marked vowel reverts to its base
/// spelling and the tone digit moves to the end of the syllable. A bare `ü`
/// becomes `u:` with no digit.
///
/// # Example
/// ```
/// use cedict::tone::to_numbers;
///
/// assert_eq!(to_numbers("Zhōng wén"), "Zhong1 wen2");
/// assert_eq!(to_numbers("nǚ"), "nu:3");
/// ```
pub fn to_numbers(s: &str) -> String {
    let words: Vec<String> = s.split(' ').map(number_word).collect();
    words.join(" ").trim().to_string()
}

fn number_word(w: &str) -> String {
    let mut out = String::with_capacity(w.len() + 1);
    let mut tone = "";
    for c in w.chars() {
        match TONE_TO_NUM.get(&c) {
            Some(m) => {
                out.push_str(&m[..m.len() - 1]);
                tone = m[m.len() - 1..].trim();
            }
            None => out.push(c),
        }
    }
    out.push_str(tone);
    out
}

/// Remove all tone digits from a pinyin string.
pub fn strip_digits(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Remove all combining tone marks from a pinyin string (NFD, drop marks,
/// NFC). Note this also strips the umlaut from `ü`.
pub fn strip_tones(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Pinyin with neither tone marks nor tone digits.
pub fn plaintext(s: &str) -> String {
    strip_tones(&strip_digits(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_to_diacritics() {
        let cases = [
            ("AaEeiOouü1", "ĀaEeiOouü"),
            ("zaEeiOouü2", "záEeiOouü"),
            ("zzEeiOouü3", "zzĚeiOouü"),
            ("zzzeiOouü4", "zzzèiOouü"),
            ("zzzziOouü1", "zzzzīOouü"),
            ("zzzzzOouü2", "zzzzzÓouü"),
            ("zzzzzzouü3", "zzzzzzǒuü"),
            ("zzzzzzzuü4", "zzzzzzzùü"),
            ("zzzzzzzzü1", "zzzzzzzzǖ"),
            ("Zhong1 wen2", "Zhōng wén"),
            ("zhong1 Wen2", "zhōng Wén"),
            ("Zho1ng we2n", "Zhōng wén"),
            ("Ni3 hao2 ma5", "Nǐ háo ma"),
            ("Mei3 guo2 ren2", "Měi guó rén"),
            ("Me3i guo2 re2n", "Měi guó rén"),
        ];
        for (numbered, marked) in cases {
            assert_eq!(to_diacritics(numbered), marked, "to_diacritics({numbered:?})");
        }
    }

    #[test]
    fn diacritics_to_numbers() {
        let cases = [
            ("üz zǖz zü", "u:z zu:z1 zu:"),
            ("Zhōng wén", "Zhong1 wen2"),
            ("zhōng Wén", "zhong1 Wen2"),
            ("Nǐ háo ma", "Ni3 hao2 ma"),
            ("Měi guó rén", "Mei3 guo2 ren2"),
        ];
        for (marked, numbered) in cases {
            assert_eq!(to_numbers(marked), numbered, "to_numbers({marked:?})");
        }
    }

    #[test]
    fn malformed_tokens_pass_through() {
        assert_eq!(to_diacritics("zhong"), "zhong");
        assert_eq!(to_diacritics("zhong6"), "zhong6");
        assert_eq!(to_diacritics("zzz1"), "zzz1");
        assert_eq!(to_numbers("abc"), "abc");
    }

    #[test]
    fn erhua_is_tone_invariant() {
        assert_eq!(to_diacritics("r5"), "r");
        assert_eq!(to_diacritics("r2"), "r");
    }

    #[test]
    fn roundtrip_numbered_tokens() {
        let tokens = [
            "Zhong1", "wen2", "hao3", "lu:4", "nu:3", "er2", "yi1",
            "Mei3 guo2 ren2",
        ];
        for w in tokens {
            assert_eq!(to_numbers(&to_diacritics(w)), w, "roundtrip {w:?}");
        }
        // The neutral tone is one-way: the digit is dropped and nothing in
        // the marked form records it.
        assert_eq!(to_numbers(&to_diacritics("ma5")), "ma");
    }

    #[test]
    fn strip_helpers() {
        assert_eq!(strip_digits("Zhong1 wen2"), "Zhong wen");
        assert_eq!(strip_tones("Zhōng wén"), "Zhong wen");
        assert_eq!(strip_tones("nǚ"), "nu");
        assert_eq!(plaintext("Ni3 hǎo"), "Ni hao");
    }
}
