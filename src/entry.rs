//! Dictionary entry and header metadata model.
//!
//! An [`Entry`] is one line of the CC-CEDICT wire format,
//! `TRADITIONAL SIMPLIFIED [PINYIN] /MEANING1/MEANING2/.../`, and
//! [`Metadata`] is the `#! key=value` information embedded in the comment
//! header. Both are immutable once parsed.
//!
//! Format reference: <https://cc-cedict.org/wiki/format:syntax>

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::DictError;

/// A single dictionary entry.
///
/// `pinyin` is stored in numbered-tone notation with space-delimited
/// syllables, exactly as it appears between the brackets in the source
/// line. Meaning order is significant and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    pub meanings: Vec<String>,
}

impl Entry {
    /// Parse an entry from one line of dictionary text.
    ///
    /// The bracket pair is located within the segment before the first `/`,
    /// so meanings containing brackets (`CL:個|个[ge4]`) do not confuse the
    /// pinyin field.
    pub fn unmarshal(line: &str) -> Result<Entry, DictError> {
        let fields: Vec<&str> = line.split('/').collect();
        if fields.len() < 2 {
            return Err(DictError::Brackets(line.to_string()));
        }

        let head = fields[0];
        let (open, close) = match (head.find('['), head.find(']')) {
            (Some(open), Some(close)) if open < close => (open, close),
            _ => return Err(DictError::Brackets(line.to_string())),
        };

        let hanzi: Vec<&str> = head[..open].split_whitespace().collect();
        if hanzi.len() != 2 {
            return Err(DictError::HanziFields(line.to_string()));
        }

        Ok(Entry {
            traditional: hanzi[0].to_string(),
            simplified: hanzi[1].to_string(),
            pinyin: head[open + 1..close].to_string(),
            meanings: fields[1..fields.len() - 1]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        })
    }

    /// Format the entry back into its wire-format line.
    pub fn marshal(&self) -> String {
        format!(
            "{} {} [{}] /{}/",
            self.traditional,
            self.simplified,
            self.pinyin,
            self.meanings.join("/")
        )
    }
}

/// Information parsed from `#!` header lines.
///
/// `entries` is the declared entry count; the format codec rejects any
/// document where it disagrees with the number of entry lines actually
/// parsed. `timestamp` comes from the strict-RFC3339 `date` key and is
/// `None` when the header carries no date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: i32,
    pub subversion: i32,
    pub format: String,
    pub charset: String,
    pub entries: usize,
    pub publisher: String,
    pub license: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(line: &str, want: Entry) {
        let e = Entry::unmarshal(line).unwrap();
        assert_eq!(e, want);
        assert_eq!(e.marshal(), line);
    }

    #[test]
    fn unmarshal_single_hanzi() {
        roundtrip(
            "中 中 [Zhong1] /China/Chinese/surname Zhong/",
            Entry {
                traditional: "中".into(),
                simplified: "中".into(),
                pinyin: "Zhong1".into(),
                meanings: vec!["China".into(), "Chinese".into(), "surname Zhong".into()],
            },
        );
    }

    #[test]
    fn unmarshal_multi_hanzi() {
        roundtrip(
            "中國人 中国人 [Zhong1 guo2 ren2] /Chinese person/",
            Entry {
                traditional: "中國人".into(),
                simplified: "中国人".into(),
                pinyin: "Zhong1 guo2 ren2".into(),
                meanings: vec!["Chinese person".into()],
            },
        );
    }

    #[test]
    fn unmarshal_meaning_with_brackets() {
        let e = Entry::unmarshal(
            "美國人 美国人 [Mei3 guo2 ren2] /American/American person/American people/CL:個|个[ge4]/",
        )
        .unwrap();
        assert_eq!(e.traditional, "美國人");
        assert_eq!(e.simplified, "美国人");
        assert_eq!(e.pinyin, "Mei3 guo2 ren2");
        assert_eq!(
            e.meanings,
            vec!["American", "American person", "American people", "CL:個|个[ge4]"]
        );
    }

    #[test]
    fn unmarshal_missing_bracket() {
        let err = Entry::unmarshal("% % [pa1 /percent (Tw)/").unwrap_err();
        assert!(matches!(err, DictError::Brackets(_)));
    }

    #[test]
    fn unmarshal_wrong_hanzi_count() {
        let err = Entry::unmarshal("中 [Zhong1] /China/").unwrap_err();
        assert!(matches!(err, DictError::HanziFields(_)));
        let err = Entry::unmarshal("a b c [p1] /x/").unwrap_err();
        assert!(matches!(err, DictError::HanziFields(_)));
    }
}
