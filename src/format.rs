//! Whole-document codec for the CC-CEDICT text format.
//!
//! A document is a block of `#` comment lines (kept verbatim so a saved
//! file round-trips byte-for-byte), zero or more of which are `#! key=value`
//! metadata lines, followed by one entry per line. Lines in the source
//! format are separated by CRLF with no terminator after the final entry.

use std::io::{BufRead, BufReader, Read, Write};

use crate::entry::{Entry, Metadata};
use crate::error::DictError;
use crate::LINE_ENDING;

/// A parsed dictionary document: verbatim header, metadata and entries in
/// source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub header: Vec<String>,
    pub metadata: Metadata,
    pub entries: Vec<Entry>,
}

impl Document {
    /// Parse a document from a byte stream of dictionary text.
    ///
    /// Fatal on the first malformed metadata value or entry line; a
    /// declared entry count that disagrees with the parsed count is also
    /// fatal, so a partial dictionary is never returned.
    pub fn parse<R: Read>(r: R) -> Result<Document, DictError> {
        let mut doc = Document::default();

        for line in BufReader::new(r).lines() {
            let line = line?;

            if let Some(rest) = line.strip_prefix('#') {
                if rest.starts_with('!') {
                    doc.parse_metadata(&line)?;
                }
                doc.header.push(line);
                continue;
            }

            doc.entries.push(Entry::unmarshal(&line)?);
        }

        if doc.entries.len() != doc.metadata.entries {
            return Err(DictError::EntryCount {
                loaded: doc.entries.len(),
                declared: doc.metadata.entries,
            });
        }

        Ok(doc)
    }

    /// Parse one `#! key=value` line into the metadata fields.
    ///
    /// The key starts at the fixed `#! ` offset. Unrecognized keys are
    /// ignored here; the raw line is still retained in the header. A line
    /// without `=` carries no metadata at all.
    fn parse_metadata(&mut self, line: &str) -> Result<(), DictError> {
        let eq = match line.find('=') {
            Some(i) if i >= 3 => i,
            _ => return Ok(()),
        };
        let value = &line[eq + 1..];

        // A key containing multi-byte characters cannot start at the ASCII
        // `#! ` offset; treat it as unrecognized rather than slicing into
        // the middle of a character.
        let key = match line.get(3..eq) {
            Some(key) => key,
            None => return Ok(()),
        };

        match key {
            "version" => {
                self.metadata.version = value
                    .parse()
                    .map_err(|_| DictError::Version(value.to_string()))?;
            }
            "subversion" => {
                self.metadata.subversion = value
                    .parse()
                    .map_err(|_| DictError::Subversion(value.to_string()))?;
            }
            "entries" => {
                self.metadata.entries = value
                    .parse()
                    .map_err(|_| DictError::Entries(value.to_string()))?;
            }
            "format" => self.metadata.format = value.to_string(),
            "charset" => self.metadata.charset = value.to_string(),
            "publisher" => self.metadata.publisher = value.to_string(),
            "license" => self.metadata.license = value.to_string(),
            "date" => {
                let t = chrono::DateTime::parse_from_rfc3339(value)
                    .map_err(|_| DictError::Date(value.to_string()))?;
                self.metadata.timestamp = Some(t);
            }
            _ => {}
        }
        Ok(())
    }

    /// Serialize the document back into dictionary text.
    ///
    /// The syntactic inverse of [`Document::parse`]: header lines verbatim,
    /// then one formatted entry per line, CRLF-separated, no trailing
    /// terminator.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), DictError> {
        for (i, line) in self.header.iter().enumerate() {
            if i != 0 {
                w.write_all(LINE_ENDING.as_bytes())?;
            }
            w.write_all(line.as_bytes())?;
        }
        for entry in &self.entries {
            w.write_all(LINE_ENDING.as_bytes())?;
            w.write_all(entry.marshal().as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# CC-CEDICT\r\n\
        # Community maintained free Chinese-English dictionary.\r\n\
        #! version=123\r\n\
        #! subversion=456\r\n\
        #! format=ts\r\n\
        #! charset=UTF-8\r\n\
        #! entries=2\r\n\
        #! publisher=MDBG\r\n\
        #! license=https://creativecommons.org/licenses/by-sa/4.0/\r\n\
        #! date=2020-02-14T06:15:46Z\r\n\
        中文 中文 [Zhong1 wen2] /Chinese language/\r\n\
        中 中 [Zhong1] /China/Chinese/surname Zhong/";

    #[test]
    fn parse_header_metadata() {
        let doc = Document::parse(SAMPLE.as_bytes()).unwrap();
        let md = &doc.metadata;
        assert_eq!(md.version, 123);
        assert_eq!(md.subversion, 456);
        assert_eq!(md.format, "ts");
        assert_eq!(md.charset, "UTF-8");
        assert_eq!(md.entries, 2);
        assert_eq!(md.publisher, "MDBG");
        assert_eq!(md.license, "https://creativecommons.org/licenses/by-sa/4.0/");
        let ts = md.timestamp.unwrap();
        assert_eq!(ts.to_rfc3339(), "2020-02-14T06:15:46+00:00");
        assert_eq!(ts.timestamp(), 1581660946);
        assert_eq!(doc.header.len(), 10);
        assert_eq!(doc.entries.len(), 2);
    }

    #[test]
    fn roundtrip_is_byte_identical() {
        let doc = Document::parse(SAMPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        doc.write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), SAMPLE);
    }

    #[test]
    fn invalid_metadata_is_fatal() {
        let cases: &[(&str, fn(&DictError) -> bool)] = &[
            ("#! version=\n", |e| matches!(e, DictError::Version(_))),
            ("#! subversion=abc\n", |e| {
                matches!(e, DictError::Subversion(_))
            }),
            ("#! entries=a1 \n", |e| matches!(e, DictError::Entries(_))),
            ("#! date=2020-0214T06:15:46Z\n", |e| {
                matches!(e, DictError::Date(_))
            }),
            ("#! entries=1\n", |e| {
                matches!(
                    e,
                    DictError::EntryCount {
                        loaded: 0,
                        declared: 1
                    }
                )
            }),
            ("% % [pa1 /percent (Tw)/\n", |e| {
                matches!(e, DictError::Brackets(_))
            }),
        ];
        for (text, want) in cases {
            let err = Document::parse(text.as_bytes()).unwrap_err();
            assert!(want(&err), "{text:?} gave {err}");
        }
    }

    #[test]
    fn unknown_metadata_key_is_retained_but_ignored() {
        let text = "#! flavour=salty\r\n#! entries=0";
        let doc = Document::parse(text.as_bytes()).unwrap();
        assert_eq!(doc.header[0], "#! flavour=salty");
        assert_eq!(doc.metadata, Metadata { entries: 0, ..Default::default() });
    }

    #[test]
    fn multibyte_metadata_key_is_retained_but_ignored() {
        let text = "#!中=x\r\n#! entries=0";
        let doc = Document::parse(text.as_bytes()).unwrap();
        assert_eq!(doc.header[0], "#!中=x");
        assert_eq!(doc.metadata, Metadata { entries: 0, ..Default::default() });
    }

    #[test]
    fn entry_count_must_match_declared() {
        let text = "#! entries=3\r\n中 中 [Zhong1] /China/";
        let err = Document::parse(text.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            DictError::EntryCount {
                loaded: 1,
                declared: 3
            }
        );
    }
}
