//! cedict
//!
//! A CC-CEDICT Chinese-English dictionary engine: parses the CC-CEDICT
//! text format, builds an in-memory index, and answers lookups by hanzi,
//! pinyin and English meaning. Also transliterates hanzi to pinyin by
//! greedy longest-match segmentation and converts pinyin between
//! numbered-tone and diacritic-tone notation.
//!
//! Format reference: <https://cc-cedict.org/wiki/format:syntax>
//!
//! Public API:
//! - [`Dict`] - the dictionary index, lookups and lazy-population lifecycle
//! - [`Entry`] / [`Metadata`] / [`Document`] - parsed data model
//! - [`tone`] - numbered/diacritic tone conversion
//! - [`translit`] - Han classification, symbol mapping, spacing cleanup
//! - [`fuzzy`] - Levenshtein distance used by meaning search
//! - [`DictError`] - attributable parse and population errors
//!
//! ```no_run
//! use cedict::Dict;
//!
//! // Shared handle, populated by a background download; reads block
//! // until the dictionary is ready.
//! let dict = Dict::global();
//! if let Some(entry) = dict.entry_by_hanzi("中文")? {
//!     println!("{}", entry.marshal());
//! }
//! println!("{}", dict.transliterate("我的大王！")?);
//! # Ok::<(), cedict::DictError>(())
//! ```

pub mod config;
pub mod dict;
pub mod entry;
pub mod error;
pub mod format;
pub mod fuzzy;
pub mod tone;
pub mod translit;

mod trie;

pub use config::Config;
pub use dict::Dict;
pub use entry::{Entry, Metadata};
pub use error::DictError;
pub use format::Document;

/// URL of the latest CC-CEDICT data in gzip archive format.
pub const CEDICT_URL: &str =
    "https://www.mdbg.net/chinese/export/cedict/cedict_1_0_ts_utf-8_mdbg.txt.gz";

/// Line terminator of the source format, used between lines on save to
/// match the original content byte for byte.
pub const LINE_ENDING: &str = "\r\n";

/// Most entries returned by any lookup.
pub const MAX_RESULTS: usize = 50;

/// Largest Levenshtein distance allowed for meaning matches.
pub const MAX_EDIT_DISTANCE: usize = 10;
