//! The dictionary index and its lazy-population lifecycle.
//!
//! A [`Dict`] is constructed empty and populated exactly once, either
//! synchronously (parse a stream or file) or on a background thread (the
//! process-wide singleton downloads the canonical archive). Every read
//! blocks on a one-shot readiness signal: unset to set exactly once,
//! broadcast to all waiters, never reset. A failed population is sticky:
//! the captured error is returned to every blocked or future caller and the
//! instance never becomes readable.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex, OnceLock};
use std::time::{Duration, Instant};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use once_cell::sync::Lazy;
use tracing::{debug, error, info};

use crate::entry::{Entry, Metadata};
use crate::error::DictError;
use crate::format::Document;
use crate::fuzzy::levenshtein;
use crate::trie::Trie;
use crate::{tone, translit, CEDICT_URL, MAX_EDIT_DISTANCE, MAX_RESULTS};

static GLOBAL: Lazy<Arc<Dict>> = Lazy::new(|| Dict::background(Dict::fetch_document));

/// An in-memory CC-CEDICT dictionary index.
///
/// Entries keep their source order; only lookup results are sorted. Once
/// the readiness slot is set the data is immutable, so the fast path reads
/// it without taking any lock.
#[derive(Debug)]
pub struct Dict {
    slot: OnceLock<Result<Inner, DictError>>,
    done: Mutex<bool>,
    ready: Condvar,
}

#[derive(Debug)]
struct Inner {
    doc: Document,
    trie: Trie,
}

impl Inner {
    fn index(doc: Document) -> Inner {
        let mut trie = Trie::new();
        for (i, e) in doc.entries.iter().enumerate() {
            trie.insert(&e.traditional, i);
            trie.insert(&e.simplified, i);
        }
        Inner { doc, trie }
    }
}

impl Dict {
    fn empty() -> Dict {
        Dict {
            slot: OnceLock::new(),
            done: Mutex::new(false),
            ready: Condvar::new(),
        }
    }

    /// Parse a dictionary from a byte stream of CC-CEDICT text.
    /// Synchronous: the result is immediately ready or immediately failed.
    pub fn parse<R: Read>(r: R) -> Result<Dict, DictError> {
        let doc = Document::parse(r)?;
        Ok(Dict::from_document(doc))
    }

    /// Load a dictionary from a file, transparently decompressing when the
    /// filename ends in `.gz`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dict, DictError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if has_gz_extension(path) {
            Dict::parse(GzDecoder::new(file))
        } else {
            Dict::parse(file)
        }
    }

    /// Download the latest CC-CEDICT archive and parse it, synchronously.
    pub fn fetch() -> Result<Dict, DictError> {
        Ok(Dict::from_document(Dict::fetch_document()?))
    }

    /// The process-wide singleton. Returns the shared handle immediately;
    /// the first call kicks off download and parse of the canonical archive
    /// on a background thread. Reads on the handle block until population
    /// completes.
    pub fn global() -> Arc<Dict> {
        GLOBAL.clone()
    }

    /// Construct a dictionary whose population runs `loader` on its own
    /// thread. The handle is returned immediately; all reads block until
    /// the loader fulfills the readiness signal, once, success or failure.
    pub fn background<F>(loader: F) -> Arc<Dict>
    where
        F: FnOnce() -> Result<Document, DictError> + Send + 'static,
    {
        let dict = Arc::new(Dict::empty());
        let handle = Arc::clone(&dict);
        std::thread::spawn(move || {
            let result = loader().map(Inner::index);
            handle.fulfill(result);
        });
        dict
    }

    fn from_document(doc: Document) -> Dict {
        let dict = Dict::empty();
        dict.fulfill(Ok(Inner::index(doc)));
        dict
    }

    fn fetch_document() -> Result<Document, DictError> {
        debug!(url = CEDICT_URL, "downloading dictionary archive");
        let resp =
            reqwest::blocking::get(CEDICT_URL).map_err(|e| DictError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DictError::Fetch(format!("bad status: {status}")));
        }
        Document::parse(GzDecoder::new(resp))
    }

    /// Set the readiness slot and release every waiter. Called exactly once
    /// per instance.
    fn fulfill(&self, result: Result<Inner, DictError>) {
        match &result {
            Ok(inner) => info!(entries = inner.doc.entries.len(), "dictionary ready"),
            Err(err) => error!(%err, "dictionary population failed"),
        }
        let _ = self.slot.set(result);
        let mut done = self.done.lock().unwrap_or_else(|e| e.into_inner());
        *done = true;
        self.ready.notify_all();
    }

    /// Block until the readiness signal fires, then hand out the data or a
    /// clone of the sticky population error.
    fn inner(&self) -> Result<&Inner, DictError> {
        if self.slot.get().is_none() {
            let mut done = self.done.lock().unwrap_or_else(|e| e.into_inner());
            while !*done {
                done = self.ready.wait(done).unwrap_or_else(|e| e.into_inner());
            }
        }
        match self.slot.get() {
            Some(Ok(inner)) => Ok(inner),
            Some(Err(err)) => Err(err.clone()),
            None => Err(DictError::Io("readiness signalled without a result".into())),
        }
    }

    /// Block until population completes. `Ok` means the dictionary is
    /// readable; `Err` reports the sticky population failure.
    pub fn ready(&self) -> Result<(), DictError> {
        self.inner().map(|_| ())
    }

    /// Bounded wait on readiness. `None` means "not yet ready", which is
    /// distinct from a reported population failure; there is no way to
    /// cancel the population itself.
    pub fn ready_timeout(&self, timeout: Duration) -> Option<Result<(), DictError>> {
        if self.slot.get().is_none() {
            let deadline = Instant::now() + timeout;
            let mut done = self.done.lock().unwrap_or_else(|e| e.into_inner());
            while !*done {
                let now = Instant::now();
                if now >= deadline {
                    return None;
                }
                let (guard, _) = self
                    .ready
                    .wait_timeout(done, deadline - now)
                    .unwrap_or_else(|e| e.into_inner());
                done = guard;
            }
        }
        Some(self.ready())
    }

    /// Metadata parsed from the header comments. Blocks until ready.
    pub fn metadata(&self) -> Result<&Metadata, DictError> {
        Ok(&self.inner()?.doc.metadata)
    }

    /// The conventional CC-CEDICT archive filename for this dictionary's
    /// metadata, e.g. `cedict_1_0_ts_utf-8_mdbg.txt.gz`.
    pub fn default_filename(&self) -> Result<String, DictError> {
        let md = self.metadata()?;
        Ok(format!(
            "cedict_{}_{}_{}_{}_{}.txt.gz",
            md.version,
            md.subversion,
            md.format.to_lowercase(),
            md.charset.to_lowercase(),
            md.publisher.to_lowercase()
        ))
    }

    /// Serialize the dictionary to a file, byte-identical to a well-formed
    /// source. Compresses when the filename ends in `.gz`. Blocks until
    /// ready.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DictError> {
        let inner = self.inner()?;
        let path = path.as_ref();
        let file = File::create(path)?;
        if has_gz_extension(path) {
            let mut w = GzEncoder::new(BufWriter::new(file), Compression::default());
            inner.doc.write(&mut w)?;
            w.finish()?.flush()?;
        } else {
            let mut w = BufWriter::new(file);
            inner.doc.write(&mut w)?;
            w.flush()?;
        }
        Ok(())
    }

    /// First entry whose traditional or simplified form equals the trimmed
    /// query, or `None`. Absence is not an error.
    pub fn entry_by_hanzi(&self, hanzi: &str) -> Result<Option<&Entry>, DictError> {
        let q = hanzi.trim();
        Ok(self
            .inner()?
            .doc
            .entries
            .iter()
            .find(|e| e.traditional == q || e.simplified == q))
    }

    /// Every entry whose traditional or simplified form equals the trimmed
    /// query, in source order.
    pub fn entries_by_hanzi(&self, hanzi: &str) -> Result<Vec<&Entry>, DictError> {
        let q = hanzi.trim();
        Ok(self
            .inner()?
            .doc
            .entries
            .iter()
            .filter(|e| e.traditional == q || e.simplified == q)
            .collect())
    }

    /// Entries matching the given pinyin, in any tone notation.
    ///
    /// The query is normalized to numbered notation, lowercased and
    /// space-stripped. A query with no tone digit is plaintext and matches
    /// every tone variant; a query carrying a digit must match exactly, so
    /// an out-of-range digit yields no results. Results sort ascending by
    /// the raw stored pinyin, ties keeping source order.
    pub fn entries_by_pinyin(&self, pinyin: &str) -> Result<Vec<&Entry>, DictError> {
        let inner = self.inner()?;

        let q = tone::to_numbers(pinyin);
        let plaintext = !q.chars().any(|c| ('1'..='5').contains(&c));
        let q = q.to_lowercase().replace(' ', "");

        let mut results: Vec<&Entry> = inner
            .doc
            .entries
            .iter()
            .filter(|e| {
                let p = e.pinyin.to_lowercase().replace(' ', "");
                if plaintext {
                    tone::strip_digits(&p) == q
                } else {
                    p == q
                }
            })
            .collect();

        results.sort_by(|a, b| a.pinyin.cmp(&b.pinyin));
        Ok(results)
    }

    /// Entries whose meaning matches the query, ranked by edit distance.
    ///
    /// An entry qualifies when one of its meanings, lowercased, is a
    /// contiguous substring of the lowercased query. Only the first such
    /// meaning is ranked; a distance beyond [`MAX_EDIT_DISTANCE`] discards
    /// the entry. Each entry contributes at most one match. Results sort
    /// ascending by distance, stable on discovery order, truncated to
    /// [`MAX_RESULTS`].
    pub fn entries_by_meaning(&self, meaning: &str) -> Result<Vec<&Entry>, DictError> {
        let inner = self.inner()?;
        let q = meaning.to_lowercase();

        let mut matches: Vec<(&Entry, usize)> = Vec::new();
        for e in &inner.doc.entries {
            let found = e
                .meanings
                .iter()
                .map(|m| m.to_lowercase())
                .find(|m| q.contains(m.as_str()));
            if let Some(m) = found {
                let distance = levenshtein(&q, &m);
                if distance <= MAX_EDIT_DISTANCE {
                    matches.push((e, distance));
                }
            }
        }

        matches.sort_by_key(|(_, distance)| *distance);
        matches.truncate(MAX_RESULTS);
        Ok(matches.into_iter().map(|(e, _)| e).collect())
    }

    /// Transliterate hanzi to numbered-tone pinyin by greedy longest-match
    /// segmentation. Unmatched characters pass through verbatim.
    pub fn hanzi_to_pinyin(&self, s: &str) -> Result<String, DictError> {
        let inner = self.inner()?;
        Ok(translit::hanzi_to_pinyin(&inner.doc.entries, &inner.trie, s))
    }

    /// Caller-facing transliteration: segmentation output rendered with
    /// diacritic tones and natural punctuation spacing.
    pub fn transliterate(&self, s: &str) -> Result<String, DictError> {
        let numbered = self.hanzi_to_pinyin(s)?;
        Ok(translit::fix_symbol_spaces(&tone::to_diacritics(&numbered)))
    }
}

fn has_gz_extension(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}
