//! Doc-comment extraction
//!
//! Turns the raw text of a `/** ... */` block into a [`DocComment`]. The
//! grammar is word-oriented: the text is split on whitespace and `*`, and an
//! `@tag` word switches the bucket that subsequent words accumulate into.

use crate::core::types::{DocComment, DocTagKind, DocTagValue};
use crate::error::AnalyzeError;
use std::collections::BTreeMap;
use std::path::Path;

/// Bucket currently receiving words.
enum Bucket {
    Description,
    Tag(DocTagKind),
    /// A `params`/`throws` tag was just opened; the next word is its key.
    PendingKey(DocTagKind),
    Entry(DocTagKind, String),
}

/// Parses one documentation comment. `file` and `line` locate the comment
/// for error reporting; an unrecognized tag is fatal.
pub fn parse_doc_comment(
    raw: &str,
    file: &Path,
    line: usize,
) -> Result<DocComment, AnalyzeError> {
    let body = raw.trim();
    let body = body.strip_suffix("*/").unwrap_or(body);
    let body = body
        .strip_prefix("/**")
        .or_else(|| body.strip_prefix("/*"))
        .unwrap_or(body);

    let mut doc = DocComment::default();
    let mut bucket = Bucket::Description;

    let words = body
        .split(|c: char| c.is_whitespace() || c == '*')
        .filter(|w| !w.is_empty());

    for word in words {
        if let Some(tag) = word.strip_prefix('@') {
            let kind =
                DocTagKind::parse(tag).ok_or_else(|| AnalyzeError::UnknownDocTag {
                    tag: tag.to_string(),
                    file: file.to_path_buf(),
                    line,
                })?;
            bucket = if kind.takes_key() {
                Bucket::PendingKey(kind)
            } else {
                // Open the bucket even if no words follow, so bare tags like
                // @deprecated still appear in the tag map.
                doc.tags
                    .entry(kind)
                    .or_insert_with(|| DocTagValue::Text(String::new()));
                Bucket::Tag(kind)
            };
            continue;
        }

        match &bucket {
            Bucket::Description => append_word(&mut doc.description, word),
            Bucket::Tag(kind) => {
                if let Some(DocTagValue::Text(text)) = doc.tags.get_mut(kind) {
                    append_word(text, word);
                }
            }
            Bucket::PendingKey(kind) => {
                let kind = *kind;
                entries(&mut doc, kind).entry(word.to_string()).or_default();
                bucket = Bucket::Entry(kind, word.to_string());
            }
            Bucket::Entry(kind, key) => {
                let (kind, key) = (*kind, key.clone());
                if let Some(text) = entries(&mut doc, kind).get_mut(&key) {
                    append_word(text, word);
                }
            }
        }
    }

    Ok(doc)
}

fn entries(doc: &mut DocComment, kind: DocTagKind) -> &mut BTreeMap<String, String> {
    let value = doc
        .tags
        .entry(kind)
        .or_insert_with(|| DocTagValue::Entries(BTreeMap::new()));
    if !matches!(value, DocTagValue::Entries(_)) {
        *value = DocTagValue::Entries(BTreeMap::new());
    }
    match value {
        DocTagValue::Entries(map) => map,
        DocTagValue::Text(_) => unreachable!("entry bucket replaced above"),
    }
}

fn append_word(text: &mut String, word: &str) {
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(word);
}
