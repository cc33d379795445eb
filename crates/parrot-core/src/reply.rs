//! Reply formatting: cleanup of translated text and splitting into posts.
//!
//! A formatted reply is always addressed to the requester (`@handle ...`)
//! and fits in at most two posts. Segments are kept in reading order;
//! [`ReplySegments::posting_order`] yields them newest-first so that,
//! threaded under the same parent, they read top to bottom.

use crate::language::LanguageTag;

/// Per-post character limit of the social network.
pub const MAX_POST_CHARS: usize = 280;

/// Punctuation that gets pulled back onto the preceding word.
const TIGHT_PUNCTUATION: [char; 4] = ['?', '.', '!', '"'];

/// One or two post-sized strings in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySegments(Vec<String>);

impl ReplySegments {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments joined by a single space, as stored in interaction records.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    /// Segments in the order they must be posted (last segment first).
    pub fn posting_order(&self) -> impl Iterator<Item = &str> {
        self.0.iter().rev().map(String::as_str)
    }
}

impl From<Vec<String>> for ReplySegments {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Formats translated text into reply segments for one bot account.
#[derive(Debug, Clone)]
pub struct ReplyFormatter {
    bot_handle: String,
}

impl ReplyFormatter {
    /// `bot_handle` is the bot's own account name, with or without `@`.
    pub fn new(bot_handle: &str) -> Self {
        Self {
            bot_handle: bot_handle.trim().trim_start_matches('@').to_string(),
        }
    }

    pub fn bot_handle(&self) -> &str {
        &self.bot_handle
    }

    /// Clean `text` and split it into posts addressed to `requester`.
    pub fn format(&self, text: &str, requester: &str) -> ReplySegments {
        let text = tighten_punctuation(text);
        let text = strip_mention(&text, &self.bot_handle);
        let text = normalize_tag_spacing(&text);
        let addressed = format!("@{requester} {text}");
        split_for_posts(addressed.trim_start(), requester)
    }
}

/// Remove whitespace directly before `? . ! "` when that punctuation ends a
/// word (is followed by whitespace or the end of the text).
pub fn tighten_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let run_end = chars[i..]
            .iter()
            .position(|c| !c.is_whitespace())
            .map_or(chars.len(), |offset| i + offset);

        let ends_word = run_end < chars.len()
            && TIGHT_PUNCTUATION.contains(&chars[run_end])
            && chars.get(run_end + 1).map_or(true, |c| c.is_whitespace());

        if !ends_word {
            out.extend(&chars[i..run_end]);
        }
        i = run_end;
    }

    out
}

/// Remove every `@handle` occurrence so the reply never re-triggers the bot.
pub fn strip_mention(text: &str, handle: &str) -> String {
    if handle.is_empty() {
        return text.to_string();
    }
    text.replace(&format!("@{handle}"), "")
}

/// Translation services tend to split hashtags (`# es`); join them back.
pub fn normalize_tag_spacing(text: &str) -> String {
    let mut out = text.to_string();
    for tag in LanguageTag::SUPPORTED {
        let code = tag.code();
        out = out.replace(&format!("# {code}"), &format!("#{code}"));
    }
    out
}

/// Apply the post length policy to an already addressed reply.
///
/// Over-long text is split at the last space at or before index
/// [`MAX_POST_CHARS`]; the second part is re-addressed to `requester`.
/// The space after a leading `@requester` never counts, so the first
/// segment always carries body text. With no usable space, the text is
/// cut hard at the limit.
pub fn split_for_posts(text: &str, requester: &str) -> ReplySegments {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= MAX_POST_CHARS {
        return ReplySegments(vec![text.to_string()]);
    }

    let address = format!("@{requester} ");
    let first_candidate = if text.starts_with(&address) {
        address.chars().count() + 1
    } else {
        1
    };

    let split_at = (first_candidate..=MAX_POST_CHARS)
        .rev()
        .find(|&i| chars[i] == ' ')
        .unwrap_or(MAX_POST_CHARS);

    let head: String = chars[..split_at].iter().collect();
    let tail: String = chars[split_at..].iter().collect();
    ReplySegments(vec![head, format!("@{requester} {tail}")])
}
