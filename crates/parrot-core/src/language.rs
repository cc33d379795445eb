//! Target-language detection from hashtags in the mentioning post.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the responder can translate into, or `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageTag {
    Arabic,
    Chinese,
    French,
    German,
    Portuguese,
    Spanish,
    Unknown,
}

impl LanguageTag {
    /// Every recognized tag, in the order they are advertised to users.
    pub const SUPPORTED: [LanguageTag; 6] = [
        Self::Arabic,
        Self::Chinese,
        Self::French,
        Self::German,
        Self::Portuguese,
        Self::Spanish,
    ];

    /// The code used in hashtags and sent to the translation service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::Chinese => "zh",
            Self::French => "fr",
            Self::German => "de",
            Self::Portuguese => "pt",
            Self::Spanish => "es",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ar" => Ok(Self::Arabic),
            "zh" => Ok(Self::Chinese),
            "fr" => Ok(Self::French),
            "de" => Ok(Self::German),
            "pt" => Ok(Self::Portuguese),
            "es" => Ok(Self::Spanish),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unrecognized language code '{other}'")),
        }
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.code().to_string()
    }
}

/// Find the first recognized language token in `text`.
///
/// Tokens are split on single spaces after lower-casing, and every `#` is
/// stripped before comparing, so `#ES`, `es` and `#es` all match Spanish.
pub fn extract_language(text: &str) -> LanguageTag {
    extract_language_from(text, &LanguageTag::SUPPORTED)
}

/// Like [`extract_language`], restricted to the given allow-list.
pub fn extract_language_from(text: &str, allowed: &[LanguageTag]) -> LanguageTag {
    let lowered = text.to_lowercase();
    for word in lowered.split(' ') {
        let code = word.replace('#', "");
        if let Some(tag) = allowed.iter().find(|t| t.code() == code) {
            return *tag;
        }
    }
    LanguageTag::Unknown
}

/// Render tags as a hashtag list, e.g. `#ar, #zh, #fr`.
pub fn hashtag_list(tags: &[LanguageTag]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t.code()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_each_supported_code_with_hash() {
        for tag in LanguageTag::SUPPORTED {
            let text = format!("@bot please translate this #{}", tag.code());
            assert_eq!(extract_language(&text), tag);
        }
    }

    #[test]
    fn test_extract_each_supported_code_without_hash() {
        for tag in LanguageTag::SUPPORTED {
            let text = format!("translate {} now", tag.code());
            assert_eq!(extract_language(&text), tag);
        }
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        assert_eq!(extract_language("hello #ES"), LanguageTag::Spanish);
        assert_eq!(extract_language("hello #es"), LanguageTag::Spanish);
        assert_eq!(extract_language("hello #Fr"), LanguageTag::French);
    }

    #[test]
    fn test_extract_first_match_wins() {
        assert_eq!(extract_language("#de then #fr"), LanguageTag::German);
    }

    #[test]
    fn test_extract_unknown_when_absent() {
        assert_eq!(extract_language("@bot translate this"), LanguageTag::Unknown);
        assert_eq!(extract_language(""), LanguageTag::Unknown);
        assert_eq!(extract_language("#it #ja #ru"), LanguageTag::Unknown);
    }

    #[test]
    fn test_extract_requires_whole_token() {
        // "test" contains "es" but is not the token "es".
        assert_eq!(extract_language("this is a test"), LanguageTag::Unknown);
        assert_eq!(extract_language("#espanol"), LanguageTag::Unknown);
        // Trailing punctuation keeps the token from matching.
        assert_eq!(extract_language("in #es."), LanguageTag::Unknown);
    }

    #[test]
    fn test_extract_skips_empty_tokens() {
        assert_eq!(extract_language("hi    #pt"), LanguageTag::Portuguese);
    }

    #[test]
    fn test_extract_only_splits_on_spaces() {
        assert_eq!(extract_language("hi\n#pt"), LanguageTag::Unknown);
    }

    #[test]
    fn test_extract_strips_every_hash() {
        assert_eq!(extract_language("##zh"), LanguageTag::Chinese);
        assert_eq!(extract_language("a#r"), LanguageTag::Arabic);
    }

    #[test]
    fn test_extract_respects_allow_list() {
        let allowed = [LanguageTag::French];
        assert_eq!(
            extract_language_from("#es #fr", &allowed),
            LanguageTag::French
        );
        assert_eq!(extract_language_from("#es", &allowed), LanguageTag::Unknown);
    }

    #[test]
    fn test_code_round_trip_through_from_str() {
        for tag in LanguageTag::SUPPORTED {
            assert_eq!(tag.code().parse::<LanguageTag>().unwrap(), tag);
        }
        assert_eq!("unknown".parse::<LanguageTag>().unwrap(), LanguageTag::Unknown);
        assert!("it".parse::<LanguageTag>().is_err());
    }

    #[test]
    fn test_hashtag_list_default_order() {
        assert_eq!(
            hashtag_list(&LanguageTag::SUPPORTED),
            "#ar, #zh, #fr, #de, #pt, #es"
        );
    }
}
