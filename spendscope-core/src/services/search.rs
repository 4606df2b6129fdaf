//! Keyword and phone-number search over descriptions and categories

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{SearchOutcome, TransactionRecord};

/// Russian mobile number: optional `+7`/`8`, then 3-3-2-2 digits with optional
/// space, dash or parenthesis separators
const PHONE_BODY: &str = r"(?:\+7|8)[\s\-]?\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{2}[\s\-]?\d{2}";

static ANCHORED_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:^|\s){PHONE_BODY}(?:$|\s)")).expect("phone pattern is valid")
});

static SUBSTRING_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_BODY).expect("phone pattern is valid"));

/// How strictly a phone number must be separated from surrounding text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneBoundary {
    /// Number bounded by start/end of text or whitespace on both sides;
    /// `899955577000` is rejected, `89995557700 пополнение` is accepted
    #[default]
    Anchored,
    /// Number may sit inside a longer digit run
    Substring,
}

impl PhoneBoundary {
    fn regex(&self) -> &'static Regex {
        match self {
            PhoneBoundary::Anchored => &ANCHORED_PHONE_RE,
            PhoneBoundary::Substring => &SUBSTRING_PHONE_RE,
        }
    }
}

/// Build the whole-word, case-insensitive matcher for a keyword
///
/// The keyword is taken literally; it must be bounded by start/end of text or
/// whitespace on both sides.
pub fn keyword_matcher(keyword: &str) -> Result<Regex> {
    let pattern = format!(r"(?:^|\s){}(?:$|\s)", regex::escape(keyword.trim()));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::validation(format!("Unusable search keyword: {e}")))
}

/// Records whose description or category contains `keyword` as a whole word
pub fn search_by_keyword(records: &[TransactionRecord], keyword: &str) -> Result<SearchOutcome> {
    if keyword.trim().is_empty() {
        return Ok(SearchOutcome::NotFound);
    }

    let matcher = keyword_matcher(keyword)?;
    let matches = records
        .iter()
        .filter(|r| matcher.is_match(r.description_text()) || matcher.is_match(r.category_text()))
        .cloned()
        .collect();

    Ok(SearchOutcome::from_matches(matches))
}

/// Records whose description contains a mobile phone number
pub fn search_by_phone(records: &[TransactionRecord], boundary: PhoneBoundary) -> SearchOutcome {
    let re = boundary.regex();
    let matches = records
        .iter()
        .filter(|r| re.is_match(r.description_text()))
        .cloned()
        .collect();

    SearchOutcome::from_matches(matches)
}
