use regex_lite::Regex;

use crate::error::{ServiceError, ServiceResult};

/// 1-5 digits, optionally followed by a single letter (`123`, `45B`).
const HOUSE_NUMBER_PATTERN: &str = r"\b(\d{1,5})([A-Za-z]?)(?:\b|$)";

/// A house number found inside free-text search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseNumberToken {
    /// The matched token, digits plus optional letter.
    pub number: String,
    /// The query with the token removed and whitespace collapsed.
    pub rest: String,
}

impl HouseNumberToken {
    /// Word-order variations tried when the provider misses the number, in priority order.
    #[must_use]
    pub fn variations(&self) -> [String; 4] {
        let Self { number, rest } = self;
        [
            format!("{number} {rest}"),
            format!("{rest} {number}"),
            format!("{rest} #{number}"),
            format!("{rest} No {number}"),
        ]
    }
}

/// ## Summary
/// Finds the leftmost house-number token in `query`.
///
/// ## Errors
/// Returns an error if the pattern fails to compile.
pub fn find_house_number(query: &str) -> ServiceResult<Option<HouseNumberToken>> {
    let pattern = Regex::new(HOUSE_NUMBER_PATTERN)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("house number pattern: {e}")))?;

    let Some(found) = pattern.find(query) else {
        return Ok(None);
    };

    let remainder = format!("{} {}", &query[..found.start()], &query[found.end()..]);
    let rest = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

    Ok(Some(HouseNumberToken {
        number: found.as_str().to_string(),
        rest,
    }))
}
