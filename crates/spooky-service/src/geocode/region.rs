use icu::casemap::CaseMapper;
use icu::normalizer::DecomposingNormalizerBorrowed;

use spooky_core::constants::ALLOWED_REGION;
use spooky_geocode::PlaceAddress;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// ## Summary
/// Folds case and strips diacritics so "Nuevo León" and "NUEVO LEON" compare equal.
///
/// Uses ICU case folding, then NFD decomposition, then drops the combining
/// diacritical marks block.
#[must_use]
pub fn normalize_region_name(value: &str) -> String {
    let folded = CaseMapper::new().fold_string(value);
    let decomposed = DecomposingNormalizerBorrowed::new_nfd().normalize(&folded);

    decomposed
        .chars()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}

/// Whether any administrative field of `address` names the allowed region.
#[must_use]
pub fn is_in_allowed_region(address: &PlaceAddress) -> bool {
    address
        .region_fields()
        .into_iter()
        .flatten()
        .any(|field| normalize_region_name(field) == ALLOWED_REGION)
}
