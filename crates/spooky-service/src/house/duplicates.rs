use std::collections::BTreeMap;

use spooky_db::model::house::AddressIndexEntry;
use spooky_db::store::HouseStore;

use crate::error::ServiceResult;

/// An address text held by more than one house.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateAddressGroup {
    pub address_text: String,
    pub houses: Vec<AddressIndexEntry>,
}

/// ## Summary
/// Groups index entries by address text and keeps the groups with more than one house.
///
/// Groups come out sorted by address text; houses keep their input order.
#[must_use]
pub fn group_duplicates(entries: Vec<AddressIndexEntry>) -> Vec<DuplicateAddressGroup> {
    let mut by_text: BTreeMap<String, Vec<AddressIndexEntry>> = BTreeMap::new();
    for entry in entries {
        by_text
            .entry(entry.address_text.clone())
            .or_default()
            .push(entry);
    }

    by_text
        .into_iter()
        .filter(|(_, houses)| houses.len() > 1)
        .map(|(address_text, houses)| DuplicateAddressGroup {
            address_text,
            houses,
        })
        .collect()
}

/// ## Summary
/// Audits stored houses for address texts that are not unique.
///
/// ## Errors
/// Returns an error if the address index cannot be read.
#[tracing::instrument(skip(store))]
pub async fn find_duplicate_addresses<S: HouseStore + ?Sized>(
    store: &S,
) -> ServiceResult<Vec<DuplicateAddressGroup>> {
    let entries = store.address_index().await?;
    tracing::debug!(houses = entries.len(), "Loaded address index");
    Ok(group_duplicates(entries))
}
