use std::{collections::HashMap, fmt};

use alloy_primitives::Address;
use serde::Serialize;

use crate::{ScanError, TransferRecord};

/// How many transfers an address took part in, as sender or receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressMetric {
    pub address: Address,
    pub count: u64,
}

impl fmt::Display for AddressMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "address {} used ERC20 {} times", self.address, self.count)
    }
}

/// Counts, per address, the transfers it appears in.
///
/// A self-transfer counts twice for its address.
pub fn tally<'a, I>(records: I) -> HashMap<Address, u64>
where
    I: IntoIterator<Item = &'a TransferRecord>,
{
    let mut counts = HashMap::<Address, u64>::new();

    for record in records {
        *counts.entry(record.from).or_default() += 1;
        *counts.entry(record.to).or_default() += 1;
    }

    counts
}

/// Orders the tallied addresses by descending count, without the zero address.
///
/// Equal counts are ordered by address.
pub fn rank(counts: HashMap<Address, u64>) -> Result<Vec<AddressMetric>, ScanError> {
    if counts.is_empty() {
        return Err(ScanError::NoTransfers);
    }

    let mut ranked = counts
        .into_iter()
        .filter(|(address, _)| *address != Address::ZERO)
        .map(|(address, count)| AddressMetric { address, count })
        .collect::<Vec<_>>();

    if ranked.is_empty() {
        return Err(ScanError::NoTransfers);
    }

    ranked.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.address.cmp(&b.address)));

    Ok(ranked)
}
