//! Case-insensitive address index over a loaded [`ProofTable`].

use crate::types::{ProofTable, WalletEntry};
use std::collections::HashMap;

/// Normalize an address for comparison.
///
/// Folds each character on its own, with no word-final rules, so that every
/// case variant of a character maps to the same representative. Characters
/// whose case mapping expands to several characters are left alone.
pub(crate) fn normalize(address: &str) -> String {
    address.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let upper = single_char(c.to_uppercase()).unwrap_or(c);
    single_char(upper.to_lowercase()).unwrap_or(upper)
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Read-only lookup structure built once from a [`ProofTable`].
///
/// Maps each normalized address to the position of its first occurrence, so
/// lookups agree with an in-order scan even when the file has duplicates.
#[derive(Debug, Clone)]
pub struct ProofIndex {
    table: ProofTable,
    by_address: HashMap<String, usize>,
}

impl ProofIndex {
    /// Build the index.
    #[must_use]
    pub fn new(table: ProofTable) -> Self {
        let mut by_address = HashMap::with_capacity(table.wallets.len());
        for (position, wallet) in table.wallets.iter().enumerate() {
            by_address
                .entry(normalize(&wallet.address))
                .or_insert(position);
        }

        Self { table, by_address }
    }

    /// Look up the first entry matching `address`, ignoring case.
    #[must_use]
    pub fn lookup(&self, address: &str) -> Option<&WalletEntry> {
        self.by_address
            .get(&normalize(address))
            .map(|&position| &self.table.wallets[position])
    }

    /// Root hash of the underlying table
    #[must_use]
    pub fn root_hash(&self) -> &str {
        &self.table.root_hash
    }

    /// Number of wallet entries, duplicates included
    #[must_use]
    pub fn wallet_count(&self) -> usize {
        self.table.wallets.len()
    }

    /// Number of distinct addresses after normalization
    #[must_use]
    pub fn address_count(&self) -> usize {
        self.by_address.len()
    }

    /// Entries shadowed by an earlier entry with the same address
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.wallet_count() - self.address_count()
    }
}
