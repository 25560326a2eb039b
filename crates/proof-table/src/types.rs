//! Proof Table Types
//!
//! Defines the JSON document layout produced by the offline tree builder.
//! Decoding is lenient: keys match case-insensitively, unknown keys are
//! ignored, and missing or `null` values take their empty value.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet address paired with its Merkle proof
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletEntry {
    /// Wallet address as written in the data file
    pub address: String,
    /// Sibling hashes from leaf to root
    pub proof: Vec<String>,
}

/// Root hash plus every wallet's proof
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofTable {
    /// Root of the Merkle tree the proofs verify against
    pub root_hash: String,
    /// Wallet entries in file order
    pub wallets: Vec<WalletEntry>,
}

impl ProofTable {
    /// Find the first entry whose address matches case-insensitively.
    ///
    /// Linear scan in file order. [`crate::ProofIndex`] answers the same
    /// question in constant time.
    #[must_use]
    pub fn find(&self, address: &str) -> Option<&WalletEntry> {
        let needle = crate::index::normalize(address);
        self.wallets
            .iter()
            .find(|wallet| crate::index::normalize(&wallet.address) == needle)
    }
}

/// A value where `null` decodes to `T::default()`
struct Nullable<T>(T);

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(Option::<T>::deserialize(deserializer)?.unwrap_or_default()))
    }
}

/// Decode a list, tolerating `null` both for the list and for its items
fn nullable_list<'de, A, T>(map: &mut A) -> Result<Vec<T>, A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de> + Default,
{
    let Nullable(items) = map.next_value::<Nullable<Vec<Nullable<T>>>>()?;
    Ok(items.into_iter().map(|Nullable(item)| item).collect())
}

impl<'de> Deserialize<'de> for WalletEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WalletVisitor;

        impl<'de> Visitor<'de> for WalletVisitor {
            type Value = WalletEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a wallet object")
            }

            fn visit_unit<E: de::Error>(self) -> Result<WalletEntry, E> {
                Ok(WalletEntry::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<WalletEntry, A::Error> {
                let mut wallet = WalletEntry::default();
                // Later keys overwrite earlier ones
                while let Some(key) = map.next_key::<String>()? {
                    match key.to_ascii_lowercase().as_str() {
                        "address" => wallet.address = map.next_value::<Nullable<String>>()?.0,
                        "proof" => wallet.proof = nullable_list(&mut map)?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(wallet)
            }
        }

        deserializer.deserialize_any(WalletVisitor)
    }
}

impl<'de> Deserialize<'de> for ProofTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ProofTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a proof table object")
            }

            fn visit_unit<E: de::Error>(self) -> Result<ProofTable, E> {
                Ok(ProofTable::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ProofTable, A::Error> {
                let mut table = ProofTable::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.to_ascii_lowercase().as_str() {
                        "roothash" => table.root_hash = map.next_value::<Nullable<String>>()?.0,
                        "wallets" => table.wallets = nullable_list(&mut map)?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_any(TableVisitor)
    }
}
