// Shared types and helpers for the multisig account and wallet directory contracts

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use std::collections::HashSet;

/// Signer as supplied by callers, before address validation
#[cw_serde]
pub struct SignerInput {
    pub name: String,
    pub address: String,
}

/// Directory entry for a created wallet
#[cw_serde]
pub struct WalletInfo {
    pub name: String,
    pub address: Addr,
}

#[cw_serde]
pub enum Vote {
    Yes,
    No,
}

// Common helper functions

/// True if two signers share an address
pub fn has_duplicate_addresses(signers: &[SignerInput]) -> bool {
    let mut seen = HashSet::with_capacity(signers.len());
    signers.iter().any(|s| !seen.insert(s.address.as_str()))
}
