use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use shared::Vote;

#[cw_serde]
pub struct Config {
    /// Creator of the wallet, the only one allowed to add signers
    pub admin: Addr,
    /// Display label
    pub name: String,
    /// YES votes required to execute a transaction
    pub quorum: u64,
    /// Native denomination held and sent by this wallet
    pub denom: String,
}

#[cw_serde]
pub struct Signer {
    pub name: String,
    pub address: Addr,
}

#[cw_serde]
pub struct Transaction {
    pub id: u64,
    pub proposer: Addr,
    pub recipient: Addr,
    pub amount: Uint128,
    pub executed: bool,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub created_at: u64,
    pub executed_at: Option<u64>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Ordered signer roster
pub const SIGNERS: Item<Vec<Signer>> = Item::new("signers");

/// Id of the most recently created transaction (0 before the first one)
pub const TX_COUNT: Item<u64> = Item::new("tx_count");

/// Transactions indexed by ID
pub const TRANSACTIONS: Map<u64, Transaction> = Map::new("transactions");

/// Ballots by (transaction, voter); presence means the voter has voted
pub const VOTES: Map<(u64, &Addr), Vote> = Map::new("votes");

pub fn is_signer(signers: &[Signer], addr: &Addr) -> bool {
    signers.iter().any(|s| s.address == *addr)
}
