use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use shared::WalletInfo;

#[cw_serde]
pub struct Config {
    /// Code id of the multisig account contract
    pub account_code_id: u64,
    /// Denomination every created wallet holds
    pub denom: String,
}

/// Creation awaiting the account instantiate reply
#[cw_serde]
pub struct PendingWallet {
    pub creator: Addr,
    pub name: String,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const PENDING_WALLET: Item<PendingWallet> = Item::new("pending_wallet");

/// Number of wallets created through the directory
pub const WALLET_COUNT: Item<u64> = Item::new("wallet_count");

/// All wallets in creation order
pub const GLOBAL_WALLETS: Map<u64, WalletInfo> = Map::new("global_wallets");

/// Number of wallets created by each owner
pub const OWNER_WALLET_COUNT: Map<&Addr, u32> = Map::new("owner_wallet_count");

/// Wallets by (creator, per-creator index)
pub const OWNER_WALLETS: Map<(&Addr, u32), WalletInfo> = Map::new("owner_wallets");
