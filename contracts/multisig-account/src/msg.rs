use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};
use shared::{SignerInput, Vote};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub quorum: u64,
    pub signers: Vec<SignerInput>,
    /// Wallet admin, defaults to the instantiating sender
    pub admin: Option<String>,
    pub denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Propose a transfer out of the wallet (signers only)
    NewTransaction { recipient: String, amount: Uint128 },
    /// Vote on a pending transaction, executing it once quorum is reached
    SignAndExecuteTransaction { tx_id: u64, vote: Vote },
    /// Add a signer to the roster (admin only)
    AddSigner { name: String, address: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get wallet configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Get signer roster
    #[returns(SignersResponse)]
    Signers {},

    /// Get transaction by ID
    #[returns(TransactionResponse)]
    Transaction { tx_id: u64 },

    /// List transactions in id order
    #[returns(TransactionsResponse)]
    Transactions {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Get current transaction counter
    #[returns(TxIdResponse)]
    TxId {},

    /// Get wallet balance in its denomination
    #[returns(BalanceResponse)]
    Balance {},

    /// Get the ballot a voter cast on a transaction
    #[returns(VoteResponse)]
    Vote { tx_id: u64, voter: String },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub name: String,
    pub quorum: u64,
    pub denom: String,
}

#[cw_serde]
pub struct SignerInfo {
    pub name: String,
    pub address: Addr,
}

#[cw_serde]
pub struct SignersResponse {
    pub signers: Vec<SignerInfo>,
    pub count: u64,
}

#[cw_serde]
pub struct VoteInfo {
    pub voter: Addr,
    pub vote: Vote,
}

#[cw_serde]
pub struct TransactionResponse {
    pub id: u64,
    pub proposer: Addr,
    pub recipient: Addr,
    pub amount: Uint128,
    pub executed: bool,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub votes: Vec<VoteInfo>,
    pub created_at: u64,
    pub executed_at: Option<u64>,
}

#[cw_serde]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
}

#[cw_serde]
pub struct TxIdResponse {
    pub tx_id: u64,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Coin,
}

#[cw_serde]
pub struct VoteResponse {
    pub vote: Option<Vote>,
}
