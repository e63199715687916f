use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Sender is not a signer")]
    NotASigner {},

    #[error("Only the wallet admin can do this")]
    NotAdmin {},

    #[error("Low wallet balance (have {balance}, need {amount})")]
    InsufficientBalance { balance: Uint128, amount: Uint128 },

    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Transaction {tx_id} not found")]
    TransactionNotFound { tx_id: u64 },

    #[error("Transaction {tx_id} already executed")]
    AlreadyExecuted { tx_id: u64 },

    #[error("Signer already voted on transaction {tx_id}")]
    AlreadyVoted { tx_id: u64 },

    #[error("Duplicate signer")]
    DuplicateSigner {},

    #[error("Please provide signers")]
    NoSigners {},

    #[error("Quorum must be at least 1")]
    InvalidQuorum {},

    #[error("Number of confirmations ({quorum}) higher than signers ({signers})")]
    QuorumExceedsSigners { quorum: u64, signers: u64 },

    #[error("Balance dropped below transfer amount (have {balance}, need {amount})")]
    TransferUnderflow { balance: Uint128, amount: Uint128 },
}
