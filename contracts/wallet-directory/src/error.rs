use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Please provide signers")]
    NoSigners {},

    #[error("Duplicate signer")]
    DuplicateSigner {},

    #[error("Quorum must be at least 1")]
    InvalidQuorum {},

    #[error("Number of confirmations ({quorum}) higher than signers ({signers})")]
    QuorumExceedsSigners { quorum: u64, signers: u64 },

    #[error("Wallet index {index} out of range (owner has {count})")]
    IndexOutOfRange { index: u32, count: u32 },

    #[error("Unknown reply id {id}")]
    UnknownReply { id: u64 },

    #[error("Instantiate reply carried no contract address")]
    MissingContractAddress {},
}
