use cosmwasm_schema::{cw_serde, QueryResponses};
use shared::{SignerInput, WalletInfo};

#[cw_serde]
pub struct InstantiateMsg {
    /// Code id of the uploaded multisig account contract
    pub account_code_id: u64,
    pub denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a multisig wallet administered by the sender
    CreateWallet {
        name: String,
        quorum: u64,
        signers: Vec<SignerInput>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get directory configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Get every wallet in creation order
    #[returns(WalletsResponse)]
    Wallets {},

    /// Get one wallet created by `owner`
    #[returns(WalletInfo)]
    UserWallet { owner: String, index: u32 },

    /// Get all wallets created by `owner`
    #[returns(WalletsResponse)]
    UserWalletList { owner: String },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub account_code_id: u64,
    pub denom: String,
}

#[cw_serde]
pub struct WalletsResponse {
    pub wallets: Vec<WalletInfo>,
}
