use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Reply,
    Response, StdError, StdResult, SubMsg, SubMsgResponse, WasmMsg,
};
use cw2::set_contract_version;
use multisig_account::msg::InstantiateMsg as AccountInstantiateMsg;
use shared::{has_duplicate_addresses, SignerInput, WalletInfo};

use crate::error::ContractError;
use crate::msg::{ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, WalletsResponse};
use crate::state::{
    Config, PendingWallet, CONFIG, GLOBAL_WALLETS, OWNER_WALLETS, OWNER_WALLET_COUNT,
    PENDING_WALLET, WALLET_COUNT,
};

const CONTRACT_NAME: &str = "crates.io:wallet-directory";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTANTIATE_WALLET_REPLY_ID: u64 = 1;

const INSTANTIATE_EVENT: &str = "instantiate";
const CONTRACT_ADDRESS_ATTR: &str = "_contract_address";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        account_code_id: msg.account_code_id,
        denom: msg.denom,
    };
    CONFIG.save(deps.storage, &config)?;
    WALLET_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("account_code_id", config.account_code_id.to_string())
        .add_attribute("denom", config.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateWallet {
            name,
            quorum,
            signers,
        } => execute_create_wallet(deps, env, info, name, quorum, signers),
    }
}

pub fn execute_create_wallet(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    name: String,
    quorum: u64,
    signers: Vec<SignerInput>,
) -> Result<Response, ContractError> {
    if signers.is_empty() {
        return Err(ContractError::NoSigners {});
    }

    if quorum > signers.len() as u64 {
        return Err(ContractError::QuorumExceedsSigners {
            quorum,
            signers: signers.len() as u64,
        });
    }

    if quorum == 0 {
        return Err(ContractError::InvalidQuorum {});
    }

    if has_duplicate_addresses(&signers) {
        return Err(ContractError::DuplicateSigner {});
    }

    let config = CONFIG.load(deps.storage)?;
    let wallet_number = WALLET_COUNT.load(deps.storage)? + 1;

    let account_msg = AccountInstantiateMsg {
        name: name.clone(),
        quorum,
        signers,
        admin: Some(info.sender.to_string()),
        denom: config.denom,
    };
    let instantiate_msg = WasmMsg::Instantiate {
        admin: None,
        code_id: config.account_code_id,
        msg: to_json_binary(&account_msg)?,
        funds: vec![],
        label: format!("multisig-wallet-{}", wallet_number),
    };

    PENDING_WALLET.save(
        deps.storage,
        &PendingWallet {
            creator: info.sender.clone(),
            name: name.clone(),
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(
            instantiate_msg,
            INSTANTIATE_WALLET_REPLY_ID,
        ))
        .add_attribute("method", "create_wallet")
        .add_attribute("creator", info.sender)
        .add_attribute("name", name)
        .add_attribute("quorum", quorum.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_WALLET_REPLY_ID => {
            let res = msg.result.into_result().map_err(StdError::generic_err)?;
            reply_wallet_instantiated(deps, res)
        }
        id => Err(ContractError::UnknownReply { id }),
    }
}

fn reply_wallet_instantiated(
    deps: DepsMut,
    res: SubMsgResponse,
) -> Result<Response, ContractError> {
    let address = res
        .events
        .iter()
        .filter(|event| event.ty == INSTANTIATE_EVENT)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == CONTRACT_ADDRESS_ATTR)
        .map(|attr| attr.value.clone())
        .ok_or(ContractError::MissingContractAddress {})?;
    let address = deps.api.addr_validate(&address)?;

    let pending = PENDING_WALLET.load(deps.storage)?;
    PENDING_WALLET.remove(deps.storage);

    let wallet = WalletInfo {
        name: pending.name,
        address: address.clone(),
    };

    // Global and per-owner lists are appended together
    let global_index = WALLET_COUNT.load(deps.storage)?;
    GLOBAL_WALLETS.save(deps.storage, global_index, &wallet)?;
    WALLET_COUNT.save(deps.storage, &(global_index + 1))?;

    let owner_index = OWNER_WALLET_COUNT
        .may_load(deps.storage, &pending.creator)?
        .unwrap_or_default();
    OWNER_WALLETS.save(deps.storage, (&pending.creator, owner_index), &wallet)?;
    OWNER_WALLET_COUNT.save(deps.storage, &pending.creator, &(owner_index + 1))?;

    Ok(Response::new()
        .set_data(to_json_binary(&address)?)
        .add_attribute("method", "wallet_instantiated")
        .add_attribute("wallet_address", address)
        .add_attribute("creator", pending.creator)
        .add_attribute("owner_index", owner_index.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Wallets {} => to_json_binary(&query_wallets(deps)?),
        QueryMsg::UserWallet { owner, index } => {
            to_json_binary(&query_user_wallet(deps, owner, index)?)
        }
        QueryMsg::UserWalletList { owner } => {
            to_json_binary(&query_user_wallet_list(deps, owner)?)
        }
    };
    Ok(res?)
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        account_code_id: config.account_code_id,
        denom: config.denom,
    })
}

fn query_wallets(deps: Deps) -> StdResult<WalletsResponse> {
    let wallets = GLOBAL_WALLETS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, wallet)| wallet))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(WalletsResponse { wallets })
}

fn query_user_wallet(deps: Deps, owner: String, index: u32) -> Result<WalletInfo, ContractError> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let count = owner_wallet_count(deps, &owner_addr)?;
    if index >= count {
        return Err(ContractError::IndexOutOfRange { index, count });
    }

    Ok(OWNER_WALLETS.load(deps.storage, (&owner_addr, index))?)
}

fn query_user_wallet_list(deps: Deps, owner: String) -> StdResult<WalletsResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;

    let wallets = OWNER_WALLETS
        .prefix(&owner_addr)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, wallet)| wallet))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(WalletsResponse { wallets })
}

fn owner_wallet_count(deps: Deps, owner: &Addr) -> StdResult<u32> {
    Ok(OWNER_WALLET_COUNT
        .may_load(deps.storage, owner)?
        .unwrap_or_default())
}
