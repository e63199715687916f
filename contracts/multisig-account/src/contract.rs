use cosmwasm_std::{
    entry_point, to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo,
    Order, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use shared::{has_duplicate_addresses, SignerInput, Vote};

use crate::error::ContractError;
use crate::msg::{
    BalanceResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg, SignerInfo,
    SignersResponse, TransactionResponse, TransactionsResponse, TxIdResponse, VoteInfo,
    VoteResponse,
};
use crate::state::{
    is_signer, Config, Signer, Transaction, CONFIG, SIGNERS, TRANSACTIONS, TX_COUNT, VOTES,
};

const CONTRACT_NAME: &str = "crates.io:multisig-account";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let signers = validate_signers(deps.as_ref(), &msg.signers)?;

    if msg.quorum == 0 {
        return Err(ContractError::InvalidQuorum {});
    }
    if msg.quorum > signers.len() as u64 {
        return Err(ContractError::QuorumExceedsSigners {
            quorum: msg.quorum,
            signers: signers.len() as u64,
        });
    }

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin,
        name: msg.name,
        quorum: msg.quorum,
        denom: msg.denom,
    };
    CONFIG.save(deps.storage, &config)?;
    SIGNERS.save(deps.storage, &signers)?;
    TX_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("name", config.name)
        .add_attribute("admin", config.admin)
        .add_attribute("quorum", config.quorum.to_string())
        .add_attribute("signers", signers.len().to_string()))
}

fn validate_signers(deps: Deps, input: &[SignerInput]) -> Result<Vec<Signer>, ContractError> {
    if input.is_empty() {
        return Err(ContractError::NoSigners {});
    }
    if has_duplicate_addresses(input) {
        return Err(ContractError::DuplicateSigner {});
    }

    input
        .iter()
        .map(|s| {
            Ok(Signer {
                name: s.name.clone(),
                address: deps.api.addr_validate(&s.address)?,
            })
        })
        .collect()
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::NewTransaction { recipient, amount } => {
            execute_new_transaction(deps, env, info, recipient, amount)
        }
        ExecuteMsg::SignAndExecuteTransaction { tx_id, vote } => {
            execute_sign_and_execute(deps, env, info, tx_id, vote)
        }
        ExecuteMsg::AddSigner { name, address } => execute_add_signer(deps, info, name, address),
    }
}

fn wallet_balance(deps: Deps, env: &Env, denom: &str) -> StdResult<Uint128> {
    Ok(deps
        .querier
        .query_balance(&env.contract.address, denom)?
        .amount)
}

pub fn execute_new_transaction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let signers = SIGNERS.load(deps.storage)?;
    if !is_signer(&signers, &info.sender) {
        return Err(ContractError::NotASigner {});
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    // Checked against the live balance only; nothing is reserved
    let config = CONFIG.load(deps.storage)?;
    let balance = wallet_balance(deps.as_ref(), &env, &config.denom)?;
    if amount > balance {
        return Err(ContractError::InsufficientBalance { balance, amount });
    }

    let tx_id = TX_COUNT.load(deps.storage)? + 1;
    TX_COUNT.save(deps.storage, &tx_id)?;

    let transaction = Transaction {
        id: tx_id,
        proposer: info.sender.clone(),
        recipient: recipient_addr,
        amount,
        executed: false,
        yes_votes: 0,
        no_votes: 0,
        created_at: env.block.time.seconds(),
        executed_at: None,
    };
    TRANSACTIONS.save(deps.storage, tx_id, &transaction)?;

    Ok(Response::new()
        .set_data(to_json_binary(&tx_id)?)
        .add_attribute("method", "new_transaction")
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("proposer", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount))
}

pub fn execute_sign_and_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    tx_id: u64,
    vote: Vote,
) -> Result<Response, ContractError> {
    let signers = SIGNERS.load(deps.storage)?;
    if !is_signer(&signers, &info.sender) {
        return Err(ContractError::NotASigner {});
    }

    let mut transaction = TRANSACTIONS
        .may_load(deps.storage, tx_id)?
        .ok_or(ContractError::TransactionNotFound { tx_id })?;

    if transaction.executed {
        return Err(ContractError::AlreadyExecuted { tx_id });
    }

    if VOTES.has(deps.storage, (tx_id, &info.sender)) {
        return Err(ContractError::AlreadyVoted { tx_id });
    }

    match vote {
        Vote::Yes => transaction.yes_votes += 1,
        // NO ballots are recorded but never hold back execution
        Vote::No => transaction.no_votes += 1,
    }

    // Nothing is written until the threshold check has passed
    let config = CONFIG.load(deps.storage)?;
    let transfer = try_execute(deps.as_ref(), &env, &config, &mut transaction)?;
    VOTES.save(deps.storage, (tx_id, &info.sender), &vote)?;
    TRANSACTIONS.save(deps.storage, tx_id, &transaction)?;

    let res = Response::new()
        .add_attribute("method", "sign_and_execute_transaction")
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("signer", info.sender)
        .add_attribute("vote", vote_label(&vote))
        .add_attribute("yes_votes", transaction.yes_votes.to_string())
        .add_attribute("executed", transaction.executed.to_string());

    Ok(match transfer {
        Some(msg) => res.add_message(msg),
        None => res,
    })
}

/// Moves a transaction to executed once its YES votes reach quorum.
///
/// Returns the bank transfer to attach to the response. The caller must
/// persist `transaction` and emit the message in the same call, so the chain
/// commits both or neither.
fn try_execute(
    deps: Deps,
    env: &Env,
    config: &Config,
    transaction: &mut Transaction,
) -> Result<Option<BankMsg>, ContractError> {
    if transaction.yes_votes < config.quorum {
        return Ok(None);
    }

    // Other transactions may have executed since this one was proposed
    let balance = wallet_balance(deps, env, &config.denom)?;
    if balance < transaction.amount {
        return Err(ContractError::TransferUnderflow {
            balance,
            amount: transaction.amount,
        });
    }

    transaction.executed = true;
    transaction.executed_at = Some(env.block.time.seconds());

    Ok(Some(BankMsg::Send {
        to_address: transaction.recipient.to_string(),
        amount: vec![Coin {
            denom: config.denom.clone(),
            amount: transaction.amount,
        }],
    }))
}

fn vote_label(vote: &Vote) -> &'static str {
    match vote {
        Vote::Yes => "yes",
        Vote::No => "no",
    }
}

pub fn execute_add_signer(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::NotAdmin {});
    }

    let addr = deps.api.addr_validate(&address)?;
    let mut signers = SIGNERS.load(deps.storage)?;
    if is_signer(&signers, &addr) {
        return Err(ContractError::DuplicateSigner {});
    }

    signers.push(Signer {
        name: name.clone(),
        address: addr.clone(),
    });
    SIGNERS.save(deps.storage, &signers)?;

    Ok(Response::new()
        .add_attribute("method", "add_signer")
        .add_attribute("name", name)
        .add_attribute("address", addr)
        .add_attribute("signers", signers.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Signers {} => to_json_binary(&query_signers(deps)?),
        QueryMsg::Transaction { tx_id } => to_json_binary(&query_transaction(deps, tx_id)?),
        QueryMsg::Transactions { start_after, limit } => {
            to_json_binary(&query_transactions(deps, start_after, limit)?)
        }
        QueryMsg::TxId {} => to_json_binary(&TxIdResponse {
            tx_id: TX_COUNT.load(deps.storage)?,
        }),
        QueryMsg::Balance {} => to_json_binary(&query_balance(deps, env)?),
        QueryMsg::Vote { tx_id, voter } => to_json_binary(&query_vote(deps, tx_id, voter)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        name: config.name,
        quorum: config.quorum,
        denom: config.denom,
    })
}

fn query_signers(deps: Deps) -> StdResult<SignersResponse> {
    let signers: Vec<SignerInfo> = SIGNERS
        .load(deps.storage)?
        .into_iter()
        .map(|s| SignerInfo {
            name: s.name,
            address: s.address,
        })
        .collect();

    Ok(SignersResponse {
        count: signers.len() as u64,
        signers,
    })
}

fn query_transaction(deps: Deps, tx_id: u64) -> StdResult<TransactionResponse> {
    let transaction = TRANSACTIONS.load(deps.storage, tx_id)?;
    transaction_to_response(deps, transaction)
}

fn query_transactions(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<TransactionsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let transactions = TRANSACTIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, transaction) = item?;
            transaction_to_response(deps, transaction)
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TransactionsResponse { transactions })
}

fn query_balance(deps: Deps, env: Env) -> StdResult<BalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(env.contract.address, config.denom)?;
    Ok(BalanceResponse { balance })
}

fn query_vote(deps: Deps, tx_id: u64, voter: String) -> StdResult<VoteResponse> {
    let voter_addr = deps.api.addr_validate(&voter)?;
    let vote = VOTES.may_load(deps.storage, (tx_id, &voter_addr))?;
    Ok(VoteResponse { vote })
}

fn transaction_to_response(deps: Deps, transaction: Transaction) -> StdResult<TransactionResponse> {
    let votes = VOTES
        .prefix(transaction.id)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (voter, vote): (Addr, Vote) = item?;
            Ok(VoteInfo { voter, vote })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TransactionResponse {
        id: transaction.id,
        proposer: transaction.proposer,
        recipient: transaction.recipient,
        amount: transaction.amount,
        executed: transaction.executed,
        yes_votes: transaction.yes_votes,
        no_votes: transaction.no_votes,
        votes,
        created_at: transaction.created_at,
        executed_at: transaction.executed_at,
    })
}
