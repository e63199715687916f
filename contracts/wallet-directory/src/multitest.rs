use anyhow::Result as AnyResult;
use cosmwasm_std::{coins, Addr, Empty, StdResult, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use multisig_account::msg::{
    ConfigResponse as AccountConfigResponse, ExecuteMsg as AccountExecuteMsg,
    QueryMsg as AccountQueryMsg, SignersResponse, TransactionResponse,
};
use multisig_account::ContractError as AccountError;
use shared::{SignerInput, Vote, WalletInfo};

use crate::contract::{execute, instantiate, query, reply};
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, WalletsResponse};
use crate::ContractError;

const DENOM: &str = "uatom";
const OWNER: &str = "akon";

fn directory_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query).with_reply(reply))
}

fn account_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        multisig_account::contract::execute,
        multisig_account::contract::instantiate,
        multisig_account::contract::query,
    ))
}

fn signers() -> Vec<SignerInput> {
    [("Akon", "akon"), ("Iso", "iso"), ("Ivy", "ivy")]
        .iter()
        .map(|(name, address)| SignerInput {
            name: name.to_string(),
            address: address.to_string(),
        })
        .collect()
}

fn setup() -> (App, Addr) {
    let mut app = App::new(|router, _api, storage| {
        router
            .bank
            .init_balance(storage, &Addr::unchecked("funder"), coins(1_000, DENOM))
            .unwrap();
    });
    let account_code_id = app.store_code(account_contract());
    let directory_code_id = app.store_code(directory_contract());

    let directory = app
        .instantiate_contract(
            directory_code_id,
            Addr::unchecked("deployer"),
            &InstantiateMsg {
                account_code_id,
                denom: DENOM.to_string(),
            },
            &[],
            "wallet-directory",
            None,
        )
        .unwrap();
    (app, directory)
}

fn create_wallet(
    app: &mut App,
    directory: &Addr,
    sender: &str,
    name: &str,
    quorum: u64,
    signers: Vec<SignerInput>,
) -> AnyResult<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        directory.clone(),
        &ExecuteMsg::CreateWallet {
            name: name.to_string(),
            quorum,
            signers,
        },
        &[],
    )
}

fn all_wallets(app: &App, directory: &Addr) -> Vec<WalletInfo> {
    let res: WalletsResponse = app
        .wrap()
        .query_wasm_smart(directory, &QueryMsg::Wallets {})
        .unwrap();
    res.wallets
}

#[test]
fn creates_and_indexes_wallets() {
    let (mut app, directory) = setup();

    create_wallet(&mut app, &directory, OWNER, "Gift", 2, signers()).unwrap();
    create_wallet(&mut app, &directory, OWNER, "Transport", 3, signers()).unwrap();
    create_wallet(&mut app, &directory, OWNER, "Air Ticket", 1, signers()).unwrap();
    create_wallet(&mut app, &directory, "iso", "Savings", 2, signers()).unwrap();

    let first: WalletInfo = app
        .wrap()
        .query_wasm_smart(
            &directory,
            &QueryMsg::UserWallet {
                owner: OWNER.to_string(),
                index: 0,
            },
        )
        .unwrap();
    assert_eq!(first.name, "Gift");

    let wallets = all_wallets(&app, &directory);
    assert_eq!(wallets.len(), 4);

    let owned: WalletsResponse = app
        .wrap()
        .query_wasm_smart(
            &directory,
            &QueryMsg::UserWalletList {
                owner: OWNER.to_string(),
            },
        )
        .unwrap();
    assert_eq!(owned.wallets.len(), 3);
    for wallet in &owned.wallets {
        assert!(wallets.contains(wallet));
    }

    // each entry points at a live account administered by its creator
    let config: AccountConfigResponse = app
        .wrap()
        .query_wasm_smart(&wallets[3].address, &AccountQueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, Addr::unchecked("iso"));
    assert_eq!(config.name, "Savings");
    assert_eq!(config.denom, DENOM);

    let roster: SignersResponse = app
        .wrap()
        .query_wasm_smart(&wallets[0].address, &AccountQueryMsg::Signers {})
        .unwrap();
    assert_eq!(roster.signers.len() as u64, roster.count);
    assert_eq!(roster.count, 3);
}

#[test]
fn rejected_creation_leaves_directory_untouched() {
    let (mut app, directory) = setup();

    let err = create_wallet(&mut app, &directory, OWNER, "Gift", 2, vec![]).unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::NoSigners {}
    );

    let err = create_wallet(&mut app, &directory, OWNER, "BlueChain", 4, signers()).unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::QuorumExceedsSigners {
            quorum: 4,
            signers: 3
        }
    );

    assert!(all_wallets(&app, &directory).is_empty());

    let res: StdResult<WalletInfo> = app.wrap().query_wasm_smart(
        &directory,
        &QueryMsg::UserWallet {
            owner: OWNER.to_string(),
            index: 0,
        },
    );
    assert!(res.is_err());
}

#[test]
fn created_wallet_runs_full_approval_flow() {
    let (mut app, directory) = setup();
    create_wallet(&mut app, &directory, OWNER, "test", 2, signers()).unwrap();
    let wallet = all_wallets(&app, &directory)[0].address.clone();

    let propose = AccountExecuteMsg::NewTransaction {
        recipient: "recipient".to_string(),
        amount: Uint128::new(1),
    };
    let err = app
        .execute_contract(Addr::unchecked(OWNER), wallet.clone(), &propose, &[])
        .unwrap_err();
    assert!(matches!(
        err.downcast::<AccountError>().unwrap(),
        AccountError::InsufficientBalance { .. }
    ));

    app.send_tokens(Addr::unchecked("funder"), wallet.clone(), &coins(100, DENOM))
        .unwrap();
    app.execute_contract(Addr::unchecked(OWNER), wallet.clone(), &propose, &[])
        .unwrap();

    let sign = AccountExecuteMsg::SignAndExecuteTransaction {
        tx_id: 1,
        vote: Vote::Yes,
    };
    let err = app
        .execute_contract(Addr::unchecked("stranger"), wallet.clone(), &sign, &[])
        .unwrap_err();
    assert_eq!(
        err.downcast::<AccountError>().unwrap(),
        AccountError::NotASigner {}
    );

    app.execute_contract(Addr::unchecked(OWNER), wallet.clone(), &sign, &[])
        .unwrap();
    app.execute_contract(Addr::unchecked("iso"), wallet.clone(), &sign, &[])
        .unwrap();

    let tx: TransactionResponse = app
        .wrap()
        .query_wasm_smart(&wallet, &AccountQueryMsg::Transaction { tx_id: 1 })
        .unwrap();
    assert!(tx.executed);
    assert_eq!(
        app.wrap().query_balance(&wallet, DENOM).unwrap().amount,
        Uint128::new(99)
    );
    assert_eq!(
        app.wrap().query_balance("recipient", DENOM).unwrap().amount,
        Uint128::new(1)
    );

    // the creator, not the directory, administers the wallet
    let add = AccountExecuteMsg::AddSigner {
        name: "Eve".to_string(),
        address: "evelyn".to_string(),
    };
    let err = app
        .execute_contract(directory.clone(), wallet.clone(), &add, &[])
        .unwrap_err();
    assert_eq!(
        err.downcast::<AccountError>().unwrap(),
        AccountError::NotAdmin {}
    );
    app.execute_contract(Addr::unchecked(OWNER), wallet, &add, &[])
        .unwrap();
}
