//! Unit tests for calldata encoding.
//!
//! These tests verify the ABI encoding of Ajna pool, factory, position manager
//! and grant fund calls without requiring RPC connections.

use ajna_rs_contracts::erc20::IERC20;
use ajna_rs_contracts::factory::{erc20_non_subset_hash, IERC20PoolFactory, IERC721PoolFactory};
use ajna_rs_contracts::grant_fund::IGrantFund;
use ajna_rs_contracts::pool::{IERC20Pool, IERC721Pool, IPool};
use ajna_rs_contracts::position_manager::IPositionManager;
use ajna_rs_contracts::{ErrorRegistry, ProviderBackend, TransactionEnvelope};
use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::SolCall;

// Anvil's default account 0 private key
const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

const TEST_POOL: Address = address!("D86c4A8b172170Da0d5C0C1F12455bA80Eaa42AD");
const TEST_COLLATERAL: Address = address!("97112a824376a2672a61c63c1c20cb4ee5855bc7");
const TEST_QUOTE: Address = address!("c91261159593173b5d82e1024c3e3529e945dc28");
const TEST_BORROWER: Address = address!("1234567890123456789012345678901234567890");

// addQuoteToken(uint256,uint256,uint256)
const ADD_QUOTE_TOKEN_SELECTOR: [u8; 4] = [0xf7, 0x8b, 0x0c, 0xce];
// moveQuoteToken(uint256,uint256,uint256,uint256)
const MOVE_QUOTE_TOKEN_SELECTOR: [u8; 4] = [0x33, 0x2c, 0x0e, 0x43];
// removeQuoteToken(uint256,uint256)
const REMOVE_QUOTE_TOKEN_SELECTOR: [u8; 4] = [0xb1, 0xf0, 0x72, 0x47];
// updateInterest()
const UPDATE_INTEREST_SELECTOR: [u8; 4] = [0xd1, 0x48, 0x27, 0x91];
// drawDebt(address,uint256,uint256,uint256)
const DRAW_DEBT_SELECTOR: [u8; 4] = [0xcf, 0xa8, 0xff, 0x03];
// deployPool(address,address,uint256)
const DEPLOY_POOL_SELECTOR: [u8; 4] = [0xa3, 0x23, 0x2b, 0xf3];
// mint((address,address,bytes32))
const MINT_SELECTOR: [u8; 4] = [0x1b, 0x80, 0xb3, 0x0b];
// burn((uint256,address))
const BURN_SELECTOR: [u8; 4] = [0x9b, 0x50, 0x4f, 0x48];
// startNewDistributionPeriod()
const START_DISTRIBUTION_SELECTOR: [u8; 4] = [0xa6, 0xd0, 0x3c, 0x1d];
// propose(address[],uint256[],bytes[],string)
const PROPOSE_SELECTOR: [u8; 4] = [0x7d, 0x5e, 0x81, 0xe2];
// approve(address,uint256)
const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

fn word(calldata: &[u8], n: usize) -> U256 {
    U256::from_be_slice(&calldata[4 + 32 * n..4 + 32 * (n + 1)])
}

// ============================================================================
// Lender Calldata Tests
// ============================================================================

#[test]
fn test_add_quote_token_calldata() {
    let call = IPool::addQuoteTokenCall {
        amount: U256::from(10u64) * U256::from(10u64).pow(U256::from(18)),
        index: U256::from(2000),
        expiry: U256::from(1_700_000_600u64),
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &ADD_QUOTE_TOKEN_SELECTOR);
    // 4 (selector) + 3 * 32 (arguments)
    assert_eq!(calldata.len(), 100);
    assert_eq!(word(&calldata, 1), U256::from(2000));
    assert_eq!(word(&calldata, 2), U256::from(1_700_000_600u64));
}

#[test]
fn test_move_quote_token_calldata() {
    let call = IPool::moveQuoteTokenCall {
        maxAmount: U256::MAX,
        fromIndex: U256::from(2000),
        toIndex: U256::from(2001),
        expiry: U256::from(1u64),
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &MOVE_QUOTE_TOKEN_SELECTOR);
    assert_eq!(word(&calldata, 0), U256::MAX);
    assert_eq!(word(&calldata, 2), U256::from(2001));
}

#[test]
fn test_remove_quote_token_calldata() {
    let call = IPool::removeQuoteTokenCall {
        maxAmount: U256::from(1),
        index: U256::from(4444),
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &REMOVE_QUOTE_TOKEN_SELECTOR);
    assert_eq!(word(&calldata, 1), U256::from(4444));
}

#[test]
fn test_update_interest_calldata() {
    let calldata = IPool::updateInterestCall {}.abi_encode();
    assert_eq!(calldata, UPDATE_INTEREST_SELECTOR.to_vec());
}

// ============================================================================
// Borrower Calldata Tests
// ============================================================================

#[test]
fn test_draw_debt_calldata() {
    let call = IERC20Pool::drawDebtCall {
        borrower: TEST_BORROWER,
        amountToBorrow: U256::from(1),
        limitIndex: U256::from(2000),
        collateralToPledge: U256::from(3),
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &DRAW_DEBT_SELECTOR);
    assert_eq!(Address::from_slice(&calldata[16..36]), TEST_BORROWER);
    assert_eq!(word(&calldata, 3), U256::from(3));
}

#[test]
fn test_nft_draw_debt_has_distinct_selector() {
    assert_ne!(
        IERC721Pool::drawDebtCall::SELECTOR,
        IERC20Pool::drawDebtCall::SELECTOR
    );
    assert_eq!(
        IERC721Pool::drawDebtCall::SIGNATURE,
        "drawDebt(address,uint256,uint256,uint256[])"
    );
}

// ============================================================================
// Factory, Position Manager and Grant Fund Calldata Tests
// ============================================================================

#[test]
fn test_deploy_pool_calldata() {
    let call = IERC20PoolFactory::deployPoolCall {
        collateral: TEST_COLLATERAL,
        quote: TEST_QUOTE,
        interestRate: U256::from(50_000_000_000_000_000u64),
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &DEPLOY_POOL_SELECTOR);
    assert_eq!(Address::from_slice(&calldata[16..36]), TEST_COLLATERAL);
    assert_eq!(Address::from_slice(&calldata[48..68]), TEST_QUOTE);
    assert_eq!(word(&calldata, 2), U256::from(50_000_000_000_000_000u64));
}

#[test]
fn test_nft_deploy_pool_signature() {
    assert_eq!(
        IERC721PoolFactory::deployPoolCall::SIGNATURE,
        "deployPool(address,address,uint256[],uint256)"
    );
}

#[test]
fn test_mint_calldata() {
    let call = IPositionManager::mintCall {
        params: IPositionManager::MintParams {
            recipient: TEST_BORROWER,
            pool: TEST_POOL,
            poolSubsetHash: erc20_non_subset_hash(),
        },
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &MINT_SELECTOR);
    // static tuple is encoded in place
    assert_eq!(calldata.len(), 100);
    assert_eq!(&calldata[68..100], erc20_non_subset_hash().as_slice());
}

#[test]
fn test_burn_calldata() {
    let call = IPositionManager::burnCall {
        params: IPositionManager::BurnParams {
            tokenId: U256::from(7),
            pool: TEST_POOL,
        },
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &BURN_SELECTOR);
    assert_eq!(word(&calldata, 0), U256::from(7));
}

#[test]
fn test_grant_fund_calldata() {
    let calldata = IGrantFund::startNewDistributionPeriodCall {}.abi_encode();
    assert_eq!(calldata, START_DISTRIBUTION_SELECTOR.to_vec());

    let transfer = IERC20::transferCall {
        to: TEST_BORROWER,
        amount: U256::from(1000),
    };
    let call = IGrantFund::proposeCall {
        targets: vec![TEST_QUOTE],
        values: vec![U256::ZERO],
        calldatas: vec![Bytes::from(transfer.abi_encode())],
        description: "{\"title\":\"ajna community courses\"}".to_string(),
    };
    let calldata = call.abi_encode();

    assert_eq!(&calldata[0..4], &PROPOSE_SELECTOR);
    let decoded = IGrantFund::proposeCall::abi_decode(&calldata).unwrap();
    assert_eq!(decoded.targets, vec![TEST_QUOTE]);
    assert_eq!(decoded.description, "{\"title\":\"ajna community courses\"}");
}

// ============================================================================
// Envelope Construction Tests
// ============================================================================

#[test]
fn test_envelope_prepare_returns_pool_and_call() {
    let backend = ProviderBackend::new("http://localhost:8545", TEST_PRIVATE_KEY).unwrap();
    let errors = ErrorRegistry::ajna();
    let approve = IERC20::approveCall {
        spender: TEST_POOL,
        amount: U256::MAX,
    };

    let envelope = TransactionEnvelope::new(&backend, &errors, TEST_QUOTE, approve);
    assert_eq!(envelope.gas_limit(), None);

    let (addr, call) = envelope.prepare();
    assert_eq!(addr, TEST_QUOTE);
    assert_eq!(&call.abi_encode()[0..4], &APPROVE_SELECTOR);
    assert_eq!(call.spender, TEST_POOL);
}
