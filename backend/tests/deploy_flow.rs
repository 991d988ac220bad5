use alloy::{
    primitives::{Address, B256, Bytes, U256, address},
    sol_types::SolCall,
};
use castlaunch::{
    DeployError,
    chain::{InMemoryChain, ReceiptLog},
    constants::*,
    create2::{Create2Predictor, find_salt, predict_address, sorts_before},
    models::{CampaignKind, DeploymentParameters, PoolConfig, deployment::default_total_supply},
    services::{DeploymentOrchestrator, factory::abi::deployTokenWithCampaignsCall},
};

const SIGNER: Address = address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
const CAMPAIGN_MANAGER: Address = address!("0x2222222222222222222222222222222222222222");
const CREATION_CODE: &[u8] = &[0x60, 0x80, 0x60, 0x40, 0x52, 0x34, 0x80, 0x15];

fn word(value: u64) -> B256 {
    B256::from(U256::from(value).to_be_bytes::<32>())
}

fn params(name: &str) -> DeploymentParameters {
    DeploymentParameters {
        name: name.to_string(),
        symbol: name.to_string(),
        total_supply: default_total_supply(),
        deployer: SIGNER,
        fid: DEFAULT_CREATOR_FID,
        image: "https://cards.example/render?text=gm".to_string(),
        cast_hash: "0x5a1b2c".to_string(),
        pool: PoolConfig::default(),
    }
}

fn deployment_logs(token: Address, factory_hex: &str) -> Vec<ReceiptLog> {
    let factory: Address = factory_hex.parse().unwrap();
    vec![
        ReceiptLog::new(token, vec![B256::repeat_byte(0xdd), B256::ZERO, SIGNER.into_word()]),
        ReceiptLog::new(CAMPAIGN_MANAGER, vec![CAMPAIGN_CREATED_TOPIC, token.into_word(), word(311)]),
        ReceiptLog::new(CAMPAIGN_MANAGER, vec![CAMPAIGN_CREATED_TOPIC, token.into_word(), word(312)]),
        ReceiptLog::new(factory, vec![B256::repeat_byte(0x77), token.into_word(), word(1_048_576)]),
    ]
}

#[tokio::test]
async fn test_deploys_with_salt_that_sorts_before_weth() {
    let seed = B256::repeat_byte(0x5e);
    let params = params("0x9f8e7d");

    // what the factory will deploy for this seed
    let predictor = Create2Predictor::new(EARNKIT_FACTORY_ADDRESS, SIGNER, params.init_code_hash(CREATION_CODE));
    let expected = find_salt(&predictor, WETH_ADDRESS, seed);

    let chain = InMemoryChain::new(SIGNER)
        .with_head(31_000_000, seed)
        .with_receipt_logs(deployment_logs(expected.address, "0xdf29e0ce7fe906065608fef642da4dc4169f924b"));
    let orchestrator = DeploymentOrchestrator::new(chain, EARNKIT_FACTORY_ADDRESS, Bytes::from_static(CREATION_CODE));

    let outcome = orchestrator.deploy(&params).await.unwrap();

    assert_eq!(outcome.token_address, expected.address);
    assert_eq!(outcome.position_id, "1048576");
    assert_eq!(outcome.yap_campaign.kind, CampaignKind::Yap);
    assert_eq!(outcome.yap_campaign.id, U256::from(311u64));
    assert_eq!(outcome.follow_campaign.kind, CampaignKind::Follow);
    assert_eq!(outcome.follow_campaign.id, U256::from(312u64));

    let submissions = orchestrator.chain().submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].to, EARNKIT_FACTORY_ADDRESS);
    assert_eq!(outcome.transaction_hash, submissions[0].tx_hash);

    let call = deployTokenWithCampaignsCall::abi_decode(&submissions[0].input).unwrap();
    assert_eq!(call.salt, expected.salt);
    assert_eq!(call.name, "0x9f8e7d");
    assert_eq!(call.castHash, "0x5a1b2c");
    assert_eq!(call.supply, default_total_supply());
    assert_eq!(call.campaigns.len(), 2);

    let predicted = predict_address(EARNKIT_FACTORY_ADDRESS, SIGNER, &call.salt, &params.init_code_hash(CREATION_CODE));
    assert!(sorts_before(predicted, WETH_ADDRESS));
}

#[tokio::test]
async fn test_receipt_with_one_campaign_is_malformed() {
    let mut logs = deployment_logs(Address::repeat_byte(0x01), "0xDF29E0CE7FE906065608FEF642DA4DC4169F924B");
    logs.remove(2);

    let chain = InMemoryChain::new(SIGNER)
        .with_head(100, B256::repeat_byte(0x01))
        .with_receipt_logs(logs);
    let orchestrator = DeploymentOrchestrator::new(chain, EARNKIT_FACTORY_ADDRESS, Bytes::from_static(CREATION_CODE));

    let err = orchestrator.deploy(&params("0x01")).await.unwrap_err();
    assert!(matches!(err, DeployError::MalformedReceipt { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_chain_is_connectivity_error() {
    let chain = InMemoryChain::new(SIGNER).with_unreachable();
    let orchestrator = DeploymentOrchestrator::new(chain, EARNKIT_FACTORY_ADDRESS, Bytes::from_static(CREATION_CODE));

    let err = orchestrator.deploy(&params("0x01")).await.unwrap_err();
    assert!(matches!(err, DeployError::Connectivity(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_concurrent_launches_submit_one_at_a_time() {
    let chain = InMemoryChain::new(SIGNER)
        .with_head(100, B256::repeat_byte(0x42))
        .with_receipt_logs(deployment_logs(Address::repeat_byte(0x01), "0xdf29e0ce7fe906065608fef642da4dc4169f924b"));
    let orchestrator = DeploymentOrchestrator::new(chain, EARNKIT_FACTORY_ADDRESS, Bytes::from_static(CREATION_CODE));

    let first = params("0xaaaa01");
    let second = params("0xbbbb02");
    let (a, b) = tokio::join!(orchestrator.deploy(&first), orchestrator.deploy(&second));

    assert!(a.is_ok() && b.is_ok());
    let submissions = orchestrator.chain().submissions();
    assert_eq!(submissions.len(), 2);
    assert_ne!(submissions[0].tx_hash, submissions[1].tx_hash);
    // the second launch only submits after the first receipt came back
    assert_eq!(orchestrator.chain().max_in_flight(), 1);
}
