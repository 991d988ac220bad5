use alloy::primitives::{Address, U256};

use crate::{
    chain::{ChainReceipt, ReceiptLog},
    constants::*,
    error::{DeployError, ReceiptDefect},
    models::{CampaignKind, CampaignRecord, DeploymentOutcome},
};

fn topic_as_u256(log: &ReceiptLog, log_index: usize, topic_index: usize) -> Result<U256, ReceiptDefect> {
    log.topics
        .get(topic_index)
        .map(|topic| U256::from_be_bytes(topic.0))
        .ok_or(ReceiptDefect::MissingTopic { log_index, topic_index })
}

fn decode_logs(logs: &[ReceiptLog], factory: Address) -> Result<(Address, String, [CampaignRecord; 2]), ReceiptDefect> {
    // the token emits its mint transfer before anything else
    let token_address = logs.first().ok_or(ReceiptDefect::NoLogs)?.address;

    let campaign_logs: Vec<(usize, &ReceiptLog)> = logs
        .iter()
        .enumerate()
        .filter(|(_, log)| log.topics.first() == Some(&CAMPAIGN_CREATED_TOPIC))
        .collect();

    let (yap, follow) = match campaign_logs.as_slice() {
        [first, second, ..] => (*first, *second),
        _ => {
            return Err(ReceiptDefect::MissingCampaigns {
                found: campaign_logs.len(),
            });
        }
    };

    let yap_campaign = CampaignRecord {
        kind: CampaignKind::Yap,
        id: topic_as_u256(yap.1, yap.0, CAMPAIGN_ID_TOPIC_INDEX)?,
    };
    let follow_campaign = CampaignRecord {
        kind: CampaignKind::Follow,
        id: topic_as_u256(follow.1, follow.0, CAMPAIGN_ID_TOPIC_INDEX)?,
    };

    // Address equality is on raw bytes, so hex casing never matters
    let (factory_index, factory_log) = logs
        .iter()
        .enumerate()
        .find(|(_, log)| log.address == factory)
        .ok_or(ReceiptDefect::MissingFactoryLog)?;
    let position_id = topic_as_u256(factory_log, factory_index, POSITION_ID_TOPIC_INDEX)?.to_string();

    Ok((token_address, position_id, [yap_campaign, follow_campaign]))
}

/// Extracts the token address, LP position id and both campaign ids from a deployment receipt.
///
/// Campaigns are assigned by emission order: the first campaign created log is the yap
/// campaign and the second is the follow campaign.
pub fn decode_deployment_receipt(receipt: &ChainReceipt, factory: Address) -> Result<DeploymentOutcome, DeployError> {
    let (token_address, position_id, [yap_campaign, follow_campaign]) =
        decode_logs(&receipt.logs, factory).map_err(|defect| {
            tracing::error!(
                "Deployment {} has an unexpected receipt: {}",
                receipt.transaction_hash,
                defect
            );
            DeployError::MalformedReceipt {
                tx_hash: receipt.transaction_hash,
                defect,
            }
        })?;

    Ok(DeploymentOutcome {
        token_address,
        position_id,
        yap_campaign,
        follow_campaign,
        transaction_hash: receipt.transaction_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{B256, address};

    const TOKEN: Address = address!("0x1111111111111111111111111111111111111111");
    const CAMPAIGNS: Address = address!("0x2222222222222222222222222222222222222222");

    fn word(value: u64) -> B256 {
        B256::from(U256::from(value).to_be_bytes::<32>())
    }

    fn campaign_log(id: u64) -> ReceiptLog {
        ReceiptLog::new(CAMPAIGNS, vec![CAMPAIGN_CREATED_TOPIC, word(1), word(id)])
    }

    fn factory_log(factory: Address, position: u64) -> ReceiptLog {
        ReceiptLog::new(factory, vec![B256::repeat_byte(0x33), TOKEN.into_word(), word(position)])
    }

    fn receipt(logs: Vec<ReceiptLog>) -> ChainReceipt {
        ChainReceipt {
            transaction_hash: B256::repeat_byte(0xee),
            block_number: Some(1),
            logs,
        }
    }

    fn transfer_log() -> ReceiptLog {
        ReceiptLog::new(TOKEN, vec![B256::repeat_byte(0xdd)])
    }

    #[test]
    fn test_decodes_campaigns_in_emission_order() {
        let receipt = receipt(vec![
            transfer_log(),
            campaign_log(41),
            factory_log(EARNKIT_FACTORY_ADDRESS, 900),
            ReceiptLog::new(CAMPAIGNS, vec![B256::repeat_byte(0x44)]),
            campaign_log(42),
        ]);

        let outcome = decode_deployment_receipt(&receipt, EARNKIT_FACTORY_ADDRESS).unwrap();

        assert_eq!(outcome.token_address, TOKEN);
        assert_eq!(outcome.yap_campaign.kind, CampaignKind::Yap);
        assert_eq!(outcome.yap_campaign.id, U256::from(41u64));
        assert_eq!(outcome.follow_campaign.kind, CampaignKind::Follow);
        assert_eq!(outcome.follow_campaign.id, U256::from(42u64));
        assert_eq!(outcome.position_id, "900");
        assert_eq!(outcome.transaction_hash, B256::repeat_byte(0xee));
    }

    #[test]
    fn test_factory_match_ignores_hex_case() {
        let mixed_case: Address = "0xdf29e0ce7FE906065608FEF642da4dc4169f924B".parse().unwrap();
        let position = U256::from_str_radix("226290979940146177001751347620814275862989157", 10).unwrap();
        let mut log = factory_log(mixed_case, 0);
        log.topics[2] = B256::from(position.to_be_bytes::<32>());

        let receipt = receipt(vec![transfer_log(), campaign_log(1), campaign_log(2), log]);
        let outcome = decode_deployment_receipt(&receipt, EARNKIT_FACTORY_ADDRESS).unwrap();

        assert_eq!(outcome.position_id, "226290979940146177001751347620814275862989157");
    }

    #[test]
    fn test_single_campaign_is_malformed() {
        let receipt = receipt(vec![
            transfer_log(),
            campaign_log(1),
            factory_log(EARNKIT_FACTORY_ADDRESS, 5),
        ]);

        let err = decode_deployment_receipt(&receipt, EARNKIT_FACTORY_ADDRESS).unwrap_err();
        assert_eq!(
            err,
            DeployError::MalformedReceipt {
                tx_hash: B256::repeat_byte(0xee),
                defect: ReceiptDefect::MissingCampaigns { found: 1 },
            }
        );
    }

    #[test]
    fn test_missing_factory_log_is_malformed() {
        let receipt = receipt(vec![transfer_log(), campaign_log(1), campaign_log(2)]);

        let err = decode_deployment_receipt(&receipt, EARNKIT_FACTORY_ADDRESS).unwrap_err();
        assert!(matches!(
            err,
            DeployError::MalformedReceipt { defect: ReceiptDefect::MissingFactoryLog, .. }
        ));
    }

    #[test]
    fn test_empty_receipt_is_malformed() {
        let err = decode_deployment_receipt(&receipt(vec![]), EARNKIT_FACTORY_ADDRESS).unwrap_err();
        assert!(matches!(err, DeployError::MalformedReceipt { defect: ReceiptDefect::NoLogs, .. }));
    }

    #[test]
    fn test_campaign_log_without_id_topic() {
        let short = ReceiptLog::new(CAMPAIGNS, vec![CAMPAIGN_CREATED_TOPIC]);
        let receipt = receipt(vec![transfer_log(), short, campaign_log(2), factory_log(EARNKIT_FACTORY_ADDRESS, 1)]);

        let err = decode_deployment_receipt(&receipt, EARNKIT_FACTORY_ADDRESS).unwrap_err();
        assert!(matches!(
            err,
            DeployError::MalformedReceipt {
                defect: ReceiptDefect::MissingTopic { log_index: 1, topic_index: 2 },
                ..
            }
        ));
    }
}
