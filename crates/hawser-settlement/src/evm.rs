//! EVM escrow adapter.
//!
//! Encodes settlement contract calls and submits them through the
//! external [`EvmClient`]. Contract reverts are translated into escrow
//! state errors; nothing about escrow state is tracked locally.

use crate::abi;
use crate::adapter::{order_key, EscrowAdapter, EscrowStatus};
use crate::error::EscrowError;
use async_trait::async_trait;
use hawser_core::clients::EvmTransactionRequest;
use hawser_core::{
    ChainConfig, ConfigError, EvmClient, OrderId, Payee, SettlementConfig, SettlementMode, TxRef,
};
use std::sync::Arc;

pub(crate) fn parse_amount(amount: &str) -> Result<u128, EscrowError> {
    amount
        .trim()
        .parse::<u128>()
        .map_err(|_| EscrowError::InvalidAmount(amount.to_string()))
}

pub struct EvmEscrowAdapter {
    mode: SettlementMode,
    private_key_configured: bool,
    contract_address: Option<String>,
    token_address: Option<String>,
    client: Arc<dyn EvmClient>,
}

impl EvmEscrowAdapter {
    pub fn new(
        chain: &ChainConfig,
        settlement: &SettlementConfig,
        client: Arc<dyn EvmClient>,
    ) -> Self {
        Self {
            mode: settlement.mode,
            private_key_configured: chain.private_key.is_some(),
            contract_address: chain.escrow_contract_address.clone(),
            token_address: settlement.token_address.clone(),
            client,
        }
    }

    /// Everything an escrow contract call needs, checked before any
    /// network attempt.
    fn ensure_contract_ready(&self) -> Result<(&str, &str), EscrowError> {
        if self.mode != SettlementMode::Contract {
            return Err(ConfigError::Invalid {
                field: "settlement.mode",
                reason: "not set to contract".to_string(),
            }
            .into());
        }
        if !self.private_key_configured {
            return Err(ConfigError::Missing("chain.private_key").into());
        }
        let contract = self
            .contract_address
            .as_deref()
            .ok_or(ConfigError::Missing("chain.escrow_contract_address"))?;
        let token = self
            .token_address
            .as_deref()
            .ok_or(ConfigError::Missing("settlement.token_address"))?;
        Ok((contract, token))
    }

    async fn submit(
        &self,
        order_id: &OrderId,
        contract: &str,
        data: Vec<u8>,
    ) -> Result<TxRef, EscrowError> {
        self.client
            .send_transaction(EvmTransactionRequest {
                to: contract.to_string(),
                value: 0,
                data,
            })
            .await
            .map_err(|err| EscrowError::from_client(order_id, err))
    }

    /// Read the escrow state for an order from the contract.
    pub async fn status(&self, order_id: &OrderId) -> Result<EscrowStatus, EscrowError> {
        let (contract, _) = self.ensure_contract_ready()?;

        let data = abi::encode_static_call("getStatus(bytes32)", &[order_key(order_id)]);
        let result = self
            .client
            .call(contract, data)
            .await
            .map_err(|err| EscrowError::from_client(order_id, err))?;

        let code = result
            .get(..32)
            .map(|word| word[31])
            .ok_or_else(|| EscrowError::Chain(hawser_core::ClientError::Rejected {
                reason: "getStatus returned short data".to_string(),
            }))?;
        EscrowStatus::from_contract_code(code).ok_or_else(|| {
            EscrowError::Chain(hawser_core::ClientError::Rejected {
                reason: format!("unknown escrow status code {code}"),
            })
        })
    }
}

#[async_trait]
impl EscrowAdapter for EvmEscrowAdapter {
    async fn lock(
        &self,
        order_id: &OrderId,
        payer: &str,
        amount: &str,
        _payee: Option<&str>,
    ) -> Result<TxRef, EscrowError> {
        let (contract, token) = self.ensure_contract_ready()?;
        let amount = parse_amount(amount)?;

        let data = abi::encode_static_call(
            "lock(bytes32,address,uint256,address)",
            &[
                order_key(order_id),
                abi::encode_address(payer)?,
                abi::encode_u256(amount),
                abi::encode_address(token)?,
            ],
        );

        let tx = self.submit(order_id, contract, data).await?;
        tracing::info!(%order_id, %tx, "escrow locked");
        Ok(tx)
    }

    async fn release(&self, order_id: &OrderId, payees: &[Payee]) -> Result<TxRef, EscrowError> {
        let (contract, _) = self.ensure_contract_ready()?;
        if payees.is_empty() {
            return Err(EscrowError::InvalidPayees(
                "at least one payee is required".to_string(),
            ));
        }

        let mut addresses = Vec::with_capacity(payees.len());
        let mut amounts = Vec::with_capacity(payees.len());
        for payee in payees {
            addresses.push(abi::encode_address(&payee.address)?);
            amounts.push(abi::encode_u256(parse_amount(&payee.amount)?));
        }

        let data = abi::encode_release_call(order_key(order_id), &addresses, &amounts);
        let tx = self.submit(order_id, contract, data).await?;
        tracing::info!(%order_id, %tx, payees = payees.len(), "escrow released");
        Ok(tx)
    }

    async fn refund(&self, order_id: &OrderId, payer: &str) -> Result<TxRef, EscrowError> {
        let (contract, _) = self.ensure_contract_ready()?;

        let data = abi::encode_static_call(
            "refund(bytes32,address)",
            &[order_key(order_id), abi::encode_address(payer)?],
        );

        let tx = self.submit(order_id, contract, data).await?;
        tracing::info!(%order_id, %tx, "escrow refunded");
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hawser_core::clients::EvmTransactionInfo;
    use hawser_core::ClientError;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    const PAYER: &str = "0x00000000000000000000000000000000000000aa";
    const PAYEE: &str = "0x00000000000000000000000000000000000000bb";
    const TOKEN: &str = "0x00000000000000000000000000000000000000cc";
    const CONTRACT: &str = "0x00000000000000000000000000000000000000dd";

    /// Chain-side escrow state machine, as the settlement contract
    /// enforces it: the stub rejects invalid transitions the way the
    /// contract would.
    struct ContractSim {
        states: Mutex<HashMap<[u8; 32], EscrowStatus>>,
        sends: Mutex<Vec<EvmTransactionRequest>>,
    }

    impl ContractSim {
        fn new() -> Self {
            Self {
                states: Mutex::new(HashMap::new()),
                sends: Mutex::new(Vec::new()),
            }
        }

        fn revert(reason: &str) -> ClientError {
            ClientError::Rejected {
                reason: format!("execution reverted: {reason}"),
            }
        }
    }

    #[async_trait]
    impl EvmClient for ContractSim {
        async fn signer_address(&self) -> Result<String, ClientError> {
            Ok(PAYER.to_string())
        }

        async fn send_transaction(
            &self,
            tx: EvmTransactionRequest,
        ) -> Result<TxRef, ClientError> {
            let selector: [u8; 4] = tx.data[..4].try_into().unwrap();
            let key: [u8; 32] = tx.data[4..36].try_into().unwrap();

            let mut states = self.states.lock();
            let state = states.get(&key).copied().unwrap_or(EscrowStatus::Unlocked);

            let next = if selector == abi::selector("lock(bytes32,address,uint256,address)") {
                if state == EscrowStatus::Locked {
                    return Err(Self::revert("ALREADY_LOCKED"));
                }
                EscrowStatus::Locked
            } else if selector == abi::selector("release(bytes32,address[],uint256[])") {
                if state != EscrowStatus::Locked {
                    return Err(Self::revert("NOT_LOCKED"));
                }
                EscrowStatus::Released
            } else if selector == abi::selector("refund(bytes32,address)") {
                if state != EscrowStatus::Locked {
                    return Err(Self::revert("NOT_LOCKED"));
                }
                EscrowStatus::Refunded
            } else {
                return Err(Self::revert("UNKNOWN_FUNCTION"));
            };

            states.insert(key, next);
            let n = {
                let mut sends = self.sends.lock();
                sends.push(tx);
                sends.len()
            };
            Ok(TxRef::new(format!("0xtx{n}")))
        }

        async fn call(&self, _to: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError> {
            let key: [u8; 32] = data[4..36].try_into().unwrap();
            let state = self
                .states
                .lock()
                .get(&key)
                .copied()
                .unwrap_or(EscrowStatus::Unlocked);
            let mut word = [0u8; 32];
            word[31] = state as u8;
            Ok(word.to_vec())
        }

        async fn transaction_info(
            &self,
            _tx: &TxRef,
        ) -> Result<Option<EvmTransactionInfo>, ClientError> {
            Ok(None)
        }

        async fn signer_balance(&self) -> Result<u128, ClientError> {
            Ok(0)
        }
    }

    fn configured() -> (ChainConfig, SettlementConfig) {
        (
            ChainConfig {
                network: "base".to_string(),
                private_key: Some("0xkey".to_string()),
                escrow_contract_address: Some(CONTRACT.to_string()),
                ..ChainConfig::default()
            },
            SettlementConfig {
                mode: SettlementMode::Contract,
                token_address: Some(TOKEN.to_string()),
            },
        )
    }

    fn adapter(sim: Arc<ContractSim>) -> EvmEscrowAdapter {
        let (chain, settlement) = configured();
        EvmEscrowAdapter::new(&chain, &settlement, sim)
    }

    fn payees(amount: &str) -> Vec<Payee> {
        vec![Payee {
            address: PAYEE.to_string(),
            amount: amount.to_string(),
        }]
    }

    #[tokio::test]
    async fn test_release_before_lock_is_not_locked() {
        let escrow = adapter(Arc::new(ContractSim::new()));
        let order = OrderId::new("ord-1");

        let err = escrow.release(&order, &payees("100")).await.unwrap_err();
        assert!(matches!(err, EscrowError::NotLocked(_)));

        let err = escrow.refund(&order, PAYER).await.unwrap_err();
        assert!(matches!(err, EscrowError::NotLocked(_)));
    }

    #[tokio::test]
    async fn test_lock_release_lifecycle() {
        let escrow = adapter(Arc::new(ContractSim::new()));
        let order = OrderId::new("ord-1");

        escrow.lock(&order, PAYER, "100", None).await.unwrap();
        assert_eq!(escrow.status(&order).await.unwrap(), EscrowStatus::Locked);

        escrow.release(&order, &payees("100")).await.unwrap();
        assert_eq!(escrow.status(&order).await.unwrap(), EscrowStatus::Released);

        // Terminal: neither release nor refund may run twice.
        let err = escrow.release(&order, &payees("100")).await.unwrap_err();
        assert!(matches!(err, EscrowError::NotLocked(_)));
        let err = escrow.refund(&order, PAYER).await.unwrap_err();
        assert!(matches!(err, EscrowError::NotLocked(_)));
    }

    #[tokio::test]
    async fn test_lock_refund_lifecycle() {
        let escrow = adapter(Arc::new(ContractSim::new()));
        let order = OrderId::new("ord-2");

        escrow.lock(&order, PAYER, "50", None).await.unwrap();
        escrow.refund(&order, PAYER).await.unwrap();

        assert_eq!(escrow.status(&order).await.unwrap(), EscrowStatus::Refunded);
        let err = escrow.release(&order, &payees("50")).await.unwrap_err();
        assert!(matches!(err, EscrowError::NotLocked(_)));
    }

    #[tokio::test]
    async fn test_double_lock_is_already_locked() {
        let escrow = adapter(Arc::new(ContractSim::new()));
        let order = OrderId::new("ord-3");

        escrow.lock(&order, PAYER, "10", None).await.unwrap();
        let err = escrow.lock(&order, PAYER, "10", None).await.unwrap_err();

        assert!(matches!(err, EscrowError::AlreadyLocked(_)));
    }

    #[tokio::test]
    async fn test_lock_calldata_shape() {
        let sim = Arc::new(ContractSim::new());
        let escrow = adapter(sim.clone());
        let order = OrderId::new("ord-4");

        escrow.lock(&order, PAYER, "7", None).await.unwrap();

        let sends = sim.sends.lock();
        let tx = &sends[0];
        assert_eq!(tx.to, CONTRACT);
        assert_eq!(tx.value, 0);
        assert_eq!(tx.data.len(), 4 + 4 * 32);
        assert_eq!(&tx.data[4..36], &order_key(&order));
        // Amount word.
        assert_eq!(tx.data[4 + 2 * 32 + 31], 7);
    }

    #[tokio::test]
    async fn test_contract_mode_required() {
        let (chain, _) = configured();
        let settlement = SettlementConfig::default();
        let escrow = EvmEscrowAdapter::new(&chain, &settlement, Arc::new(ContractSim::new()));

        let err = escrow
            .lock(&OrderId::new("ord-5"), PAYER, "1", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("settlement.mode"));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_fast() {
        let (mut chain, settlement) = configured();
        chain.private_key = None;
        let sim = Arc::new(ContractSim::new());
        let escrow = EvmEscrowAdapter::new(&chain, &settlement, sim.clone());

        let err = escrow
            .lock(&OrderId::new("ord-6"), PAYER, "1", None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("chain.private_key"));
        assert!(sim.sends.lock().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected_locally() {
        let escrow = adapter(Arc::new(ContractSim::new()));

        let err = escrow
            .lock(&OrderId::new("ord-7"), PAYER, "12.5", None)
            .await
            .unwrap_err();
        assert!(matches!(err, EscrowError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_multi_payee_release_encodes_both_arrays() {
        let sim = Arc::new(ContractSim::new());
        let escrow = adapter(sim.clone());
        let order = OrderId::new("ord-8");

        escrow.lock(&order, PAYER, "100", None).await.unwrap();
        escrow
            .release(
                &order,
                &[
                    Payee {
                        address: PAYEE.to_string(),
                        amount: "60".to_string(),
                    },
                    Payee {
                        address: PAYER.to_string(),
                        amount: "40".to_string(),
                    },
                ],
            )
            .await
            .unwrap();

        let sends = sim.sends.lock();
        let release = &sends[1];
        // selector + 3 head + (1+2) + (1+2) words
        assert_eq!(release.data.len(), 4 + 9 * 32);
    }
}
