//! Escrow adapter factory.

use crate::adapter::EscrowAdapter;
use crate::error::EscrowError;
use crate::evm::EvmEscrowAdapter;
use crate::ton::TonEscrowAdapter;
use hawser_core::{ChainConfig, ChainFamily, ClientRegistry, SettlementConfig};

/// Bind chain and settlement configuration to an escrow adapter.
///
/// Closed two-way dispatch on [`ChainFamily`]: `ton-*` networks get the
/// TON adapter, everything else the EVM adapter. Adding a third family
/// means extending the discriminator, not touching call sites. No
/// network I/O happens here.
pub fn create_escrow_adapter(
    chain: &ChainConfig,
    settlement: &SettlementConfig,
    clients: &ClientRegistry,
) -> Result<Box<dyn EscrowAdapter>, EscrowError> {
    match chain.family() {
        ChainFamily::Ton => Ok(Box::new(TonEscrowAdapter::new(
            chain,
            settlement,
            clients.ton()?,
        )?)),
        ChainFamily::Evm => Ok(Box::new(EvmEscrowAdapter::new(
            chain,
            settlement,
            clients.evm()?,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hawser_core::clients::{
        EvmTransactionInfo, EvmTransactionRequest, TonPayload, TonTransactionInfo,
    };
    use hawser_core::{ClientError, EvmClient, OrderId, TonClient, TxRef};
    use std::sync::Arc;

    struct NoopEvm;

    #[async_trait]
    impl EvmClient for NoopEvm {
        async fn signer_address(&self) -> Result<String, ClientError> {
            Ok("0xaa".to_string())
        }
        async fn send_transaction(
            &self,
            _tx: EvmTransactionRequest,
        ) -> Result<TxRef, ClientError> {
            Ok(TxRef::new("0x0"))
        }
        async fn call(&self, _to: &str, _data: Vec<u8>) -> Result<Vec<u8>, ClientError> {
            Ok(Vec::new())
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

    struct NoopTon;

    #[async_trait]
    impl TonClient for NoopTon {
        async fn transfer(
            &self,
            _to: &str,
            _amount: u128,
            _payload: TonPayload,
        ) -> Result<TxRef, ClientError> {
            Ok(TxRef::new("ton-0"))
        }
        async fn wallet_address(&self) -> Result<String, ClientError> {
            Ok("EQwallet".to_string())
        }
        async fn transaction_info(
            &self,
            _tx: &TxRef,
        ) -> Result<Option<TonTransactionInfo>, ClientError> {
            Ok(None)
        }
        async fn wallet_balance(&self) -> Result<u128, ClientError> {
            Ok(0)
        }
    }

    fn clients() -> ClientRegistry {
        ClientRegistry::new()
            .with_evm(Arc::new(NoopEvm))
            .with_ton(Arc::new(NoopTon))
    }

    fn chain(network: &str) -> ChainConfig {
        ChainConfig {
            network: network.to_string(),
            escrow_contract_address: Some("EQcontract".to_string()),
            ..ChainConfig::default()
        }
    }

    #[tokio::test]
    async fn test_ton_networks_get_the_ton_adapter() {
        let mut config = chain("ton-mainnet");
        config.ton_mnemonic = Some("word word".to_string());
        let settlement = SettlementConfig {
            mode: hawser_core::SettlementMode::Contract,
            token_address: None,
        };
        let adapter = create_escrow_adapter(&config, &settlement, &clients()).unwrap();

        // TON lock demands a payee; the EVM adapter would not.
        let err = adapter
            .lock(&OrderId::new("ord-1"), "payer", "1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, EscrowError::InvalidPayees(_)));
    }

    #[tokio::test]
    async fn test_other_networks_get_the_evm_adapter() {
        let adapter =
            create_escrow_adapter(&chain("base"), &SettlementConfig::default(), &clients())
                .unwrap();

        // Ledger mode: the EVM adapter rejects contract calls with a
        // settlement.mode configuration error.
        let err = adapter
            .lock(&OrderId::new("ord-1"), "0xpayer", "1", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("settlement.mode"));
    }

    #[test]
    fn test_ton_factory_propagates_construction_errors() {
        let mut config = chain("ton-mainnet");
        config.escrow_contract_address = None;

        let err = create_escrow_adapter(&config, &SettlementConfig::default(), &clients())
            .err()
            .unwrap();
        assert!(err.to_string().contains("chain.escrow_contract_address"));
    }

    #[test]
    fn test_missing_client_binding_is_config_error() {
        let err = create_escrow_adapter(
            &chain("base"),
            &SettlementConfig::default(),
            &ClientRegistry::new(),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("EVM chain client"));
    }
}
