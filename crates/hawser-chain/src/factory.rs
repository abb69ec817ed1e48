//! Chain adapter factory.

use crate::adapter::ChainAdapter;
use crate::error::AnchorError;
use crate::evm::EvmAnchorAdapter;
use crate::index::AnchorIndex;
use crate::ton::TonAnchorAdapter;
use hawser_core::{ChainConfig, ChainFamily, ClientRegistry};
use std::sync::Arc;

/// Bind chain configuration to an anchor adapter.
///
/// Pure dispatch on [`ChainFamily`]: TON-family networks get the TON
/// adapter, everything else the EVM adapter. No network I/O happens
/// here; a missing client binding is a configuration error.
pub fn create_chain_adapter(
    chain: &ChainConfig,
    clients: &ClientRegistry,
    index: Arc<dyn AnchorIndex>,
) -> Result<Arc<dyn ChainAdapter>, AnchorError> {
    match chain.family() {
        ChainFamily::Ton => Ok(Arc::new(TonAnchorAdapter::new(
            chain,
            clients.ton()?,
            index,
        ))),
        ChainFamily::Evm => Ok(Arc::new(EvmAnchorAdapter::new(
            chain,
            clients.evm()?,
            index,
        ))),
    }
}
