//! Batching several calls to one contract into a single transaction.
//!
//! Ajna pools inherit OpenZeppelin's `Multicall`, which executes a list of
//! encoded calls against the pool itself and reverts if any of them does.

use alloy::primitives::Bytes;
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    #[sol(rpc)]
    interface IMulticall {
        function multicall(bytes[] calldata data) external returns (bytes[] memory results);
    }
}

/// Ordered list of encoded calls to a single contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MulticallBatch {
    calls: Vec<Bytes>,
}

impl MulticallBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a typed call.
    pub fn add<C: SolCall>(mut self, call: &C) -> Self {
        self.push(call);
        self
    }

    /// Appends a typed call in place.
    pub fn push<C: SolCall>(&mut self, call: &C) {
        self.calls.push(Bytes::from(call.abi_encode()));
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Encoded calls, in execution order.
    pub fn calls(&self) -> &[Bytes] {
        &self.calls
    }

    /// Builds the `multicall(bytes[])` call.
    pub fn into_call(self) -> IMulticall::multicallCall {
        IMulticall::multicallCall { data: self.calls }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::IPool;
    use alloy::primitives::U256;

    #[test]
    fn test_batch_preserves_order() {
        let update = IPool::updateInterestCall {};
        let remove = IPool::removeQuoteTokenCall {
            maxAmount: U256::from(5),
            index: U256::from(2000),
        };

        let batch = MulticallBatch::new().add(&update).add(&remove);

        assert_eq!(batch.len(), 2);
        assert_eq!(&batch.calls()[0][..4], &IPool::updateInterestCall::SELECTOR);
        assert_eq!(&batch.calls()[1][..4], &IPool::removeQuoteTokenCall::SELECTOR);
    }

    #[test]
    fn test_into_call_encodes_multicall() {
        let mut batch = MulticallBatch::new();
        assert!(batch.is_empty());
        batch.push(&IPool::updateInterestCall {});

        let call = batch.into_call();
        let calldata = call.abi_encode();

        // multicall(bytes[])
        assert_eq!(&calldata[..4], &[0xac, 0x96, 0x50, 0xd8]);

        let decoded = IMulticall::multicallCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.data.len(), 1);
        assert_eq!(
            decoded.data[0],
            Bytes::from(IPool::updateInterestCall {}.abi_encode())
        );
    }
}
