// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, TxHash, U256};
use crate::contract::transactions::Transactions::TransactionsInstance;
use crate::ledger::{LedgerBinding, LedgerRecord, NewRecord};
use alloy::network::ReceiptResponse;
use alloy::providers::{Network, Provider};
use alloy::sol;
use alloy::transports::{RpcError, Transport, TransportErrorKind};
use async_trait::async_trait;
use std::time::Duration;

/// How often the node is asked for the receipt of a pending append.
pub const INCLUSION_POLL_INTERVAL: Duration = Duration::from_secs(1);

sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract Transactions {
        struct TransferStruct {
            address sender;
            address receiver;
            uint256 amount;
            string message;
            uint256 timestamp;
            string keyword;
        }

        event Transfer(address from, address receiver, uint256 amount, string message, uint256 timestamp, string keyword);

        function addToBlockchain(address receiver, uint256 amount, string memory message, string memory keyword) public;

        function getAllTransactions() public view returns (TransferStruct[] memory);

        function getTransactionCount() public view returns (uint256);
    }
);

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ContractError(#[from] alloy::contract::Error),
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error("Transaction count {0} does not fit in 64 bits")]
    CountOverflow(U256),
    #[error("Transaction {0:?} was reverted")]
    TransactionReverted(TxHash),
}

impl From<Transactions::TransferStruct> for LedgerRecord {
    fn from(transfer: Transactions::TransferStruct) -> Self {
        Self {
            sender: transfer.sender,
            receiver: transfer.receiver,
            amount: transfer.amount,
            message: transfer.message,
            timestamp: transfer.timestamp,
            keyword: transfer.keyword,
        }
    }
}

fn count_from_chain(count: U256) -> Result<u64, Error> {
    u64::try_from(count).map_err(|_| {
        error!("Transaction count {count} does not fit in 64 bits");
        Error::CountOverflow(count)
    })
}

pub struct TransactionsLedger<T: Transport + Clone, P: Provider<T, N>, N: Network> {
    pub contract: TransactionsInstance<T, P, N>,
}

impl<T, P, N> TransactionsLedger<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N>,
    N: Network,
{
    /// Create a new Transactions contract instance.
    pub fn new(contract_address: Address, provider: P) -> Self {
        let contract = Transactions::new(contract_address, provider);
        TransactionsLedger { contract }
    }
}

#[async_trait]
impl<T, P, N> LedgerBinding for TransactionsLedger<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N>,
    N: Network,
{
    async fn all_records(&self) -> Result<Vec<LedgerRecord>, Error> {
        debug!("Getting all transactions from the ledger");
        let transfers = self
            .contract
            .getAllTransactions()
            .call()
            .await
            .inspect_err(|err| error!("Error getting all transactions: {err:?}"))?
            ._0;
        debug!("The ledger holds {} transactions", transfers.len());
        Ok(transfers.into_iter().map(LedgerRecord::from).collect())
    }

    async fn record_count(&self) -> Result<u64, Error> {
        let count = self
            .contract
            .getTransactionCount()
            .call()
            .await
            .inspect_err(|err| error!("Error getting the transaction count: {err:?}"))?
            ._0;
        debug!("Transaction count is {count}");
        count_from_chain(count)
    }

    async fn append_record(&self, record: NewRecord) -> Result<TxHash, Error> {
        let NewRecord {
            receiver,
            amount,
            message,
            keyword,
        } = record;
        debug!("Appending record of raw amt {amount} to {receiver:?} with keyword {keyword:?}");
        let call = self
            .contract
            .addToBlockchain(receiver, amount, message, keyword);
        let pending_tx_builder = call.send().await.inspect_err(|err| {
            error!("Error appending record for receiver {receiver:?}: {err:?}")
        })?;

        let pending_tx_hash = *pending_tx_builder.tx_hash();
        debug!("The append for receiver {receiver:?} is pending with tx_hash: {pending_tx_hash:?}");
        Ok(pending_tx_hash)
    }

    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> Result<(), Error> {
        loop {
            let maybe_receipt = self
                .contract
                .provider()
                .get_transaction_receipt(tx_hash)
                .await
                .inspect_err(|err| {
                    error!("Error getting the receipt of tx with hash {tx_hash:?}: {err:?}")
                })?;

            match maybe_receipt {
                Some(receipt) if receipt.status() => {
                    debug!("Tx with hash {tx_hash:?} is included");
                    return Ok(());
                }
                Some(_) => {
                    error!("Tx with hash {tx_hash:?} was reverted");
                    return Err(Error::TransactionReverted(tx_hash));
                }
                None => {
                    trace!("Tx with hash {tx_hash:?} is not included yet");
                    tokio::time::sleep(INCLUSION_POLL_INTERVAL).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_struct_should_map_onto_a_ledger_record() {
        let transfer = Transactions::TransferStruct {
            sender: Address::repeat_byte(0x11),
            receiver: Address::repeat_byte(0x22),
            amount: U256::from(1_500_000_000_000_000_000_u64),
            message: "for the pizza".to_string(),
            timestamp: U256::from(1_700_000_000_u64),
            keyword: "pizza".to_string(),
        };

        assert_eq!(
            LedgerRecord::from(transfer),
            LedgerRecord {
                sender: Address::repeat_byte(0x11),
                receiver: Address::repeat_byte(0x22),
                amount: U256::from(1_500_000_000_000_000_000_u64),
                message: "for the pizza".to_string(),
                timestamp: U256::from(1_700_000_000_u64),
                keyword: "pizza".to_string(),
            }
        );
    }

    #[test]
    fn count_beyond_64_bits_should_overflow() {
        assert!(matches!(count_from_chain(U256::from(42_u64)), Ok(42)));
        assert!(matches!(
            count_from_chain(U256::from(u64::MAX)),
            Ok(u64::MAX)
        ));

        let too_many = U256::from(u64::MAX) + U256::from(1_u64);
        assert!(matches!(
            count_from_chain(too_many),
            Err(Error::CountOverflow(count)) if count == too_many
        ));
    }
}
