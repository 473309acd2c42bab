// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Amount, TxHash, U256};
use crate::contract::transactions::Error;
use async_trait::async_trait;

/// One transfer entry as stored by the `Transactions` contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerRecord {
    pub sender: Address,
    pub receiver: Address,
    pub amount: Amount,
    pub message: String,
    /// Seconds since the unix epoch.
    pub timestamp: U256,
    pub keyword: String,
}

/// A record to append to the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecord {
    pub receiver: Address,
    pub amount: Amount,
    pub message: String,
    pub keyword: String,
}

/// Access to the authoritative list of transfer records.
#[async_trait]
pub trait LedgerBinding: Send + Sync {
    /// Read every record, oldest first.
    async fn all_records(&self) -> Result<Vec<LedgerRecord>, Error>;

    async fn record_count(&self) -> Result<u64, Error>;

    /// Submit an append and return the hash of the pending transaction.
    async fn append_record(&self, record: NewRecord) -> Result<TxHash, Error>;

    /// Resolves once the transaction has a successful receipt.
    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> Result<(), Error>;
}
