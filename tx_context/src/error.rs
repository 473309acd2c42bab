// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use thiserror::Error;
use txlib::common::TxHash;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No wallet provider is present")]
    WalletNotPresent,
    #[error("No account has been connected yet")]
    AccountNotConnected,
    #[error("The wallet did not authorize any account")]
    NoAuthorizedAccount,
    #[error("Invalid recipient address {0:?}")]
    InvalidRecipient(String),
    #[error("Unknown form field {0:?}")]
    UnknownFormField(String),
    #[error("Invalid amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: String },
    #[error("Malformed ledger record: {0}")]
    MalformedRecord(String),
    /// The native transfer went through but the ledger never got its record.
    #[error("Transfer {transfer_tx:?} was sent but its record was not appended: {source}")]
    RecordNotAppended {
        transfer_tx: TxHash,
        source: txlib::contract::transactions::Error,
    },
    #[error("Stored value under {key:?} is corrupt: {value:?}")]
    CorruptStorage { key: String, value: String },
    #[error("Could not obtain the data directory")]
    DataDirUnavailable,

    #[error(transparent)]
    Wallet(#[from] txlib::wallet::Error),
    #[error(transparent)]
    Ledger(#[from] txlib::contract::transactions::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
