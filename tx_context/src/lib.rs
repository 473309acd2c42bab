// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! State and actions behind a transfer ledger UI.
//!
//! A [`TransactionContext`] connects to the user's wallet, lists the transfers recorded by the
//! `Transactions` contract and submits new ones. The host UI reads its state through accessors
//! and is told, through [`UiHost`], when to alert the user or rebuild its view.

#[macro_use]
extern crate tracing;

pub mod connection;
pub mod context;
pub mod error;
pub mod form;
pub mod host;
pub mod storage;
pub mod view;

pub use connection::{node_connection, signer_connection, Connection};
pub use context::{SubmitOutcome, TransactionContext};
pub use error::{Error, Result};
pub use form::{FormData, FormField};
pub use host::{TracingHost, UiHost, MISSING_WALLET_ALERT};
pub use storage::{CountStore, FileCountStore, MemoryCountStore, TRANSACTION_COUNT_KEY};
pub use view::TransactionView;
