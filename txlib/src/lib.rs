// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#[macro_use]
extern crate tracing;

use crate::common::Address;
use alloy::transports::http::reqwest;
use std::str::FromStr;
use std::sync::LazyLock;

pub mod common;
pub mod contract;
pub mod ledger;
pub mod utils;
pub mod wallet;

static LOCAL_NODE_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "http://localhost:8545"
        .parse()
        .expect("Invalid RPC URL")
});

#[derive(Clone, Debug, PartialEq)]
pub struct CustomNetwork {
    pub rpc_url_http: reqwest::Url,
    pub transactions_address: Address,
}

impl CustomNetwork {
    pub fn new(rpc_url: &str, transactions_addr: &str) -> Result<Self, utils::Error> {
        let rpc_url_http = reqwest::Url::parse(rpc_url).map_err(|err| {
            utils::Error::FailedToGetEvmNetwork(format!("invalid RPC URL {rpc_url:?}: {err}"))
        })?;
        let transactions_address = Address::from_str(transactions_addr).map_err(|err| {
            utils::Error::FailedToGetEvmNetwork(format!(
                "invalid transactions contract address {transactions_addr:?}: {err}"
            ))
        })?;

        Ok(Self {
            rpc_url_http,
            transactions_address,
        })
    }
}

/// The chain the `Transactions` contract lives on.
#[derive(Clone, Debug, PartialEq)]
pub enum Network {
    /// A development node on `localhost:8545`, with the contract at the given address.
    Local(Address),
    Custom(CustomNetwork),
}

impl Network {
    pub fn identifier(&self) -> &str {
        match self {
            Network::Local(_) => "local",
            Network::Custom(_) => "custom",
        }
    }

    pub fn rpc_url(&self) -> &reqwest::Url {
        match self {
            Network::Local(_) => &LOCAL_NODE_HTTP_RPC_URL,
            Network::Custom(custom) => &custom.rpc_url_http,
        }
    }

    pub fn transactions_address(&self) -> &Address {
        match self {
            Network::Local(address) => address,
            Network::Custom(custom) => &custom.transactions_address,
        }
    }
}
