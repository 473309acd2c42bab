// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Amount};
use crate::contract::transactions::TransactionsLedger;
use crate::wallet::{NodeWalletGateway, SignerWalletGateway};
use crate::{CustomNetwork, Network};
use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::utils::{format_ether, parse_units, ParseUnits, UnitsError};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{Identity, ProviderBuilder, ReqwestProvider};
use alloy::transports::http::{reqwest, Client, Http};
use rand::Rng;
use std::env;
use std::str::FromStr;

/// environment variable to connect to a custom EVM network
pub const RPC_URL: &str = "RPC_URL";
const RPC_URL_BUILD_TIME_VAL: Option<&str> = option_env!("RPC_URL");
pub const TRANSACTIONS_ADDRESS: &str = "TRANSACTIONS_ADDRESS";
const TRANSACTIONS_ADDRESS_BUILD_TIME_VAL: Option<&str> = option_env!("TRANSACTIONS_ADDRESS");
/// Set to `local` to use a development node on `localhost:8545`.
pub const EVM_NETWORK: &str = "EVM_NETWORK";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to get EVM network: {0}")]
    FailedToGetEvmNetwork(String),
    #[error(transparent)]
    InvalidAmount(#[from] UnitsError),
    #[error("Amount {0:?} is negative")]
    NegativeAmount(String),
}

/// Generate a random Address.
pub fn dummy_address() -> Address {
    Address::new(rand::rngs::OsRng.gen())
}

/// Parse a decimal ether amount, e.g. `"0.0001"`, into wei. Negative amounts are rejected.
pub fn parse_amount(amount: &str) -> Result<Amount, Error> {
    let amount = amount.trim();
    match parse_units(amount, "ether")? {
        ParseUnits::U256(wei) => Ok(wei),
        ParseUnits::I256(_) => Err(Error::NegativeAmount(amount.to_string())),
    }
}

/// Render a wei amount as a decimal ether value without trailing zeros.
///
/// `1000000000000000000` renders as `1`, `1500000000000000000` as `1.5`.
pub fn format_amount(amount: Amount) -> String {
    let formatted = format_ether(amount);
    match formatted.split_once('.') {
        Some((units, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                units.to_string()
            } else {
                format!("{units}.{fraction}")
            }
        }
        None => formatted,
    }
}

/// Create a custom `Network` from the given values
pub fn get_evm_network(rpc_url: &str, transactions_address: &str) -> Result<Network, Error> {
    Ok(Network::Custom(CustomNetwork::new(
        rpc_url,
        transactions_address,
    )?))
}

/// Get the `Network` from environment variables
/// Returns an error if we cannot obtain the network from any means.
pub fn get_evm_network_from_env() -> Result<Network, Error> {
    let rpc_url = env::var(RPC_URL)
        .ok()
        .or_else(|| RPC_URL_BUILD_TIME_VAL.map(|s| s.to_string()));
    let transactions_address = env::var(TRANSACTIONS_ADDRESS)
        .ok()
        .or_else(|| TRANSACTIONS_ADDRESS_BUILD_TIME_VAL.map(|s| s.to_string()));

    let mut use_local_evm = env::var(EVM_NETWORK)
        .map(|v| v == "local")
        .unwrap_or(false);
    if use_local_evm {
        info!("Using local EVM network as {EVM_NETWORK} is set to 'local'");
    }
    if cfg!(feature = "local") {
        use_local_evm = true;
        info!("Using local EVM network as 'local' feature flag is enabled");
    }

    match (rpc_url, transactions_address) {
        (Some(rpc_url), Some(transactions_address)) if !use_local_evm => {
            info!("Using custom EVM network from environment variables");
            get_evm_network(&rpc_url, &transactions_address)
        }
        (_, Some(transactions_address)) if use_local_evm => {
            let address = Address::from_str(&transactions_address).map_err(|err| {
                Error::FailedToGetEvmNetwork(format!(
                    "invalid transactions contract address {transactions_address:?}: {err}"
                ))
            })?;
            Ok(Network::Local(address))
        }
        _ => {
            error!("Failed to obtain EVM Network through any means");
            Err(Error::FailedToGetEvmNetwork(format!(
                "missing env var, make sure to set {TRANSACTIONS_ADDRESS} and either {RPC_URL} or {EVM_NETWORK}=local"
            )))
        }
    }
}

pub type HttpTransport = Http<Client>;

#[allow(clippy::type_complexity)]
pub type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    ReqwestProvider,
    HttpTransport,
    Ethereum,
>;

#[allow(clippy::type_complexity)]
pub type HttpWalletProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    ReqwestProvider,
    HttpTransport,
    Ethereum,
>;

pub type HttpNodeWalletGateway = NodeWalletGateway<HttpTransport, HttpProvider, Ethereum>;
pub type HttpSignerWalletGateway =
    SignerWalletGateway<HttpTransport, HttpWalletProvider, Ethereum>;
pub type HttpTransactionsLedger<P> = TransactionsLedger<HttpTransport, P, Ethereum>;

/// A provider whose accounts are managed by the RPC endpoint.
pub fn http_provider(rpc_url: reqwest::Url) -> HttpProvider {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .on_http(rpc_url)
}

/// A provider that signs with the given local wallet.
pub fn http_provider_with_wallet(
    rpc_url: reqwest::Url,
    wallet: EthereumWallet,
) -> HttpWalletProvider {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(rpc_url)
}
