// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use txlib::common::EthereumWallet;
use txlib::contract::transactions::TransactionsLedger;
use txlib::utils::{
    http_provider, http_provider_with_wallet, HttpNodeWalletGateway, HttpProvider,
    HttpSignerWalletGateway, HttpTransactionsLedger, HttpWalletProvider,
};
use txlib::wallet::{NodeWalletGateway, SignerWalletGateway};
use txlib::Network;

/// A wallet gateway and a ledger binding that reach the chain through the same provider.
pub struct Connection<W, L> {
    pub wallet: W,
    pub ledger: L,
}

pub type NodeConnection = Connection<HttpNodeWalletGateway, HttpTransactionsLedger<HttpProvider>>;
pub type SignerConnection =
    Connection<HttpSignerWalletGateway, HttpTransactionsLedger<HttpWalletProvider>>;

impl<W, L> Connection<W, L> {
    pub fn new(wallet: W, ledger: L) -> Self {
        Self { wallet, ledger }
    }
}

/// Connect through an endpoint that manages its own accounts.
pub fn node_connection(network: &Network) -> NodeConnection {
    debug!("Connecting to {} through its own accounts", network.identifier());
    let provider = http_provider(network.rpc_url().clone());
    Connection::new(
        NodeWalletGateway::new(provider.clone()),
        TransactionsLedger::new(*network.transactions_address(), provider),
    )
}

/// Connect with a local wallet that signs every transaction.
pub fn signer_connection(network: &Network, wallet: EthereumWallet) -> SignerConnection {
    debug!("Connecting to {} with a local signer", network.identifier());
    let provider = http_provider_with_wallet(network.rpc_url().clone(), wallet);
    Connection::new(
        SignerWalletGateway::new(provider.clone()),
        TransactionsLedger::new(*network.transactions_address(), provider),
    )
}
