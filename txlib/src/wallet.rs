// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Amount, TxHash};
use alloy::network::{EthereumWallet, Network, NetworkWallet, TransactionBuilder};
use alloy::providers::{Provider, WalletProvider};
use alloy::signers::local::{LocalSigner, PrivateKeySigner};
use alloy::transports::{RpcError, Transport, TransportErrorKind};
use async_trait::async_trait;
use std::marker::PhantomData;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error("Private key is invalid")]
    PrivateKeyInvalid,
}

/// A plain value transfer between two accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeTransfer {
    pub from: Address,
    pub to: Address,
    pub gas_limit: u64,
    pub value: Amount,
}

/// Access to the user's accounts and their ability to move native value.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Ask for access to the user's accounts. The first address is the active one.
    async fn request_accounts(&self) -> Result<Vec<Address>, Error>;

    /// Accounts that have already been authorized, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>, Error>;

    async fn send_native_transfer(&self, transfer: NativeTransfer) -> Result<TxHash, Error>;
}

/// Gateway for accounts managed by the RPC endpoint itself, e.g. an injected or remote signer.
pub struct NodeWalletGateway<T, P, N> {
    provider: P,
    _phantom: PhantomData<(T, N)>,
}

impl<T, P, N> NodeWalletGateway<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N>,
    N: Network,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<T, P, N> WalletGateway for NodeWalletGateway<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N>,
    N: Network,
{
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        debug!("Requesting account access from the wallet");
        let accounts: Vec<Address> = self
            .provider
            .raw_request("eth_requestAccounts".into(), ())
            .await
            .inspect_err(|err| error!("Error requesting accounts: {err:?}"))?;
        debug!("Wallet authorized {} accounts", accounts.len());
        Ok(accounts)
    }

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .inspect_err(|err| error!("Error getting authorized accounts: {err:?}"))?;
        Ok(accounts)
    }

    async fn send_native_transfer(&self, transfer: NativeTransfer) -> Result<TxHash, Error> {
        send_native_transfer(&self.provider, transfer).await
    }
}

/// Gateway backed by a local `EthereumWallet`; every signer it holds counts as authorized.
pub struct SignerWalletGateway<T, P, N> {
    provider: P,
    _phantom: PhantomData<(T, N)>,
}

impl<T, P, N> SignerWalletGateway<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + WalletProvider<N>,
    N: Network,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _phantom: PhantomData,
        }
    }

    fn signer_accounts(&self) -> Vec<Address> {
        let default_signer = self.provider.default_signer_address();
        let mut accounts = vec![default_signer];
        accounts.extend(
            self.provider
                .signer_addresses()
                .filter(|address| *address != default_signer),
        );
        accounts
    }
}

#[async_trait]
impl<T, P, N> WalletGateway for SignerWalletGateway<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + WalletProvider<N>,
    N: Network,
{
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        Ok(self.signer_accounts())
    }

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        Ok(self.signer_accounts())
    }

    async fn send_native_transfer(&self, transfer: NativeTransfer) -> Result<TxHash, Error> {
        send_native_transfer(&self.provider, transfer).await
    }
}

async fn send_native_transfer<T, P, N>(
    provider: &P,
    transfer: NativeTransfer,
) -> Result<TxHash, Error>
where
    T: Transport + Clone,
    P: Provider<T, N>,
    N: Network,
{
    let NativeTransfer {
        from,
        to,
        gas_limit,
        value,
    } = transfer;
    debug!("Transferring raw amt {value} from {from:?} to {to:?}");

    let transaction_request = provider
        .transaction_request()
        .with_from(from)
        .with_to(to)
        .with_gas_limit(gas_limit)
        .with_value(value);

    let pending_tx_builder = provider
        .send_transaction(transaction_request)
        .await
        .inspect_err(|err| error!("Error transferring raw amt {value} to {to:?}: {err:?}"))?;

    let tx_hash = *pending_tx_builder.tx_hash();
    debug!("The transfer to {to:?} is pending with tx_hash: {tx_hash:?}");
    Ok(tx_hash)
}

/// Generate a wallet with a random key.
pub fn random() -> EthereumWallet {
    let signer: PrivateKeySigner = LocalSigner::random();
    EthereumWallet::from(signer)
}

/// Load a wallet from a hex encoded private key.
pub fn from_private_key(private_key: &str) -> Result<EthereumWallet, Error> {
    let signer: PrivateKeySigner = private_key.parse().map_err(|err| {
        error!("Error parsing private key: {err}");
        Error::PrivateKeyInvalid
    })?;
    Ok(EthereumWallet::from(signer))
}

/// Returns the address of the wallet's default signer.
pub fn wallet_address(wallet: &EthereumWallet) -> Address {
    <EthereumWallet as NetworkWallet<alloy::network::Ethereum>>::default_signer_address(wallet)
}
