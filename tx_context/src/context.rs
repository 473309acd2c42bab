// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::form::{FormData, FormField};
use crate::host::{UiHost, MISSING_WALLET_ALERT};
use crate::storage::CountStore;
use crate::view::TransactionView;
use txlib::common::{Address, TxHash, NATIVE_TRANSFER_GAS_LIMIT};
use txlib::ledger::LedgerBinding;
use txlib::wallet::{NativeTransfer, WalletGateway};

/// What came of a send request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// There was no wallet to send with; the host has been alerted.
    WalletMissing,
    Submitted {
        transfer_tx: TxHash,
        record_tx: TxHash,
    },
}

/// The state a host UI renders, and the actions it can take on it.
///
/// `connection` is `None` when no wallet provider is present. Every operation that needs
/// one alerts the host instead of failing, apart from `refresh_count`.
pub struct TransactionContext<W, L, S, H> {
    connection: Option<Connection<W, L>>,
    store: S,
    host: H,
    connected_account: Option<Address>,
    form_data: FormData,
    transactions: Vec<TransactionView>,
    is_loading: bool,
    transaction_count: u64,
}

impl<W, L, S, H> TransactionContext<W, L, S, H>
where
    W: WalletGateway,
    L: LedgerBinding,
    S: CountStore,
    H: UiHost,
{
    pub fn new(connection: Option<Connection<W, L>>, store: S, host: H) -> Self {
        let transaction_count = match store.load() {
            Ok(count) => count.unwrap_or_default(),
            Err(err) => {
                warn!("Ignoring the cached transaction count: {err}");
                0
            }
        };
        Self {
            connection,
            store,
            host,
            connected_account: None,
            form_data: FormData::default(),
            transactions: Vec::new(),
            is_loading: false,
            transaction_count,
        }
    }

    /// Run once when the host first shows the context. Never fails; problems are logged.
    pub async fn mount(&mut self) {
        if let Err(err) = self.check_connected().await {
            error!("Error checking the wallet connection: {err}");
        }
        if self.connection.is_some() {
            if let Err(err) = self.refresh_count().await {
                error!("Error refreshing the transaction count: {err}");
            }
        }
    }

    /// Ask the wallet for account access. Returns the account that became active.
    pub async fn connect(&mut self) -> Result<Option<Address>> {
        let Some(connection) = &self.connection else {
            self.host.alert(MISSING_WALLET_ALERT);
            return Ok(None);
        };

        let accounts = connection
            .wallet
            .request_accounts()
            .await
            .inspect_err(|err| error!("Error requesting wallet accounts: {err:?}"))?;
        let account = *accounts.first().ok_or_else(|| {
            error!("The wallet returned no accounts");
            Error::NoAuthorizedAccount
        })?;

        info!("Connected account {account:?}");
        self.connected_account = Some(account);
        Ok(Some(account))
    }

    /// Pick up an account authorized in an earlier session, without prompting, and load the
    /// transfers if there is one.
    pub async fn check_connected(&mut self) -> Result<()> {
        let Some(connection) = &self.connection else {
            self.host.alert(MISSING_WALLET_ALERT);
            return Ok(());
        };

        let accounts = connection
            .wallet
            .accounts()
            .await
            .inspect_err(|err| error!("Error listing authorized accounts: {err:?}"))?;
        let Some(account) = accounts.first().copied() else {
            info!("No authorized accounts found");
            return Ok(());
        };

        debug!("Found authorized account {account:?}");
        self.connected_account = Some(account);
        self.load_all().await
    }

    /// Replace the transfer list with a fresh read of the ledger. On failure the previous
    /// list is kept.
    pub async fn load_all(&mut self) -> Result<()> {
        let Some(connection) = &self.connection else {
            self.host.alert(MISSING_WALLET_ALERT);
            return Ok(());
        };

        let records = connection
            .ledger
            .all_records()
            .await
            .inspect_err(|err| error!("Error reading the ledger: {err:?}"))?;
        let transactions = records
            .into_iter()
            .map(TransactionView::try_from)
            .collect::<Result<Vec<_>>>()
            .inspect_err(|err| error!("Error projecting ledger records: {err}"))?;

        debug!("Loaded {} transactions", transactions.len());
        self.transactions = transactions;
        Ok(())
    }

    /// Read the number of records on the ledger and cache it.
    pub async fn refresh_count(&mut self) -> Result<u64> {
        let connection = self.connection.as_ref().ok_or(Error::WalletNotPresent)?;

        let count = connection
            .ledger
            .record_count()
            .await
            .inspect_err(|err| error!("Error reading the transaction count: {err:?}"))?;
        self.transaction_count = count;
        self.store.save(count)?;
        Ok(count)
    }

    /// Send the value in the form to its recipient, then append the record to the ledger and
    /// wait for it to be included.
    ///
    /// The two steps are separate transactions. If the second one fails the transfer has still
    /// happened, and the error carries its hash.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let Some(connection) = &self.connection else {
            self.host.alert(MISSING_WALLET_ALERT);
            return Ok(SubmitOutcome::WalletMissing);
        };
        let from = self.connected_account.ok_or(Error::AccountNotConnected)?;
        let record = self
            .form_data
            .to_record()
            .inspect_err(|err| error!("Error reading the form: {err}"))?;

        let transfer = NativeTransfer {
            from,
            to: record.receiver,
            gas_limit: NATIVE_TRANSFER_GAS_LIMIT,
            value: record.amount,
        };
        let transfer_tx = connection
            .wallet
            .send_native_transfer(transfer)
            .await
            .inspect_err(|err| error!("Error sending the transfer: {err:?}"))?;

        let record_tx = connection
            .ledger
            .append_record(record)
            .await
            .map_err(|source| {
                error!("Transfer {transfer_tx:?} was sent but its record was not appended: {source:?}");
                Error::RecordNotAppended {
                    transfer_tx,
                    source,
                }
            })?;

        self.is_loading = true;
        info!("Loading transaction - {record_tx:?}");
        let included = connection.ledger.wait_for_inclusion(record_tx).await;
        self.is_loading = false;
        included.map_err(|source| {
            error!("Record tx {record_tx:?} was not included: {source:?}");
            Error::RecordNotAppended {
                transfer_tx,
                source,
            }
        })?;
        info!("Success - {record_tx:?}");

        self.refresh_count().await?;
        self.host.request_resync();
        Ok(SubmitOutcome::Submitted {
            transfer_tx,
            record_tx,
        })
    }

    /// Re-read everything the context shows from the wallet and the ledger.
    pub async fn resync(&mut self) -> Result<()> {
        self.check_connected().await?;
        self.refresh_count().await?;
        Ok(())
    }

    pub fn handle_change(&mut self, field: FormField, value: impl Into<String>) {
        self.form_data.set(field, value);
    }

    pub fn set_form_data(&mut self, form_data: FormData) {
        self.form_data = form_data;
    }

    pub fn reset_form(&mut self) {
        self.form_data = FormData::default();
    }

    pub fn connected_account(&self) -> Option<Address> {
        self.connected_account
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn transactions(&self) -> &[TransactionView] {
        &self.transactions
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn transaction_count(&self) -> u64 {
        self.transaction_count
    }

    pub fn count_store(&self) -> &S {
        &self.store
    }
}
