#![allow(dead_code)]

use alloy::network::{Ethereum, EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::providers::Provider;
use alloy::signers::local::PrivateKeySigner;
use txlib::common::Address;
use txlib::utils::{http_provider_with_wallet, HttpTransport, HttpWalletProvider};

/// Runs an Anvil node.
pub fn start_anvil_node() -> eyre::Result<AnvilInstance> {
    // Requires you to have Foundry installed: https://book.getfoundry.sh/getting-started/installation
    let anvil = Anvil::new().try_spawn()?;
    println!("Anvil running at `{}`", anvil.endpoint());
    Ok(anvil)
}

/// A provider signing with the node's first dev account.
pub fn dev_account_provider(anvil: &AnvilInstance) -> eyre::Result<HttpWalletProvider> {
    let signer: PrivateKeySigner = anvil.keys()[0].clone().into();
    let wallet = EthereumWallet::from(signer);
    Ok(http_provider_with_wallet(anvil.endpoint().parse()?, wallet))
}

/// EVM code that ignores its input and returns `data`.
///
/// Used as runtime code it answers every call with canned return data; wrapped once more it is
/// the init code deploying that contract.
pub fn returning_code(data: &[u8]) -> Vec<u8> {
    const PREFIX_LEN: u8 = 14;
    let [len_hi, len_lo] = u16::try_from(data.len())
        .expect("canned data fits in a PUSH2")
        .to_be_bytes();

    let mut code = vec![
        0x61, len_hi, len_lo, // PUSH2 len
        0x60, PREFIX_LEN, // PUSH1 offset of the data
        0x60, 0x00, // PUSH1 0
        0x39, // CODECOPY
        0x61, len_hi, len_lo, // PUSH2 len
        0x60, 0x00, // PUSH1 0
        0xf3, // RETURN
    ];
    code.extend_from_slice(data);
    code
}

/// Deploys a contract answering every call with `data` and returns its address.
pub async fn deploy_returning_contract<P>(provider: &P, data: &[u8]) -> eyre::Result<Address>
where
    P: Provider<HttpTransport, Ethereum>,
{
    let request = provider
        .transaction_request()
        .with_deploy_code(returning_code(&returning_code(data)));
    let receipt = provider
        .send_transaction(request)
        .await?
        .get_receipt()
        .await?;
    receipt
        .contract_address()
        .ok_or_else(|| eyre::eyre!("the deploy receipt has no contract address"))
}
