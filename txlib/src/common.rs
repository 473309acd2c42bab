// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

pub type Address = alloy::primitives::Address;
pub type TxHash = alloy::primitives::TxHash;
pub type U256 = alloy::primitives::U256;
/// Raw value in wei.
pub type Amount = U256;
pub type EthereumWallet = alloy::network::EthereumWallet;

/// Gas allowance for a plain value transfer (`0x5208`).
pub const NATIVE_TRANSFER_GAS_LIMIT: u64 = 21_000;
