// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#[cfg(test)]
use mockall::automock;

/// Shown when there is no wallet provider to talk to.
pub const MISSING_WALLET_ALERT: &str = "Please install a wallet";

/// The UI the facade reports to.
#[cfg_attr(test, automock)]
pub trait UiHost {
    /// Show a blocking notice to the user.
    fn alert(&self, message: &str);

    /// Ask the host to rebuild its view of the facade from scratch.
    fn request_resync(&self);
}

/// A host without a screen; notices go to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHost;

impl UiHost for TracingHost {
    fn alert(&self, message: &str) {
        warn!("{message}");
    }

    fn request_resync(&self) {
        info!("Resync requested");
    }
}
