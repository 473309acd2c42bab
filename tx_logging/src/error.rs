// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use thiserror::Error;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid log level {level:?} for target {target:?}")]
    InvalidLevel { target: String, level: String },
    #[error("Missing target name in {0:?}")]
    MissingTarget(String),
    #[error("A global subscriber has already been set")]
    AlreadyInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
