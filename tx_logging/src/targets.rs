// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing_core::Level;
use tracing_subscriber::filter::Targets;

/// Overrides the builder's targets, e.g. `TX_LOG=tx_context=DEBUG,txlib=INFO`.
pub const LOG_ENV_VAR: &str = "TX_LOG";

// Everything in the workspace at TRACE
const ALL_KEYWORD: &str = "all";
// Like `all`, but the EVM plumbing at DEBUG
const VERBOSE_KEYWORD: &str = "v";

const WORKSPACE_CRATES: [&str; 3] = ["tx_context", "tx_logging", "txlib"];

/// The level each log target is enabled at.
///
/// Parsed from a comma separated list of `target=LEVEL` pairs and the `all` / `v` keywords.
/// A bare target is enabled at TRACE. Explicit pairs win over keywords, wherever they appear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogTargets(BTreeMap<String, Level>);

impl LogTargets {
    pub fn new<T: Into<String>>(targets: impl IntoIterator<Item = (T, Level)>) -> Self {
        Self(
            targets
                .into_iter()
                .map(|(target, level)| (target.into(), level))
                .collect(),
        )
    }

    /// The targets in `TX_LOG`, if it is set.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(LOG_ENV_VAR) {
            Ok(value) => Ok(Some(value.parse()?)),
            Err(_) => Ok(None),
        }
    }

    pub fn level_of(&self, target: &str) -> Option<Level> {
        self.0.get(target).copied()
    }

    pub(crate) fn filter(&self) -> Targets {
        Targets::new().with_targets(self.0.iter().map(|(target, level)| (target.clone(), *level)))
    }
}

impl FromStr for LogTargets {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let mut keyword_levels = BTreeMap::new();
        let mut explicit_levels = BTreeMap::new();

        for entry in value.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            match entry {
                ALL_KEYWORD => {
                    for name in WORKSPACE_CRATES {
                        keyword_levels.insert(name.to_string(), Level::TRACE);
                    }
                }
                VERBOSE_KEYWORD => {
                    for name in WORKSPACE_CRATES {
                        keyword_levels.entry(name.to_string()).or_insert(Level::TRACE);
                    }
                    keyword_levels.insert("txlib".to_string(), Level::DEBUG);
                }
                pair => {
                    let (target, level) = match pair.split_once('=') {
                        Some((target, level)) => (target.trim(), level.trim()),
                        None => (pair, "trace"),
                    };
                    if target.is_empty() {
                        return Err(Error::MissingTarget(pair.to_string()));
                    }
                    let level = Level::from_str(level).map_err(|_| Error::InvalidLevel {
                        target: target.to_string(),
                        level: level.to_string(),
                    })?;
                    explicit_levels.insert(target.to_string(), level);
                }
            }
        }

        keyword_levels.extend(explicit_levels);
        Ok(Self(keyword_levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;

    #[test]
    fn explicit_targets_should_win_over_keywords() -> Result<()> {
        let targets: LogTargets = "tx_context=ERROR,all,alloy".parse()?;

        assert_eq!(targets.level_of("tx_context"), Some(Level::ERROR));
        assert_eq!(targets.level_of("tx_logging"), Some(Level::TRACE));
        assert_eq!(targets.level_of("txlib"), Some(Level::TRACE));
        assert_eq!(targets.level_of("alloy"), Some(Level::TRACE));
        Ok(())
    }

    #[test]
    fn verbose_keyword_should_debug_the_evm_plumbing() -> Result<()> {
        let targets: LogTargets = " v , tx_logging=warn ".parse()?;

        assert_eq!(targets.level_of("txlib"), Some(Level::DEBUG));
        assert_eq!(targets.level_of("tx_context"), Some(Level::TRACE));
        assert_eq!(targets.level_of("tx_logging"), Some(Level::WARN));
        Ok(())
    }

    #[test]
    fn bad_entries_should_be_rejected() {
        assert!(matches!(
            "txlib=LOUD".parse::<LogTargets>(),
            Err(Error::InvalidLevel { target, level }) if target == "txlib" && level == "LOUD"
        ));
        assert!(matches!(
            "=info".parse::<LogTargets>(),
            Err(Error::MissingTarget(_))
        ));
    }

    #[test]
    fn empty_value_should_enable_nothing() -> Result<()> {
        assert_eq!("".parse::<LogTargets>()?, LogTargets::default());
        Ok(())
    }
}
