// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Logging setup for hosts of the transfer ledger client, and for its tests.

mod error;
mod targets;

use crate::error::Result;
use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::NonBlocking;
use tracing_core::dispatcher::DefaultGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

pub use error::Error;
pub use targets::{LogTargets, LOG_ENV_VAR};
pub use tracing_appender::non_blocking::WorkerGuard;
pub use tracing_core::Level;

/// The name of the active log file; rotated files get a `.N` suffix.
pub const LOG_FILE_NAME: &str = "tx_ledger.log";

const MAX_LOG_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_MAX_LOG_FILES: usize = 10;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutputDest {
    Stderr,
    Stdout,
    /// A directory, created if needed, holding `tx_ledger.log` and its rotations.
    Path(PathBuf),
}

pub struct LogBuilder {
    targets: LogTargets,
    output_dest: LogOutputDest,
    max_log_files: usize,
}

impl LogBuilder {
    /// The targets are used unless `TX_LOG` is set. Logs go to stderr by default.
    pub fn new(targets: LogTargets) -> Self {
        Self {
            targets,
            output_dest: LogOutputDest::Stderr,
            max_log_files: DEFAULT_MAX_LOG_FILES,
        }
    }

    pub fn output_dest(&mut self, output_dest: LogOutputDest) {
        self.output_dest = output_dest;
    }

    /// How many rotated files to keep next to the active one.
    pub fn max_log_files(&mut self, files: usize) {
        self.max_log_files = files;
    }

    /// Sets the global subscriber. Hold on to the guard for as long as the process logs to a
    /// file, dropping it flushes what is still buffered.
    pub fn initialize(self) -> Result<Option<WorkerGuard>> {
        let (layer, guard) = self.layer()?;
        tracing_subscriber::registry()
            .with(layer)
            .try_init()
            .map_err(|_| Error::AlreadyInitialized)?;
        Ok(guard)
    }

    /// Sets the subscriber for the current thread only, until the returned `DefaultGuard` is
    /// dropped.
    pub fn set_default(self) -> Result<(Option<WorkerGuard>, DefaultGuard)> {
        let (layer, guard) = self.layer()?;
        let default_guard = tracing_subscriber::registry().with(layer).set_default();
        Ok((guard, default_guard))
    }

    /// Logs everything in the workspace and in the test file to a fresh directory under the data
    /// dir, or to stdout if there is none. Call it from a single threaded tokio test, or any test
    /// outside tokio.
    pub fn init_single_threaded_tokio_test(
        test_file_name: &str,
    ) -> (Option<WorkerGuard>, DefaultGuard) {
        let targets = format!("all,{test_file_name}=TRACE")
            .parse::<LogTargets>()
            .unwrap_or_else(|_| LogTargets::new([(test_file_name, Level::TRACE)]));

        let output_dest = match dirs_next::data_dir() {
            Some(dir) => {
                let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
                LogOutputDest::Path(
                    dir.join("tx_ledger")
                        .join("test_logs")
                        .join(format!("log_{timestamp}")),
                )
            }
            None => LogOutputDest::Stdout,
        };
        println!("Logging test at {test_file_name:?} to {output_dest:?}");

        let mut builder = LogBuilder::new(targets.clone());
        builder.output_dest(output_dest);
        match builder.set_default() {
            Ok(guards) => guards,
            Err(err) => {
                eprintln!("Failed to log the test to a file, using stdout instead: {err}");
                let layer: BoxedLayer = stdout_layer().with_filter(targets.filter()).boxed();
                (None, tracing_subscriber::registry().with(layer).set_default())
            }
        }
    }

    fn layer(self) -> Result<(BoxedLayer, Option<WorkerGuard>)> {
        let targets = LogTargets::from_env()?.unwrap_or(self.targets);
        let filter = targets.filter();

        match self.output_dest {
            LogOutputDest::Stdout => Ok((stdout_layer().with_filter(filter).boxed(), None)),
            LogOutputDest::Stderr => {
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .with_filter(filter)
                    .boxed();
                Ok((layer, None))
            }
            LogOutputDest::Path(dir) => {
                let (writer, guard) = rotating_writer(&dir, self.max_log_files)?;
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(filter)
                    .boxed();
                Ok((layer, Some(guard)))
            }
        }
    }
}

fn stdout_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing_core::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer().with_ansi(false)
}

/// Writes to `dir/tx_ledger.log` off the calling thread, rotating the file once it passes
/// `MAX_LOG_BYTES`.
fn rotating_writer(dir: &Path, max_log_files: usize) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let file = FileRotate::new(
        dir.join(LOG_FILE_NAME),
        AppendCount::new(max_log_files),
        ContentLimit::BytesSurpassed(MAX_LOG_BYTES),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(tracing_appender::non_blocking(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use color_eyre::Result;
    use predicates::prelude::*;

    #[test]
    fn path_dest_should_write_events_to_the_log_file() -> Result<()> {
        let tmp_dir = assert_fs::TempDir::new()?;
        let log_dir = tmp_dir.child("logs");

        let mut builder = LogBuilder::new(LogTargets::new([("tx_logging", Level::DEBUG)]));
        builder.output_dest(LogOutputDest::Path(log_dir.path().to_path_buf()));
        let (worker_guard, default_guard) = builder.set_default()?;

        tracing::debug!("count cache written");
        tracing::trace!("too fine to be kept");
        drop(default_guard);
        drop(worker_guard);

        let log_file = log_dir.child(LOG_FILE_NAME);
        log_file.assert(predicate::str::contains("count cache written"));
        log_file.assert(predicate::str::contains("too fine to be kept").not());
        Ok(())
    }
}
