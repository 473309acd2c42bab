// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::error::{Error, Result};
use chrono::{Local, TimeZone};
use txlib::common::{Address, U256};
use txlib::ledger::LedgerRecord;
use txlib::utils::format_amount;

/// `month/day/year, hour:minute:second AM|PM` in local time.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A ledger record as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionView {
    pub address_to: Address,
    pub address_from: Address,
    pub timestamp: String,
    pub message: String,
    pub keyword: String,
    /// Decimal ether.
    pub amount: String,
}

impl TryFrom<LedgerRecord> for TransactionView {
    type Error = Error;

    fn try_from(record: LedgerRecord) -> Result<Self> {
        Ok(Self {
            address_to: record.receiver,
            address_from: record.sender,
            timestamp: format_timestamp(record.timestamp)?,
            message: record.message,
            keyword: record.keyword,
            amount: format_amount(record.amount),
        })
    }
}

/// Formats a ledger timestamp, in seconds, as a local date-time.
pub fn format_timestamp(seconds: U256) -> Result<String> {
    let out_of_range = || Error::MalformedRecord(format!("timestamp {seconds} is out of range"));

    let seconds = u64::try_from(seconds).map_err(|_| out_of_range())?;
    let millis = i64::try_from(seconds)
        .ok()
        .and_then(|seconds| seconds.checked_mul(1000))
        .ok_or_else(out_of_range)?;
    let date_time = Local
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(out_of_range)?;

    Ok(date_time.format(TIMESTAMP_FORMAT).to_string())
}
