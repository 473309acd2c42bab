// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use txlib::common::Address;
use txlib::ledger::NewRecord;
use txlib::utils::parse_amount;

/// The pending transfer as typed by the user. All fields are free text until submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    pub address_to: String,
    /// Decimal ether, e.g. `0.0001`.
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::AddressTo => "addressTo",
            FormField::Amount => "amount",
            FormField::Keyword => "keyword",
            FormField::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = Error;

    /// Accepts the input names used by the page: `addressTo`, `amount`, `keyword`, `message`.
    fn from_str(name: &str) -> Result<Self> {
        match name {
            "addressTo" => Ok(FormField::AddressTo),
            "amount" => Ok(FormField::Amount),
            "keyword" => Ok(FormField::Keyword),
            "message" => Ok(FormField::Message),
            other => Err(Error::UnknownFormField(other.to_string())),
        }
    }
}

impl FormData {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::AddressTo => &mut self.address_to,
            FormField::Amount => &mut self.amount,
            FormField::Keyword => &mut self.keyword,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::AddressTo => &self.address_to,
            FormField::Amount => &self.amount,
            FormField::Keyword => &self.keyword,
            FormField::Message => &self.message,
        }
    }

    /// Parses the recipient and the amount, ready to be sent.
    pub fn to_record(&self) -> Result<NewRecord> {
        let receiver = Address::from_str(self.address_to.trim())
            .map_err(|_| Error::InvalidRecipient(self.address_to.clone()))?;
        let amount = parse_amount(&self.amount).map_err(|err| Error::InvalidAmount {
            amount: self.amount.clone(),
            reason: err.to_string(),
        })?;

        Ok(NewRecord {
            receiver,
            amount,
            message: self.message.clone(),
            keyword: self.keyword.clone(),
        })
    }
}
