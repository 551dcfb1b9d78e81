// shopmail, a Rust library for sending shop emails.
// Copyright (C) 2022  soywod <clement.douin@posteo.net>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Module related to email addresses.

use lettre::{message::Mailbox, Address};
use std::{convert::TryFrom, fmt};

use super::{Error, Result};

/// Represents a single email address with its optional display
/// name. An empty name means no display name.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct MailAddress {
    pub name: String,
    pub email: String,
}

impl MailAddress {
    pub fn new<E: ToString>(email: E) -> Self {
        Self {
            name: String::new(),
            email: email.to_string(),
        }
    }

    pub fn with_name<N: ToString, E: ToString>(name: N, email: E) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Parses the email part into a [`lettre::Address`].
    pub fn address(&self) -> Result<Address> {
        self.email
            .trim()
            .parse()
            .map_err(|err| Error::ParseAddressError(err, self.email.to_owned()))
    }

    /// Converts the address into a sendable [`lettre::message::Mailbox`].
    pub fn to_mailbox(&self) -> Result<Mailbox> {
        let name = Some(self.name.trim())
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned);
        Ok(Mailbox::new(name, self.address()?))
    }
}

impl TryFrom<&MailAddress> for Mailbox {
    type Error = Error;

    fn try_from(addr: &MailAddress) -> Result<Self> {
        addr.to_mailbox()
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_mailbox() {
        let mbox = MailAddress::with_name("Alice", "alice@localhost")
            .to_mailbox()
            .unwrap();
        assert_eq!(Some("Alice".to_owned()), mbox.name);
        assert_eq!("alice@localhost", mbox.email.to_string());

        let mbox = MailAddress::with_name("  ", "bob@localhost")
            .to_mailbox()
            .unwrap();
        assert_eq!(None, mbox.name);
    }

    #[test]
    fn to_mailbox_with_invalid_email() {
        assert!(matches!(
            MailAddress::new("not an address").to_mailbox(),
            Err(Error::ParseAddressError(_, email)) if email == "not an address"
        ));
    }
}
