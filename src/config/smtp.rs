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

//! SMTP config module.
//!
//! This module contains the representation of the SMTP email sender
//! configuration of a shop.

use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use log::trace;
use std::fmt;

use super::{keys, ConfigStore, Error, Result, ShopId};

pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Represents the encryption used to talk to the SMTP server.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SmtpEncryption {
    /// Wraps the whole connection in TLS.
    Ssl,
    /// Upgrades the connection using STARTTLS.
    Tls,
}

impl SmtpEncryption {
    /// Parses the stored encryption mode. Only the exact values
    /// `ssl` and `tls` enable encryption.
    pub fn from_config_value(val: &str) -> Option<Self> {
        match val {
            "ssl" => Some(Self::Ssl),
            "tls" => Some(Self::Tls),
            _ => None,
        }
    }
}

impl fmt::Display for SmtpEncryption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ssl => write!(f, "ssl"),
            Self::Tls => write!(f, "tls"),
        }
    }
}

/// Represents the SMTP sender config.
#[derive(Clone, Eq, PartialEq)]
pub struct SmtpConfig {
    /// Represents the SMTP server host.
    pub host: String,
    /// Represents the SMTP server port.
    pub port: u16,
    /// Represents the optional encryption.
    pub encryption: Option<SmtpEncryption>,
    /// Represents the SMTP server login.
    pub login: String,
    /// Represents the SMTP server password.
    pub passwd: String,
}

impl SmtpConfig {
    /// Reads the SMTP settings of the given shop.
    pub fn from_store<C: ConfigStore + ?Sized>(config: &C, shop_id: Option<ShopId>) -> Result<Self> {
        let host = config
            .get_non_empty(keys::MAIL_SERVER, shop_id)
            .map(|host| host.trim().to_owned())
            .filter(|host| !host.is_empty())
            .ok_or(Error::InvalidSmtpServer)?;

        let port = match config.get_non_empty(keys::MAIL_SMTP_PORT, shop_id) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|err| Error::ParsePortError(err, port.to_owned()))?,
            None => DEFAULT_SMTP_PORT,
        };

        let encryption = config
            .get(keys::MAIL_SMTP_ENCRYPTION, shop_id)
            .and_then(|val| SmtpEncryption::from_config_value(&val));

        let smtp_config = Self {
            host,
            port,
            encryption,
            login: config.get(keys::MAIL_USER, shop_id).unwrap_or_default(),
            passwd: config.get(keys::MAIL_PASSWD, shop_id).unwrap_or_default(),
        };
        trace!("smtp config: {:?}", smtp_config);

        Ok(smtp_config)
    }

    /// Builds the SMTP sender credentials. No credentials are built
    /// when the login is empty.
    pub fn credentials(&self) -> Option<SmtpCredentials> {
        if self.login.is_empty() {
            None
        } else {
            Some(SmtpCredentials::new(
                self.login.to_owned(),
                self.passwd.to_owned(),
            ))
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("encryption", &self.encryption)
            .field("login", &self.login)
            .field("passwd", &"********")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::MemoryConfig;

    use super::*;

    #[test]
    fn from_store_requires_server() {
        let config = MemoryConfig::default();
        assert!(matches!(
            SmtpConfig::from_store(&config, None),
            Err(Error::InvalidSmtpServer)
        ));

        let config = MemoryConfig::default().with("PS_MAIL_SERVER", "   ");
        assert!(matches!(
            SmtpConfig::from_store(&config, None),
            Err(Error::InvalidSmtpServer)
        ));
    }

    #[test]
    fn from_store_with_defaults() {
        let config = MemoryConfig::default().with("PS_MAIL_SERVER", "localhost");
        let smtp_config = SmtpConfig::from_store(&config, None).unwrap();

        assert_eq!("localhost", smtp_config.host);
        assert_eq!(DEFAULT_SMTP_PORT, smtp_config.port);
        assert_eq!(None, smtp_config.encryption);
        assert!(smtp_config.credentials().is_none());
    }

    #[test]
    fn from_store_with_all_settings() {
        let config = MemoryConfig::default()
            .with("PS_MAIL_SERVER", "smtp.localhost")
            .with("PS_MAIL_SMTP_PORT", 465)
            .with("PS_MAIL_SMTP_ENCRYPTION", "ssl")
            .with("PS_MAIL_USER", "alice@localhost")
            .with("PS_MAIL_PASSWD", "password");
        let smtp_config = SmtpConfig::from_store(&config, Some(1)).unwrap();

        assert_eq!("smtp.localhost", smtp_config.host);
        assert_eq!(465, smtp_config.port);
        assert_eq!(Some(SmtpEncryption::Ssl), smtp_config.encryption);
        assert!(smtp_config.credentials().is_some());
        assert!(!format!("{:?}", smtp_config).contains("password"));
    }

    #[test]
    fn from_store_with_invalid_port() {
        let config = MemoryConfig::default()
            .with("PS_MAIL_SERVER", "smtp.localhost")
            .with("PS_MAIL_SMTP_PORT", "smtp");

        assert!(matches!(
            SmtpConfig::from_store(&config, None),
            Err(Error::ParsePortError(_, port)) if port == "smtp"
        ));
    }

    #[test]
    fn encryption_accepts_exact_values_only() {
        assert_eq!(
            Some(SmtpEncryption::Ssl),
            SmtpEncryption::from_config_value("ssl")
        );
        assert_eq!(
            Some(SmtpEncryption::Tls),
            SmtpEncryption::from_config_value("tls")
        );
        assert_eq!(None, SmtpEncryption::from_config_value("off"));
        assert_eq!(None, SmtpEncryption::from_config_value("TLS"));
        assert_eq!(None, SmtpEncryption::from_config_value(""));
    }
}
