//! Mail method module.
//!
//! This module contains the representation of the stored mail
//! method setting.

use std::fmt;

use super::{keys, ConfigStore, ShopId};

/// Represents the way emails leave the shop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MailMethod {
    /// Delivers through the local mail system (sendmail).
    Mail,
    /// Delivers through a remote SMTP server.
    Smtp,
    /// Never sends anything. Useful for test or staging shops.
    None,
}

impl MailMethod {
    pub const MAIL: i64 = 1;
    pub const SMTP: i64 = 2;
    pub const NONE: i64 = 3;

    /// Reads the mail method of the given shop. Defaults to
    /// [`MailMethod::None`] when nothing is stored. A stored empty
    /// value is an unknown one.
    pub fn from_store<C: ConfigStore + ?Sized>(config: &C, shop_id: Option<ShopId>) -> Self {
        config
            .get(keys::MAIL_METHOD, shop_id)
            .map(|val| Self::from_config_value(&val))
            .unwrap_or(Self::None)
    }

    /// Parses a stored mail method. Anything that is neither SMTP
    /// nor none falls back to the local mail system.
    pub fn from_config_value(val: &str) -> Self {
        match val.trim().parse::<i64>() {
            Ok(Self::SMTP) => Self::Smtp,
            Ok(Self::NONE) => Self::None,
            _ => Self::Mail,
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Self::Mail => Self::MAIL,
            Self::Smtp => Self::SMTP,
            Self::None => Self::NONE,
        }
    }
}

impl Default for MailMethod {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for MailMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mail => write!(f, "mail"),
            Self::Smtp => write!(f, "smtp"),
            Self::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::MemoryConfig;

    use super::*;

    #[test]
    fn from_config_value() {
        assert_eq!(MailMethod::Mail, MailMethod::from_config_value("1"));
        assert_eq!(MailMethod::Smtp, MailMethod::from_config_value("2"));
        assert_eq!(MailMethod::None, MailMethod::from_config_value("3"));
        assert_eq!(MailMethod::Smtp, MailMethod::from_config_value(" 2 "));

        // unknown values behave like the local mail system
        assert_eq!(MailMethod::Mail, MailMethod::from_config_value("0"));
        assert_eq!(MailMethod::Mail, MailMethod::from_config_value("42"));
        assert_eq!(MailMethod::Mail, MailMethod::from_config_value("smtp"));
    }

    #[test]
    fn from_store_defaults_to_none() {
        let config = MemoryConfig::default();
        assert_eq!(MailMethod::None, MailMethod::from_store(&config, Some(1)));

        let config = MemoryConfig::default().with("PS_MAIL_METHOD", "");
        assert_eq!(MailMethod::Mail, MailMethod::from_store(&config, Some(1)));

        let config = MemoryConfig::default().with_shop(1, "PS_MAIL_METHOD", 2);
        assert_eq!(MailMethod::Smtp, MailMethod::from_store(&config, Some(1)));
        assert_eq!(MailMethod::None, MailMethod::from_store(&config, Some(2)));
    }

    #[test]
    fn as_int_roundtrips_stored_values() {
        for method in [MailMethod::Mail, MailMethod::Smtp, MailMethod::None] {
            assert_eq!(
                method,
                MailMethod::from_config_value(&method.as_int().to_string())
            );
        }
    }
}
