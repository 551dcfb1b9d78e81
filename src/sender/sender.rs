//! Sender module.
//!
//! This module contains the sender interface and the builder picking
//! the sender matching the configured mail method.

use log::debug;
use std::result;
use thiserror::Error;

use super::{sendmail, smtp, Sendmail, Smtp};
use crate::{config, ConfigStore, MailMethod, ShopId, SmtpConfig};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    SmtpError(#[from] smtp::smtp::Error),
    #[error(transparent)]
    SendmailError(#[from] sendmail::sendmail::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub trait Sender {
    fn send(&mut self, msg: &lettre::Message) -> Result<()>;
}

/// Represents the delivery mechanism resolved from the shop
/// configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Connection {
    /// Represents the local mail system.
    Mail,
    /// Represents a remote SMTP server.
    Smtp(SmtpConfig),
}

impl Connection {
    /// Resolves the connection of the given mail method. The SMTP
    /// settings are only read, and validated, for the SMTP method.
    /// Returns `None` when sending emails is disabled.
    pub fn from_store<C: ConfigStore + ?Sized>(
        method: MailMethod,
        config: &C,
        shop_id: Option<ShopId>,
    ) -> config::Result<Option<Self>> {
        match method {
            MailMethod::Smtp => Ok(Some(Self::Smtp(SmtpConfig::from_store(config, shop_id)?))),
            MailMethod::Mail => Ok(Some(Self::Mail)),
            MailMethod::None => Ok(None),
        }
    }
}

/// Builds the sender of a resolved connection.
pub trait SenderBuilder {
    fn build(&self, connection: &Connection) -> Result<Box<dyn Sender>>;
}

/// Builds senders backed by the [`lettre`] transports.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct LettreSenderBuilder;

impl SenderBuilder for LettreSenderBuilder {
    fn build(&self, connection: &Connection) -> Result<Box<dyn Sender>> {
        debug!("building sender for connection {:?}", connection);

        match connection {
            Connection::Smtp(config) => Ok(Box::new(Smtp::new(config.to_owned()))),
            Connection::Mail => Ok(Box::new(Sendmail::new())),
        }
    }
}
