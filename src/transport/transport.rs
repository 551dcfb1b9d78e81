//! Mail transport module.
//!
//! This module contains the mail transport contract expected by the
//! host platform, and its implementation backed by [`lettre`].

use log::{debug, info, trace, warn};
use std::result;
use thiserror::Error;

use super::{Mail, MessageComposer};
use crate::{
    config, email, module::MODULE_NAME, sender, ConfigStore, Connection, LettreSenderBuilder,
    MailMethod, SenderBuilder,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build email")]
    BuildMessageError(#[source] lettre::error::Error),

    #[error(transparent)]
    ConfigError(#[from] config::Error),
    #[error(transparent)]
    EmailError(#[from] email::Error),
    #[error(transparent)]
    SenderError(#[from] sender::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the mail transport the host platform registers and
/// sends its emails through.
pub trait MailTransport {
    fn name(&self) -> String;
    fn description(&self) -> String;

    /// Builds the link to the configuration page of the transport
    /// from the admin base url and the admin token.
    fn config_url(&self, admin_url: &str, token: &str) -> String;

    /// Sends the given email. Returns whether the underlying mailer
    /// reported a success.
    fn send_mail(&self, mail: &Mail) -> Result<bool>;
}

/// Represents the mail transport reading its settings from the shop
/// configuration on every send.
#[derive(Debug, Clone)]
pub struct SwiftMailerTransport<C, B = LettreSenderBuilder> {
    config: C,
    sender_builder: B,
}

impl<C: ConfigStore> SwiftMailerTransport<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            sender_builder: LettreSenderBuilder,
        }
    }
}

impl<C: ConfigStore, B: SenderBuilder> SwiftMailerTransport<C, B> {
    /// Replaces the builder used to create the sender of each email.
    pub fn with_sender_builder<T: SenderBuilder>(self, sender_builder: T) -> SwiftMailerTransport<C, T> {
        SwiftMailerTransport {
            config: self.config,
            sender_builder,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<C: ConfigStore, B: SenderBuilder> MailTransport for SwiftMailerTransport<C, B> {
    fn name(&self) -> String {
        String::from("SwiftMailer")
    }

    fn description(&self) -> String {
        String::from("Sends email using the swift mailer transport")
    }

    fn config_url(&self, admin_url: &str, token: &str) -> String {
        format!(
            "{}?controller=AdminModules&configure={}&token={}",
            admin_url,
            urlencoding::encode(MODULE_NAME),
            urlencoding::encode(token),
        )
    }

    fn send_mail(&self, mail: &Mail) -> Result<bool> {
        let shop_id = Some(mail.shop_id);
        let method = MailMethod::from_store(&self.config, shop_id);
        debug!("mail method of shop {}: {}", mail.shop_id, method);

        let connection = match Connection::from_store(method, &self.config, shop_id)? {
            Some(connection) => connection,
            None => {
                debug!("sending emails is disabled, skipping {:?}", mail.subject);
                return Ok(true);
            }
        };

        if mail.to.is_empty() && mail.bcc.is_empty() {
            warn!("cannot send email {:?} without recipient", mail.subject);
            return Ok(false);
        }

        let composer = MessageComposer::new(mail)?;
        let message_id = email::generate_message_id();
        let msg = composer.compose(&message_id)?;
        trace!("email {}: {:?}", message_id, msg);

        info!("begin: sending email {}", message_id);
        let mut sender = self.sender_builder.build(&connection)?;
        match sender.send(&msg) {
            Ok(()) => {
                info!("end: sending email {}", message_id);
                Ok(true)
            }
            Err(err) => {
                warn!("cannot send email {}: {}", message_id, err);
                debug!("{:?}", err);
                Ok(false)
            }
        }
    }
}
