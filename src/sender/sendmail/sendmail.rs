//! Sendmail module.
//!
//! This module contains the representation of the local mail system
//! email sender.

use lettre::{transport::sendmail::SendmailTransport, Transport};
use log::debug;
use std::result;
use thiserror::Error;

use crate::{sender, Sender};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot send email using sendmail command")]
    SendError(#[source] lettre::transport::sendmail::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub struct Sendmail {
    transport: SendmailTransport,
}

impl Sendmail {
    /// Builds a sender using the `sendmail` command found in the
    /// path.
    pub fn new() -> Self {
        Self {
            transport: SendmailTransport::new(),
        }
    }

    pub fn with_cmd<S: AsRef<str>>(cmd: S) -> Self {
        Self {
            transport: SendmailTransport::new_with_command(cmd.as_ref()),
        }
    }
}

impl Default for Sendmail {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for Sendmail {
    fn send(&mut self, msg: &lettre::Message) -> sender::Result<()> {
        debug!("sending email using sendmail command");
        self.transport.send(msg).map_err(Error::SendError)?;
        Ok(())
    }
}
