//! SMTP module.
//!
//! This module contains the representation of the SMTP email sender.

use lettre::{
    self,
    transport::smtp::{
        client::{Tls, TlsParameters},
        SmtpTransport,
    },
    Transport,
};
use log::{debug, trace};
use std::result;
use thiserror::Error;

use crate::{sender, Sender, SmtpConfig, SmtpEncryption};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build smtp tls parameters")]
    BuildTlsParamsError(#[source] lettre::transport::smtp::Error),
    #[error("cannot send email")]
    SendError(#[source] lettre::transport::smtp::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub struct Smtp {
    config: SmtpConfig,
    transport: Option<SmtpTransport>,
}

impl Smtp {
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        let tls = match self.config.encryption {
            Some(encryption) => {
                let params = TlsParameters::new(self.config.host.to_owned())
                    .map_err(Error::BuildTlsParamsError)?;
                match encryption {
                    SmtpEncryption::Ssl => Tls::Wrapper(params),
                    SmtpEncryption::Tls => Tls::Required(params),
                }
            }
            None => Tls::None,
        };

        let builder = SmtpTransport::builder_dangerous(&self.config.host)
            .port(self.config.port)
            .tls(tls);
        let builder = match self.config.credentials() {
            Some(credentials) => builder.credentials(credentials),
            None => builder,
        };

        debug!(
            "building smtp transport for {}:{} (encryption: {:?})",
            self.config.host, self.config.port, self.config.encryption
        );
        Ok(builder.build())
    }

    fn transport(&mut self) -> Result<&SmtpTransport> {
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => self.build_transport()?,
        };
        Ok(self.transport.insert(transport))
    }
}

impl Sender for Smtp {
    fn send(&mut self, msg: &lettre::Message) -> sender::Result<()> {
        let res = self.transport()?.send(msg).map_err(Error::SendError)?;
        trace!("smtp response: {:?}", res);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(encryption: Option<SmtpEncryption>) -> SmtpConfig {
        SmtpConfig {
            host: "localhost".into(),
            port: 3025,
            encryption,
            login: "alice@localhost".into(),
            passwd: "password".into(),
        }
    }

    #[test]
    fn transport_is_built_once() {
        let mut smtp = Smtp::new(config(None));

        assert!(smtp.transport.is_none());
        assert!(smtp.transport().is_ok());
        assert!(smtp.transport.is_some());
        assert!(smtp.transport().is_ok());
    }

    #[test]
    fn transport_with_encryption() {
        assert!(Smtp::new(config(Some(SmtpEncryption::Ssl)))
            .build_transport()
            .is_ok());
        assert!(Smtp::new(config(Some(SmtpEncryption::Tls)))
            .build_transport()
            .is_ok());
    }
}
