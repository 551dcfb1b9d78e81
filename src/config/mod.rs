//! Config module.
//!
//! This module contains everything related to the shop
//! configuration consumed by the mail transport.

pub mod keys;

pub mod store;
pub use store::{ConfigStore, ConfigStoreMut, MemoryConfig, SharedConfig, ShopId};

pub mod method;
pub use method::MailMethod;

pub mod smtp;
pub use smtp::{SmtpConfig, SmtpEncryption, DEFAULT_SMTP_PORT};

use std::result;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid smtp server")]
    InvalidSmtpServer,
    #[error("cannot parse smtp port {1:?}")]
    ParsePortError(#[source] std::num::ParseIntError, String),
}

pub type Result<T> = result::Result<T, Error>;
