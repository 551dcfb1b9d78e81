//! Transport module.
//!
//! This module contains the mail transport handed to the host
//! platform, and the pieces it assembles outgoing emails with.

pub mod strategy;
pub use strategy::TplStrategy;

pub mod message;
pub use message::{Mail, MessageComposer};

pub mod transport;
pub use transport::{Error, MailTransport, Result, SwiftMailerTransport};
