pub mod sender;
pub use sender::{Connection, Error, LettreSenderBuilder, Result, Sender, SenderBuilder};

pub mod smtp;
pub use smtp::Smtp;

pub mod sendmail;
pub use sendmail::Sendmail;
