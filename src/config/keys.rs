//! Configuration keys read and written by the module.

pub const MAIL_METHOD: &str = "PS_MAIL_METHOD";
pub const MAIL_DOMAIN: &str = "PS_MAIL_DOMAIN";
pub const MAIL_SERVER: &str = "PS_MAIL_SERVER";
pub const MAIL_USER: &str = "PS_MAIL_USER";
pub const MAIL_PASSWD: &str = "PS_MAIL_PASSWD";
pub const MAIL_SMTP_ENCRYPTION: &str = "PS_MAIL_SMTP_ENCRYPTION";
pub const MAIL_SMTP_PORT: &str = "PS_MAIL_SMTP_PORT";
