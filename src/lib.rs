pub mod config;
pub use config::{
    ConfigStore, ConfigStoreMut, MailMethod, MemoryConfig, SharedConfig, ShopId, SmtpConfig,
    SmtpEncryption,
};

pub mod domain;
pub use domain::email;
pub use email::{
    CustomTemplate, Decorator, MailAddress, MailAttachment, MailTemplate, SimpleTemplate,
    TplRenderer, TplValues, TplVar, TplVars,
};

pub mod sender;
pub use sender::{Connection, LettreSenderBuilder, Sender, SenderBuilder, Sendmail, Smtp};

pub mod transport;
pub use transport::{Mail, MailTransport, MessageComposer, SwiftMailerTransport, TplStrategy};

pub mod settings;
pub use settings::SettingsForm;

pub mod module;
pub use module::{HookRegistry, MailerModule};
