//! Module registration module.
//!
//! This module contains the entry point the host platform installs:
//! it registers the mail transport hook and serves the settings page.

use log::{debug, info, warn};
use std::collections::HashMap;

use crate::{
    settings::{self, SettingsForm},
    ConfigStoreMut, MailTransport, SwiftMailerTransport,
};

pub const MODULE_NAME: &str = "tbswiftmailer";

/// Represents the hook the host calls to collect mail transports.
pub const REGISTER_MAIL_TRANSPORT_HOOK: &str = "actionRegisterMailTransport";

/// Represents the hook system of the host platform.
pub trait HookRegistry {
    /// Registers the given module for the given hook. Returns `false`
    /// when the host refused the registration.
    fn register_hook(&mut self, module: &str, hook: &str) -> bool;
}

/// Represents the mail module installed into the host platform.
#[derive(Debug, Clone)]
pub struct MailerModule<C> {
    pub name: &'static str,
    pub tab: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    config: C,
}

impl<C> MailerModule<C>
where
    C: ConfigStoreMut + Clone + 'static,
{
    pub fn new(config: C) -> Self {
        Self {
            name: MODULE_NAME,
            tab: "administration",
            version: env!("CARGO_PKG_VERSION"),
            author: "thirty bees",
            display_name: "Mail via swiftmailer",
            description: "This module implements mail functionality using the swift mailer transport",
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Registers the module to the mail transport hook.
    pub fn install<H: HookRegistry + ?Sized>(&self, hooks: &mut H) -> bool {
        let registered = hooks.register_hook(self.name, REGISTER_MAIL_TRANSPORT_HOOK);
        if registered {
            info!("module {} registered to {}", self.name, REGISTER_MAIL_TRANSPORT_HOOK);
        } else {
            warn!("cannot register module {} to {}", self.name, REGISTER_MAIL_TRANSPORT_HOOK);
        }
        registered
    }

    /// Builds the transport handed to the host. The transport reads
    /// the module configuration on every send.
    pub fn hook_action_register_mail_transport(&self) -> Box<dyn MailTransport> {
        debug!("building mail transport of module {}", self.name);
        Box::new(SwiftMailerTransport::new(self.config.clone()))
    }

    /// Serves the settings page. Submitted values are persisted
    /// first when the form has been submitted.
    pub fn get_content(&mut self, submitted: &HashMap<String, String>) -> settings::Result<String> {
        if settings::is_submitted(submitted) {
            settings::update_options(&mut self.config, submitted)?;
        }

        Ok(SettingsForm::from_store(&self.config).render(&self.config))
    }
}
