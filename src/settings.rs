// shopmail, a Rust library for sending shop emails.
// Copyright (C) 2022  soywod <clement.douin@posteo.net>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Settings module.
//!
//! This module contains the admin form exposing the mail settings,
//! and the logic persisting the submitted values.

use log::{debug, info};
use regex::Regex;
use std::{collections::HashMap, result};
use thiserror::Error;

use crate::{config::keys, ConfigStore, ConfigStoreMut, MailMethod};

/// Represents the name of the submit button of the form.
pub const SUBMIT: &str = "tbswiftmailer_submit";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value for field {0}")]
    InvalidFieldError(String),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the validation rule of a field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Validation {
    GenericName,
    Url,
    Int,
    Anything,
}

impl Validation {
    pub fn is_valid(&self, val: &str) -> bool {
        match self {
            Self::GenericName => is_match(r"^[^<>={}]*$", val),
            Self::Url => is_match(r"^[~:#,$%&_=().? +\-@/a-zA-Z0-9\p{L}\p{S}]+$", val),
            Self::Int => val.trim().parse::<i64>().is_ok(),
            Self::Anything => true,
        }
    }
}

fn is_match(re: &str, val: &str) -> bool {
    Regex::new(re).map(|re| re.is_match(val)).unwrap_or(false)
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Choice {
    pub val: String,
    pub label: String,
}

impl Choice {
    fn new<V: ToString, L: ToString>(val: V, label: L) -> Self {
        Self {
            val: val.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FieldKind {
    Radio(Vec<Choice>),
    Select(Vec<Choice>),
    Text,
    Password,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub title: String,
    pub hint: Option<String>,
    pub kind: FieldKind,
    pub validation: Validation,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl Field {
    fn new(key: &'static str, title: &str, kind: FieldKind, validation: Validation) -> Self {
        Self {
            key,
            title: title.to_owned(),
            hint: None,
            kind,
            validation,
            required: false,
            placeholder: None,
        }
    }

    fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_owned());
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Checks the submitted value. Empty values are only rejected
    /// for required fields.
    pub fn validate(&self, val: &str) -> Result<()> {
        let valid = if val.is_empty() {
            !self.required
        } else {
            let in_choices = match &self.kind {
                FieldKind::Radio(choices) | FieldKind::Select(choices) => {
                    choices.iter().any(|choice| choice.val == val)
                }
                FieldKind::Text | FieldKind::Password => true,
            };
            in_choices && self.validation.is_valid(val)
        };

        if valid {
            Ok(())
        } else {
            Err(Error::InvalidFieldError(self.key.to_owned()))
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Section {
    pub id: &'static str,
    pub title: String,
    pub icon: &'static str,
    pub fields: Vec<Field>,
}

/// Represents the admin settings form.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SettingsForm {
    pub sections: Vec<Section>,
}

impl SettingsForm {
    /// Builds the form. When a password is already stored, the
    /// password field invites to leave it empty instead of showing
    /// it.
    pub fn new(has_passwd: bool) -> Self {
        let general = Section {
            id: "general",
            title: "Settings".into(),
            icon: "icon-cogs",
            fields: vec![Field::new(
                keys::MAIL_METHOD,
                "",
                FieldKind::Radio(vec![
                    Choice::new(MailMethod::MAIL, "Use the local mail system"),
                    Choice::new(
                        MailMethod::SMTP,
                        "Set my own SMTP parameters (for advanced users ONLY)",
                    ),
                    Choice::new(
                        MailMethod::NONE,
                        "Never send emails (may be useful for testing purposes)",
                    ),
                ]),
                Validation::GenericName,
            )
            .required()],
        };

        let mut passwd = Field::new(
            keys::MAIL_PASSWD,
            "SMTP password",
            FieldKind::Password,
            Validation::Anything,
        );
        if has_passwd {
            passwd.placeholder = Some("Use saved password".into());
            passwd.hint = Some("Leave this field empty to keep using saved password".into());
        } else {
            passwd.hint = Some("Leave blank if not applicable.".into());
        }

        let smtp = Section {
            id: "smtp",
            title: "SMTP settings".into(),
            icon: "icon-cogs",
            fields: vec![
                Field::new(
                    keys::MAIL_DOMAIN,
                    "Mail domain name",
                    FieldKind::Text,
                    Validation::Url,
                )
                .hint("Fully qualified domain name (keep this field empty if you don't know)."),
                Field::new(
                    keys::MAIL_SERVER,
                    "SMTP server",
                    FieldKind::Text,
                    Validation::GenericName,
                )
                .hint("IP address or server name (e.g. smtp.mydomain.com)."),
                Field::new(
                    keys::MAIL_USER,
                    "SMTP username",
                    FieldKind::Text,
                    Validation::GenericName,
                )
                .hint("Leave blank if not applicable."),
                passwd,
                Field::new(
                    keys::MAIL_SMTP_ENCRYPTION,
                    "Encryption",
                    FieldKind::Select(vec![
                        Choice::new("off", "None"),
                        Choice::new("tls", "TLS"),
                        Choice::new("ssl", "SSL"),
                    ]),
                    Validation::Anything,
                )
                .hint("Use an encrypt protocol"),
                Field::new(keys::MAIL_SMTP_PORT, "Port", FieldKind::Text, Validation::Int)
                    .hint("Port number to use."),
            ],
        };

        Self {
            sections: vec![general, smtp],
        }
    }

    pub fn from_store<C: ConfigStore + ?Sized>(config: &C) -> Self {
        Self::new(config.get_non_empty(keys::MAIL_PASSWD, None).is_some())
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields().find(|field| field.key == key)
    }

    /// Renders the form as HTML, filled with the stored values. The
    /// stored password is never rendered.
    pub fn render<C: ConfigStore + ?Sized>(&self, config: &C) -> String {
        let mut html = String::from("<form method=\"post\" class=\"defaultForm form-horizontal\">\n");

        for section in &self.sections {
            html.push_str(&format!(
                "<div class=\"panel\" id=\"{}\">\n<h3><i class=\"{}\"></i> {}</h3>\n",
                attr(section.id),
                attr(section.icon),
                text(&section.title),
            ));

            for field in &section.fields {
                let val = match field.kind {
                    FieldKind::Password => String::new(),
                    _ => config.get(field.key, None).unwrap_or_default(),
                };
                html.push_str(&render_field(field, &val));
            }

            html.push_str(&format!(
                "<button type=\"submit\" name=\"{}\" class=\"button\">Save</button>\n</div>\n",
                SUBMIT
            ));
        }

        html.push_str("</form>\n");
        html
    }
}

fn attr(val: &str) -> String {
    html_escape::encode_double_quoted_attribute(val).to_string()
}

fn text(val: &str) -> String {
    html_escape::encode_text(val).to_string()
}

fn render_field(field: &Field, val: &str) -> String {
    let mut html = format!(
        "<div class=\"form-group\">\n<label for=\"{}\">{}</label>\n",
        attr(field.key),
        text(&field.title),
    );

    match &field.kind {
        FieldKind::Radio(choices) => {
            for choice in choices {
                html.push_str(&format!(
                    "<input type=\"radio\" name=\"{key}\" id=\"{key}_{val}\" value=\"{val}\"{checked}{required}> <label for=\"{key}_{val}\">{label}</label>\n",
                    key = attr(field.key),
                    val = attr(&choice.val),
                    checked = if choice.val == val { " checked" } else { "" },
                    required = if field.required { " required" } else { "" },
                    label = text(&choice.label),
                ));
            }
        }
        FieldKind::Select(choices) => {
            html.push_str(&format!("<select name=\"{}\">\n", attr(field.key)));
            for choice in choices {
                html.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>\n",
                    attr(&choice.val),
                    if choice.val == val { " selected" } else { "" },
                    text(&choice.label),
                ));
            }
            html.push_str("</select>\n");
        }
        FieldKind::Text => {
            html.push_str(&format!(
                "<input type=\"text\" name=\"{}\" value=\"{}\">\n",
                attr(field.key),
                attr(val),
            ));
        }
        FieldKind::Password => {
            html.push_str(&format!(
                "<input type=\"password\" name=\"{}\" value=\"\" autocomplete=\"off\"{}>\n",
                attr(field.key),
                field
                    .placeholder
                    .as_deref()
                    .map(|placeholder| format!(" placeholder=\"{}\"", attr(placeholder)))
                    .unwrap_or_default(),
            ));
        }
    }

    if let Some(hint) = field.hint.as_deref() {
        html.push_str(&format!("<p class=\"help-block\">{}</p>\n", text(hint)));
    }

    html.push_str("</div>\n");
    html
}

/// Checks whether the form has been submitted.
pub fn is_submitted(submitted: &HashMap<String, String>) -> bool {
    submitted.contains_key(SUBMIT)
}

fn to_int(val: &str) -> i64 {
    val.trim().parse().unwrap_or_default()
}

/// Validates and persists the submitted settings. The password is
/// only overwritten when a new non-empty value is submitted.
pub fn update_options<C: ConfigStoreMut + ?Sized>(
    config: &mut C,
    submitted: &HashMap<String, String>,
) -> Result<()> {
    info!("begin: updating mail settings");

    let form = SettingsForm::from_store(&*config);
    let val = |key: &str| submitted.get(key).map(String::as_str).unwrap_or_default();

    for field in form.fields() {
        field.validate(val(field.key))?;
    }

    config.set(keys::MAIL_METHOD, to_int(val(keys::MAIL_METHOD)).to_string(), None);
    config.set(keys::MAIL_DOMAIN, val(keys::MAIL_DOMAIN).to_owned(), None);
    config.set(keys::MAIL_SERVER, val(keys::MAIL_SERVER).to_owned(), None);
    config.set(keys::MAIL_USER, val(keys::MAIL_USER).to_owned(), None);
    config.set(
        keys::MAIL_SMTP_ENCRYPTION,
        val(keys::MAIL_SMTP_ENCRYPTION).to_owned(),
        None,
    );
    config.set(
        keys::MAIL_SMTP_PORT,
        to_int(val(keys::MAIL_SMTP_PORT)).to_string(),
        None,
    );

    let passwd = val(keys::MAIL_PASSWD);
    if passwd.is_empty() {
        debug!("no password submitted, keeping the saved one");
    } else {
        config.set(keys::MAIL_PASSWD, passwd.to_owned(), None);
    }

    info!("end: updating mail settings");
    Ok(())
}
