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

//! Email template module.
//!
//! This module contains the two kinds of templates the host platform
//! can hand to the transport. A [`SimpleTemplate`] only needs literal
//! placeholder substitution, which the [`Decorator`](super::Decorator)
//! can do at send time. A [`CustomTemplate`] owns its own rendering
//! logic and must be rendered up front.

use std::fmt;

use super::{replace_placeholders, TplValues};

/// Represents a template rendering function.
pub trait TplRenderer {
    fn render(&self, vals: &TplValues) -> String;
}

impl<F: Fn(&TplValues) -> String> TplRenderer for F {
    fn render(&self, vals: &TplValues) -> String {
        self(vals)
    }
}

/// Represents a template whose placeholders are substituted
/// literally.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SimpleTemplate {
    pub content_type: String,
    pub template: String,
}

impl SimpleTemplate {
    pub fn new<C: ToString, T: ToString>(content_type: C, template: T) -> Self {
        Self {
            content_type: content_type.to_string(),
            template: template.to_string(),
        }
    }

    /// Tells whether the template produces a `text/*` part, the only
    /// kind of part the decorator substitutes into.
    pub fn is_text(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("text/")
    }
}

/// Represents a template rendered by a host supplied function.
pub struct CustomTemplate {
    pub content_type: String,
    renderer: Box<dyn TplRenderer>,
}

impl CustomTemplate {
    pub fn new<C: ToString, R: TplRenderer + 'static>(content_type: C, renderer: R) -> Self {
        Self {
            content_type: content_type.to_string(),
            renderer: Box::new(renderer),
        }
    }
}

impl fmt::Debug for CustomTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CustomTemplate")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum MailTemplate {
    Simple(SimpleTemplate),
    Custom(CustomTemplate),
}

impl MailTemplate {
    pub fn simple<C: ToString, T: ToString>(content_type: C, template: T) -> Self {
        Self::Simple(SimpleTemplate::new(content_type, template))
    }

    pub fn custom<C: ToString, R: TplRenderer + 'static>(content_type: C, renderer: R) -> Self {
        Self::Custom(CustomTemplate::new(content_type, renderer))
    }

    pub fn content_type(&self) -> &str {
        match self {
            Self::Simple(tpl) => &tpl.content_type,
            Self::Custom(tpl) => &tpl.content_type,
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple(_))
    }

    /// Renders the template with the given values.
    pub fn render(&self, vals: &TplValues) -> String {
        match self {
            Self::Simple(tpl) => replace_placeholders(&tpl.template, vals),
            Self::Custom(tpl) => tpl.renderer.render(vals),
        }
    }
}

impl From<SimpleTemplate> for MailTemplate {
    fn from(tpl: SimpleTemplate) -> Self {
        Self::Simple(tpl)
    }
}

impl From<CustomTemplate> for MailTemplate {
    fn from(tpl: CustomTemplate) -> Self {
        Self::Custom(tpl)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vals() -> TplValues {
        TplValues::from([
            ("{firstname}".to_owned(), json!("Alice")),
            ("{shop_name}".to_owned(), json!("Shop")),
            ("{products}".to_owned(), json!(["mug", "tee"])),
        ])
    }

    #[test]
    fn render_simple() {
        let tpl = MailTemplate::simple("text/plain", "Hi {firstname}, welcome to {shop_name}!");

        assert!(tpl.is_simple());
        assert_eq!("text/plain", tpl.content_type());
        assert_eq!("Hi Alice, welcome to Shop!", tpl.render(&vals()));
    }

    #[test]
    fn render_custom() {
        let tpl = MailTemplate::custom("text/html", |vals: &TplValues| {
            format!("<p>{}</p>", vals["{firstname}"].as_str().unwrap_or_default())
        });

        assert!(!tpl.is_simple());
        assert_eq!("text/html", tpl.content_type());
        assert_eq!("<p>Alice</p>", tpl.render(&vals()));
    }

    #[test]
    fn render_custom_with_list() {
        let tpl = MailTemplate::custom("text/html", |vals: &TplValues| {
            vals["{products}"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|product| product.as_str())
                .map(|product| format!("<li>{}</li>", product))
                .collect::<String>()
        });

        assert_eq!("<li>mug</li><li>tee</li>", tpl.render(&vals()));
    }

    #[test]
    fn simple_is_text() {
        assert!(SimpleTemplate::new("text/plain", "").is_text());
        assert!(SimpleTemplate::new(" Text/HTML; charset=utf-8", "").is_text());
        assert!(!SimpleTemplate::new("application/json", "").is_text());
    }
}
