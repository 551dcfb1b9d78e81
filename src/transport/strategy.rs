//! Template strategy module.
//!
//! The strategy is selected once per email. When every template is
//! a simple one, templates are attached verbatim and the
//! [`Decorator`] substitutes the recipient values of `text/*` parts
//! at send time.
//! Otherwise every template is rendered up front with the same
//! values for all recipients.

use log::debug;

use crate::email::{Decorator, MailAddress, MailTemplate, TplValues};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TplStrategy {
    Decorated {
        decorator: Decorator,
        recipient: Option<String>,
    },
    Prerendered {
        vals: TplValues,
    },
}

impl TplStrategy {
    pub fn select(templates: &[MailTemplate], to: &[MailAddress], vals: &TplValues) -> Self {
        let strategy = if templates.iter().all(MailTemplate::is_simple) {
            let mut decorator = Decorator::default();
            for addr in to {
                decorator.insert(addr.email.trim(), vals.to_owned());
            }
            Self::Decorated {
                decorator,
                recipient: to.first().map(|addr| addr.email.trim().to_owned()),
            }
        } else {
            Self::Prerendered {
                vals: vals.to_owned(),
            }
        };

        debug!("selected template strategy: {}", strategy.name());
        strategy
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Decorated { .. } => "decorated",
            Self::Prerendered { .. } => "prerendered",
        }
    }

    pub fn is_decorated(&self) -> bool {
        matches!(self, Self::Decorated { .. })
    }

    /// Builds the final subject. Only the decorator touches it.
    pub fn subject(&self, subject: &str) -> String {
        match self {
            Self::Decorated {
                decorator,
                recipient,
            } => decorator.decorate(recipient.as_deref(), subject),
            Self::Prerendered { .. } => subject.to_owned(),
        }
    }

    /// Builds the final body of the given template.
    pub fn body(&self, tpl: &MailTemplate) -> String {
        match (self, tpl) {
            (
                Self::Decorated {
                    decorator,
                    recipient,
                },
                MailTemplate::Simple(tpl),
            ) if tpl.is_text() => decorator.decorate(recipient.as_deref(), &tpl.template),
            (Self::Decorated { .. }, MailTemplate::Simple(tpl)) => tpl.template.to_owned(),
            (Self::Decorated { .. }, tpl) => tpl.render(&TplValues::new()),
            (Self::Prerendered { vals }, tpl) => tpl.render(vals),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vals() -> TplValues {
        TplValues::from([("{name}".to_owned(), json!("Alice"))])
    }

    fn to() -> Vec<MailAddress> {
        vec![
            MailAddress::new("alice@localhost"),
            MailAddress::new("bob@localhost"),
        ]
    }

    #[test]
    fn select_decorated_when_all_templates_are_simple() {
        let templates = vec![
            MailTemplate::simple("text/plain", "Hi {name}"),
            MailTemplate::simple("text/html", "<p>Hi {name}</p>"),
        ];
        let strategy = TplStrategy::select(&templates, &to(), &vals());

        assert!(strategy.is_decorated());
        assert_eq!("Hi Alice", strategy.subject("Hi {name}"));
        assert_eq!("Hi Alice", strategy.body(&templates[0]));
        assert_eq!("<p>Hi Alice</p>", strategy.body(&templates[1]));

        if let TplStrategy::Decorated { decorator, .. } = &strategy {
            assert_eq!(Some(&vals()), decorator.replacements_for("alice@localhost"));
            assert_eq!(Some(&vals()), decorator.replacements_for("bob@localhost"));
        }
    }

    #[test]
    fn select_prerendered_when_one_template_is_custom() {
        let templates = vec![
            MailTemplate::simple("text/plain", "Hi {name}"),
            MailTemplate::custom("text/html", |vals: &TplValues| {
                format!("<p>Hi {}</p>", vals["{name}"].as_str().unwrap_or_default())
            }),
        ];
        let strategy = TplStrategy::select(&templates, &to(), &vals());

        assert!(!strategy.is_decorated());
        assert_eq!("Hi {name}", strategy.subject("Hi {name}"));
        assert_eq!("Hi Alice", strategy.body(&templates[0]));
        assert_eq!("<p>Hi Alice</p>", strategy.body(&templates[1]));
    }

    #[test]
    fn decorate_text_parts_only() {
        let templates = vec![
            MailTemplate::simple("text/plain", "Hi {name}"),
            MailTemplate::simple("application/json", r#"{"name":"{name}"}"#),
        ];
        let strategy = TplStrategy::select(&templates, &to(), &vals());

        assert!(strategy.is_decorated());
        assert_eq!("Hi Alice", strategy.body(&templates[0]));
        assert_eq!(r#"{"name":"{name}"}"#, strategy.body(&templates[1]));
    }

    #[test]
    fn select_decorated_without_recipient() {
        let templates = vec![MailTemplate::simple("text/plain", "Hi {name}")];
        let strategy = TplStrategy::select(&templates, &[], &vals());

        assert!(strategy.is_decorated());
        assert_eq!("Hi {name}", strategy.body(&templates[0]));
    }
}
