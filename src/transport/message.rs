//! Message module.
//!
//! This module turns the data supplied by the host platform into a
//! single sendable [`lettre::Message`].

use lettre::message::{header::ContentType, MultiPart, SinglePart};
use log::{info, trace};

use super::{Error, Result, TplStrategy};
use crate::{
    email::{
        self, resolve_tpl_vars, InlineImages, MailAddress, MailAttachment, MailTemplate,
        TplValues, TplVars,
    },
    ShopId,
};

/// Represents an email the host platform asks to send.
#[derive(Debug, Default)]
pub struct Mail {
    pub shop_id: ShopId,
    pub lang_id: u32,
    pub from: MailAddress,
    pub to: Vec<MailAddress>,
    pub bcc: Vec<MailAddress>,
    pub reply_to: MailAddress,
    pub subject: String,
    pub templates: Vec<MailTemplate>,
    pub vars: TplVars,
    pub attachments: Vec<MailAttachment>,
}

/// Builds the content type of a template part. Text parts without
/// charset are declared as UTF-8.
pub fn template_content_type(content_type: &str) -> email::Result<ContentType> {
    let content_type = content_type.trim();
    let parsed = if content_type.starts_with("text/") && !content_type.contains("charset") {
        ContentType::parse(&format!("{}; charset=utf-8", content_type))
    } else {
        ContentType::parse(content_type)
    };
    parsed.map_err(|err| email::Error::ParseContentTypeError(err, content_type.to_owned()))
}

/// Represents the assembly of one outgoing email.
///
/// Building the composer resolves the template variables (embedding
/// image files on the way) and selects the template strategy.
#[derive(Debug)]
pub struct MessageComposer<'a> {
    mail: &'a Mail,
    vals: TplValues,
    images: InlineImages,
    strategy: TplStrategy,
}

impl<'a> MessageComposer<'a> {
    pub fn new(mail: &'a Mail) -> Result<Self> {
        let mut images = InlineImages::default();
        let vals = resolve_tpl_vars(&mail.vars, &mut images)?;
        trace!("template values: {:?}", vals);
        let strategy = TplStrategy::select(&mail.templates, &mail.to, &vals);

        Ok(Self {
            mail,
            vals,
            images,
            strategy,
        })
    }

    pub fn vals(&self) -> &TplValues {
        &self.vals
    }

    pub fn images(&self) -> &InlineImages {
        &self.images
    }

    pub fn strategy(&self) -> &TplStrategy {
        &self.strategy
    }

    fn body(&self) -> Result<MultiPart> {
        let mut alternative = MultiPart::alternative().build();
        for tpl in &self.mail.templates {
            alternative = alternative.singlepart(
                SinglePart::builder()
                    .header(template_content_type(tpl.content_type())?)
                    .body(self.strategy.body(tpl)),
            );
        }

        if self.images.is_empty() {
            return Ok(alternative);
        }

        Ok(self
            .images
            .iter()
            .fold(MultiPart::related().multipart(alternative), |related, image| {
                related.singlepart(image.to_part())
            }))
    }

    /// Assembles the email with the given message id.
    pub fn compose(&self, message_id: &str) -> Result<lettre::Message> {
        info!("begin: composing email {}", message_id);
        let mail = self.mail;

        let mut builder = lettre::Message::builder()
            .message_id(Some(format!("<{}>", message_id)))
            .subject(self.strategy.subject(&mail.subject))
            .from(mail.from.to_mailbox()?);

        if !mail.reply_to.email.trim().is_empty() {
            builder = builder.reply_to(mail.reply_to.to_mailbox()?);
        }

        for addr in &mail.to {
            builder = builder.to(addr.to_mailbox()?);
        }

        for addr in &mail.bcc {
            builder = builder.bcc(addr.to_mailbox()?);
        }

        let mut multipart = MultiPart::mixed().multipart(self.body()?);
        for attachment in &mail.attachments {
            multipart = multipart.singlepart(attachment.to_part()?);
        }

        let msg = builder
            .multipart(multipart)
            .map_err(Error::BuildMessageError)?;

        info!("end: composing email {}", message_id);
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> Mail {
        Mail {
            shop_id: 1,
            from: MailAddress::with_name("Shop", "shop@localhost"),
            to: vec![MailAddress::with_name("Alice", "alice@localhost")],
            bcc: vec![MailAddress::new("archive@localhost")],
            reply_to: MailAddress::new("support@localhost"),
            subject: "Welcome {name}".into(),
            templates: vec![
                MailTemplate::simple("text/plain", "Hi {name}"),
                MailTemplate::simple("text/html", "<p>Hi {name}</p>"),
            ],
            vars: TplVars::from([("{name}".to_owned(), "Alice".into())]),
            ..Mail::default()
        }
    }

    #[test]
    fn template_content_type_adds_charset_to_text() {
        assert_eq!(
            ContentType::parse("text/html; charset=utf-8").unwrap(),
            template_content_type("text/html").unwrap()
        );
        assert_eq!(
            ContentType::parse("text/plain; charset=iso-8859-1").unwrap(),
            template_content_type("text/plain; charset=iso-8859-1").unwrap()
        );
        assert_eq!(
            ContentType::parse("application/json").unwrap(),
            template_content_type("application/json").unwrap()
        );
        assert!(template_content_type("html").is_err());
    }

    #[test]
    fn compose() {
        let mail = mail();
        let composer = MessageComposer::new(&mail).unwrap();
        let msg = composer.compose("20230101000000.42.swift@localhost").unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();

        assert!(composer.strategy().is_decorated());
        assert!(raw.contains("Message-ID: <20230101000000.42.swift@localhost>"));
        assert!(raw.contains("Subject: Welcome Alice"));
        assert!(raw.contains("Reply-To: support@localhost"));
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("multipart/alternative"));
        assert!(!raw.contains("multipart/related"));

        let recipients: Vec<String> = msg
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(vec!["alice@localhost", "archive@localhost"], recipients);
    }

    #[test]
    fn compose_with_invalid_recipient() {
        let mail = Mail {
            to: vec![MailAddress::new("alice")],
            ..mail()
        };
        let composer = MessageComposer::new(&mail).unwrap();

        assert!(matches!(
            composer.compose("id@localhost"),
            Err(Error::EmailError(email::Error::ParseAddressError(_, addr))) if addr == "alice"
        ));
    }
}
