use lettre::message::{
    header::{ContentTransferEncoding, ContentType},
    Attachment, Body, SinglePart,
};

use super::{Error, Result};

/// Builds a base64 encoded body out of the given raw bytes.
pub fn base64_body(content: Vec<u8>) -> Body {
    Body::new_with_encoding(content, ContentTransferEncoding::Base64).unwrap_or_else(Body::new)
}

/// Represents a file attached to an outgoing email.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MailAttachment {
    pub filename: String,
    pub mime: String,
    pub content: Vec<u8>,
}

impl MailAttachment {
    pub fn new<F: ToString, M: ToString>(filename: F, mime: M, content: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            mime: mime.to_string(),
            content,
        }
    }

    /// Builds the binary part carrying the file name, the declared
    /// MIME type and the raw content.
    pub fn to_part(&self) -> Result<SinglePart> {
        let content_type = ContentType::parse(&self.mime)
            .map_err(|err| Error::ParseContentTypeError(err, self.mime.to_owned()))?;
        Ok(Attachment::new(self.filename.to_owned())
            .body(base64_body(self.content.to_owned()), content_type))
    }
}
