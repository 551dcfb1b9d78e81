//! Template variables module.
//!
//! This module contains the representation of the variables passed
//! along with the templates, and the logic turning image file
//! variables into embedded inline images.

use indexmap::IndexMap;
use lettre::message::{header::ContentType, Attachment, SinglePart};
use log::{debug, trace};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use uuid::Uuid;

use super::{base64_body, Error, Result};

/// Represents a single template variable.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TplVar {
    /// Represents a plain text value.
    Text(String),
    /// Represents a structured value (list, object, number…) passed
    /// as is to custom templates. Only scalar values can be
    /// substituted into simple templates.
    Data(Value),
    /// Represents an image that should be embedded in the email. The
    /// variable is replaced by a reference to the embedded image.
    ImageFile { filepath: Option<PathBuf> },
}

impl TplVar {
    pub fn image_file<P: Into<PathBuf>>(filepath: P) -> Self {
        Self::ImageFile {
            filepath: Some(filepath.into()),
        }
    }
}

impl From<String> for TplVar {
    fn from(val: String) -> Self {
        Self::Text(val)
    }
}

impl From<&str> for TplVar {
    fn from(val: &str) -> Self {
        Self::Text(val.to_owned())
    }
}

impl From<Value> for TplVar {
    fn from(val: Value) -> Self {
        Self::Data(val)
    }
}

/// Represents the template variables as supplied by the caller, in
/// insertion order.
pub type TplVars = IndexMap<String, TplVar>;

/// Represents the template variables once image files have been
/// resolved, in insertion order.
pub type TplValues = IndexMap<String, Value>;

/// Gets the text a placeholder is replaced with. Lists and objects
/// cannot be substituted.
pub fn placeholder_text(val: &Value) -> Option<String> {
    match val {
        Value::Null => Some(String::new()),
        Value::String(val) => Some(val.to_owned()),
        Value::Bool(_) | Value::Number(_) => Some(val.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Replaces every occurrence of every key by its value, one key
/// after the other in insertion order. Keys holding a list or an
/// object are left untouched.
pub fn replace_placeholders(text: &str, vals: &TplValues) -> String {
    vals.iter()
        .filter(|(key, _)| !key.is_empty())
        .filter_map(|(key, val)| placeholder_text(val).map(|val| (key, val)))
        .fold(text.to_owned(), |text, (key, val)| text.replace(key.as_str(), &val))
}

/// Represents an image embedded in an email.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub content_id: String,
    pub content_type: ContentType,
    pub content: Vec<u8>,
}

impl InlineImage {
    /// Gets the reference to use from the email body.
    pub fn cid(&self) -> String {
        format!("cid:{}", self.content_id)
    }

    pub fn to_part(&self) -> SinglePart {
        Attachment::new_inline(self.content_id.to_owned())
            .body(base64_body(self.content.to_owned()), self.content_type.to_owned())
    }
}

/// Represents the images collected while resolving template
/// variables.
#[derive(Debug, Default, Clone)]
pub struct InlineImages(Vec<InlineImage>);

impl InlineImages {
    /// Reads the image at the given path and registers it as an
    /// inline image. Returns the reference to use from the body.
    pub fn embed(&mut self, path: &Path) -> Result<String> {
        let content = fs::read(path).map_err(|err| Error::ReadImageError(err, path.to_owned()))?;
        let mime = tree_magic::from_u8(&content);
        let content_type = ContentType::parse(&mime)
            .map_err(|err| Error::ParseContentTypeError(err, mime.to_owned()))?;
        let image = InlineImage {
            content_id: format!("{}@swift.generated", Uuid::new_v4().to_simple()),
            content_type,
            content,
        };
        trace!("inline image {:?} ({}) from {:?}", image.content_id, mime, path);

        let cid = image.cid();
        self.0.push(image);
        Ok(cid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InlineImage> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Resolves the template variables. Image files that exist are
/// embedded and replaced by their reference. Missing image files
/// are replaced by an empty string.
pub fn resolve_tpl_vars(vars: &TplVars, images: &mut InlineImages) -> Result<TplValues> {
    let mut vals = TplValues::new();

    for (key, var) in vars {
        let val = match var {
            TplVar::Text(val) => Value::String(val.to_owned()),
            TplVar::Data(val) => val.to_owned(),
            TplVar::ImageFile {
                filepath: Some(path),
            } if path.is_file() => Value::String(images.embed(path)?),
            TplVar::ImageFile { filepath } => {
                debug!("cannot find image file {:?} for {:?}, skipping it", filepath, key);
                Value::String(String::new())
            }
        };
        vals.insert(key.to_owned(), val);
    }

    Ok(vals)
}
