use std::collections::HashMap;

use super::{replace_placeholders, TplValues};

/// Represents per-recipient placeholder substitution applied to a
/// single pre-built email at send time.
///
/// When an email has several recipients, the replacements of the
/// first one win.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Decorator {
    replacements: HashMap<String, TplValues>,
}

impl Decorator {
    pub fn new(replacements: HashMap<String, TplValues>) -> Self {
        Self { replacements }
    }

    pub fn insert<A: ToString>(&mut self, addr: A, vals: TplValues) {
        self.replacements.insert(addr.to_string(), vals);
    }

    pub fn replacements_for(&self, addr: &str) -> Option<&TplValues> {
        self.replacements.get(addr)
    }

    /// Substitutes the placeholders of the given recipient. The text
    /// is left untouched when the recipient has no replacements.
    pub fn decorate(&self, addr: Option<&str>, text: &str) -> String {
        match addr.and_then(|addr| self.replacements_for(addr)) {
            Some(vals) => replace_placeholders(text, vals),
            None => text.to_owned(),
        }
    }
}
