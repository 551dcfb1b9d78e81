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

//! Config store module.
//!
//! This module contains the key/value store abstraction the host
//! platform exposes its configuration through, plus an in-memory
//! implementation.

use serde::Deserialize;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Represents the identifier of a shop site.
pub type ShopId = u32;

/// Represents a read access to the host configuration.
///
/// Values are scoped per shop. A lookup with a shop id is expected
/// to fall back to the global scope when the shop does not define
/// the key.
pub trait ConfigStore {
    fn get(&self, key: &str, shop_id: Option<ShopId>) -> Option<String>;

    /// Gets the value of the given key, treating empty values as
    /// missing ones.
    fn get_non_empty(&self, key: &str, shop_id: Option<ShopId>) -> Option<String> {
        self.get(key, shop_id).filter(|val| !val.is_empty())
    }

    fn get_or(&self, key: &str, shop_id: Option<ShopId>, default: &str) -> String {
        self.get_non_empty(key, shop_id)
            .unwrap_or_else(|| default.to_owned())
    }
}

/// Represents a write access to the host configuration.
pub trait ConfigStoreMut: ConfigStore {
    fn set(&mut self, key: &str, val: String, shop_id: Option<ShopId>);
}

/// Represents an in-memory configuration store.
#[derive(Debug, Default, Clone, Eq, PartialEq, Deserialize)]
pub struct MemoryConfig {
    /// Represents the values shared by all shops.
    #[serde(default)]
    pub global: HashMap<String, String>,
    /// Represents the values overridden per shop.
    #[serde(default)]
    pub shops: HashMap<ShopId, HashMap<String, String>>,
}

impl MemoryConfig {
    pub fn with<K: ToString, V: ToString>(mut self, key: K, val: V) -> Self {
        self.global.insert(key.to_string(), val.to_string());
        self
    }

    pub fn with_shop<K: ToString, V: ToString>(mut self, shop_id: ShopId, key: K, val: V) -> Self {
        self.shops
            .entry(shop_id)
            .or_default()
            .insert(key.to_string(), val.to_string());
        self
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str, shop_id: Option<ShopId>) -> Option<String> {
        shop_id
            .and_then(|id| self.shops.get(&id))
            .and_then(|vals| vals.get(key))
            .or_else(|| self.global.get(key))
            .cloned()
    }
}

impl ConfigStoreMut for MemoryConfig {
    fn set(&mut self, key: &str, val: String, shop_id: Option<ShopId>) {
        match shop_id {
            Some(id) => self.shops.entry(id).or_default().insert(key.to_owned(), val),
            None => self.global.insert(key.to_owned(), val),
        };
    }
}

/// Represents a configuration store shared between the settings
/// form and the transports handed to the host.
pub type SharedConfig = Arc<RwLock<MemoryConfig>>;

impl<T: ConfigStore> ConfigStore for Arc<RwLock<T>> {
    fn get(&self, key: &str, shop_id: Option<ShopId>) -> Option<String> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key, shop_id)
    }
}

impl<T: ConfigStoreMut> ConfigStoreMut for Arc<RwLock<T>> {
    fn set(&mut self, key: &str, val: String, shop_id: Option<ShopId>) {
        self.write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, val, shop_id)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get(&self, key: &str, shop_id: Option<ShopId>) -> Option<String> {
        (**self).get(key, shop_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_value_overrides_global_value() {
        let config = MemoryConfig::default()
            .with("PS_MAIL_SERVER", "global.localhost")
            .with_shop(2, "PS_MAIL_SERVER", "shop.localhost");

        assert_eq!(
            Some("global.localhost".to_owned()),
            config.get("PS_MAIL_SERVER", None)
        );
        assert_eq!(
            Some("global.localhost".to_owned()),
            config.get("PS_MAIL_SERVER", Some(1))
        );
        assert_eq!(
            Some("shop.localhost".to_owned()),
            config.get("PS_MAIL_SERVER", Some(2))
        );
    }

    #[test]
    fn empty_value_is_treated_as_missing() {
        let config = MemoryConfig::default().with("PS_MAIL_USER", "");

        assert_eq!(Some(String::new()), config.get("PS_MAIL_USER", None));
        assert_eq!(None, config.get_non_empty("PS_MAIL_USER", None));
        assert_eq!("nobody", config.get_or("PS_MAIL_USER", None, "nobody"));
    }

    #[test]
    fn shared_config_sees_writes() {
        let config = SharedConfig::default();
        let mut writer = config.clone();

        writer.set("PS_MAIL_METHOD", "2".into(), None);

        assert_eq!(Some("2".to_owned()), config.get("PS_MAIL_METHOD", Some(1)));
    }
}
