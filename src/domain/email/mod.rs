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

//! Email module.
//!
//! This module contains the value holders the host platform hands to
//! the transport, and the helpers turning them into [`lettre`] parts.

use std::{io, path::PathBuf, result};
use thiserror::Error;

mod addr;
pub use addr::*;

mod attachment;
pub use attachment::*;

mod tpl;
pub use tpl::*;

mod vars;
pub use vars::*;

mod decorator;
pub use decorator::*;

mod id;
pub use id::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse email address {1:?}")]
    ParseAddressError(#[source] lettre::address::AddressError, String),
    #[error("cannot parse content type {1:?}")]
    ParseContentTypeError(#[source] lettre::message::header::ContentTypeErr, String),
    #[error("cannot read image file at {1}")]
    ReadImageError(#[source] io::Error, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;
