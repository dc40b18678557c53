// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Helper for creating a guest kernel command line out of individually overridable entries.

use std::convert::Infallible;
use std::fmt;
use std::fmt::Display;
use std::result;
use std::str::FromStr;

use remain::sorted;
use thiserror::Error;

/// The error type for command line building operations.
#[sorted]
#[derive(Error, PartialEq, Eq, Debug)]
pub enum Error {
    /// Key contains an equals sign.
    #[error("key {0:?} contains an equals sign")]
    HasEquals(String),
    /// Key contains whitespace.
    #[error("key {0:?} contains whitespace")]
    HasSpace(String),
    /// Key is empty.
    #[error("key is empty")]
    MissingKey,
}

/// Specialized Result type for command line operations.
pub type Result<T> = result::Result<T, Error>;

fn valid_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::MissingKey);
    }
    if key.chars().any(char::is_whitespace) {
        return Err(Error::HasSpace(key.to_owned()));
    }
    if key.contains('=') {
        return Err(Error::HasEquals(key.to_owned()));
    }
    Ok(())
}

/// A single entry of a kernel command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Opaque text rendered as-is. Never matched by a key.
    Literal(String),
    /// A `key=value` pair.
    KeyValue { key: String, value: String },
}

impl Entry {
    /// Returns the key of this entry, if it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Entry::Literal(_) => None,
            Entry::KeyValue { key, .. } => Some(key),
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Entry::Literal(text) => write!(f, "{}", text),
            Entry::KeyValue { key, value } => write!(f, "{}={}", key, value),
        }
    }
}

/// A kernel command line made of ordered entries.
///
/// Keyed entries can be overridden one at a time with [`Cmdline::insert`], or the whole line can
/// be swapped for an opaque string with [`Cmdline::replace_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmdline {
    entries: Vec<Entry>,
}

impl Cmdline {
    /// Constructs an empty command line.
    pub fn new() -> Cmdline {
        Cmdline {
            entries: Vec::new(),
        }
    }

    /// Sets `key` to `value`.
    ///
    /// The first entry with a matching key is replaced in place. If there is none, a new entry is
    /// appended to the end of the line.
    pub fn insert<T: AsRef<str>>(&mut self, key: &str, value: T) -> Result<()> {
        valid_key(key)?;
        let value = value.as_ref().to_owned();
        match self.entries.iter_mut().find(|e| e.key() == Some(key)) {
            Some(entry) => {
                *entry = Entry::KeyValue {
                    key: key.to_owned(),
                    value,
                }
            }
            None => self.entries.push(Entry::KeyValue {
                key: key.to_owned(),
                value,
            }),
        }
        Ok(())
    }

    /// Appends a bare token to the end of the line.
    pub fn insert_str<T: AsRef<str>>(&mut self, text: T) {
        self.entries.push(Entry::Literal(text.as_ref().to_owned()));
    }

    /// Discards every entry and installs `literal` as the sole, opaque entry.
    pub fn replace_all<T: AsRef<str>>(&mut self, literal: T) {
        self.entries.clear();
        self.insert_str(literal);
    }

    /// Returns the value of the first entry keyed by `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            Entry::KeyValue { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the command line as the single string handed to the guest kernel.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl Display for Cmdline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl FromStr for Cmdline {
    type Err = Infallible;

    /// Splits `s` on whitespace. Words of the form `key=value` become keyed entries, every other
    /// word is kept as a literal.
    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        let entries = s
            .split_whitespace()
            .map(|word| match word.split_once('=') {
                Some((key, value)) if !key.is_empty() => Entry::KeyValue {
                    key: key.to_owned(),
                    value: value.to_owned(),
                },
                _ => Entry::Literal(word.to_owned()),
            })
            .collect();
        Ok(Cmdline { entries })
    }
}
