// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Boots a kernel image under QEMU with a default machine configuration that can be overridden
//! from the command line.

pub mod argument;
pub mod assemble;
pub mod config;
mod error;
pub mod launcher;
pub mod merge;

pub use error::Error;
pub use error::Result;
