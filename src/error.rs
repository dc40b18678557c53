// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::io;
use std::process::ExitStatus;

use remain::sorted;
use thiserror::Error;

use crate::argument;

#[sorted]
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    Argument(#[from] argument::Error),
    #[error("invalid boot command line entry: {0}")]
    BootCmdline(#[from] kernel_cmdline::Error),
    #[error("{program} failed to convert the kernel image: {status}")]
    ConvertFailed { program: String, status: ExitStatus },
    #[error("expected a kernel image path")]
    MissingImage,
    #[error("failed to run {program}")]
    RunConverter {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {program}")]
    RunEmulator {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Whether this error was caused by how the launcher was invoked.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Argument(_) | Error::MissingImage)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
