// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Converts the kernel image and hands the assembled command to the emulator.

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;

use log::debug;
use log::info;

use crate::config::default_boot_cmdline;
use crate::config::LauncherConfig;
use crate::config::MachineConfig;
use crate::merge::merge;
use crate::Error;
use crate::Result;

/// Produces a flat binary from an executable image.
pub trait BinaryConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Runs the emulator with a complete argument vector and reports its exit code.
pub trait ProcessConsumer {
    fn launch(&self, args: &[String]) -> Result<i32>;
}

/// [`BinaryConverter`] backed by an objcopy executable.
pub struct Objcopy {
    program: String,
}

impl Objcopy {
    pub fn new<T: Into<String>>(program: T) -> Self {
        Objcopy {
            program: program.into(),
        }
    }
}

impl BinaryConverter for Objcopy {
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        info!("converting {} to {}", input.display(), output.display());
        let status = Command::new(&self.program)
            .args(["-O", "binary"])
            .arg(input)
            .arg(output)
            .status()
            .map_err(|source| Error::RunConverter {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(Error::ConvertFailed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// [`ProcessConsumer`] that runs an emulator executable attached to this process's terminal.
pub struct Qemu {
    program: String,
}

impl Qemu {
    pub fn new<T: Into<String>>(program: T) -> Self {
        Qemu {
            program: program.into(),
        }
    }
}

impl ProcessConsumer for Qemu {
    fn launch(&self, args: &[String]) -> Result<i32> {
        info!("starting {}", self.program);
        debug!("{} {:?}", self.program, args);
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|source| Error::RunEmulator {
                program: self.program.clone(),
                source,
            })?;
        Ok(exit_code(status))
    }
}

/// Maps a child's exit status to the code this process should exit with.
///
/// A child killed by a signal is reported the way shells do, as 128 plus the signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Path of the flat binary produced from `image`.
pub fn binary_path(image: &Path) -> PathBuf {
    image.with_extension("bin")
}

/// Runs one launch: `args[0]` is the kernel image, the rest are emulator options.
///
/// The options are merged before anything touches the filesystem, so a malformed command line
/// leaves no converted image behind and starts no emulator. Returns the emulator's exit code.
pub fn run<R: AsRef<str>>(
    args: &[R],
    converter: &dyn BinaryConverter,
    consumer: &dyn ProcessConsumer,
) -> Result<i32> {
    let (image, rest) = args.split_first().ok_or(Error::MissingImage)?;
    let image = Path::new(image.as_ref());
    let merged = merge(MachineConfig::default(), default_boot_cmdline(), rest)?;
    let binary = binary_path(image);
    converter.convert(image, &binary)?;
    consumer.launch(&merged.assemble(&binary))
}

/// Runs one launch with the tools named in `config`.
pub fn run_with_config<R: AsRef<str>>(config: &LauncherConfig, args: &[R]) -> Result<i32> {
    run(
        args,
        &Objcopy::new(config.objcopy.as_str()),
        &Qemu::new(config.emulator.as_str()),
    )
}
