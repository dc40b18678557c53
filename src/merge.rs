// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Merges caller supplied arguments into the default machine configuration.
//!
//! Arguments are processed in a single left to right pass. Recognized options update the
//! [`MachineConfig`] or the boot command line; the last occurrence of an option wins. Everything
//! else is collected, in order and unchanged, to be passed through to the emulator.

use kernel_cmdline::Cmdline;
use log::debug;

use crate::argument::set_arguments;
use crate::argument::Argument;
use crate::argument::Error as ArgumentError;
use crate::argument::Match;
use crate::config::MachineConfig;
use crate::Result;

/// Every option the launcher understands.
pub const ARGUMENTS: &[Argument] = &[
    Argument::value("-M", "MACHINE", "Machine type."),
    Argument::value("-initrd", "IMAGE", "Disk image attached as the initial ramdisk."),
    Argument::value("-cpu", "MODEL", "CPU model."),
    Argument::value("-m", "SIZE", "Guest memory size."),
    Argument::value("-smp", "N", "Number of cores."),
    Argument::flag("-nographic", "Disable graphical output (default)."),
    Argument::prefix("-display", "Select a display backend; implies graphical output."),
    Argument::prefix("--display", "Same as -display."),
    Argument::flag("-s", "Start a gdb stub."),
    Argument::flag("-S", "Pause the guest at startup."),
    Argument::value("-append", "CMDLINE", "Replace the whole kernel command line."),
    Argument::inline_value("--init", "PATH", "Init program run by the guest kernel."),
    Argument::inline_value("--init-arg", "ARG", "Argument passed to the init program."),
    Argument::inline_value("--rootfs", "FS", "Root filesystem type."),
    Argument::inline_value("--automount", "PATH,FS", "Filesystem mounted at boot."),
];

/// The result of merging arguments into the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merged {
    pub config: MachineConfig,
    pub boot: Cmdline,
    /// Arguments passed to the emulator unchanged.
    pub forward: Vec<String>,
}

impl Merged {
    fn forward(&mut self, raw: &str) {
        debug!("forwarding {:?} to the emulator", raw);
        self.forward.push(raw.to_owned());
    }

    fn apply(&mut self, m: Match<'_>) -> Result<()> {
        let (name, value, raw) = match m {
            Match::Option { name, value, raw } => (name, value, raw),
            Match::Unknown(raw) => {
                self.forward(raw);
                return Ok(());
            }
        };
        let required = || value.ok_or_else(|| ArgumentError::ExpectedValue(name.to_owned()));
        match name {
            "-M" => self.config.machine = required()?.to_owned(),
            "-initrd" => self.config.disk_image = required()?.to_owned(),
            "-cpu" => self.config.cpu = required()?.to_owned(),
            "-m" => self.config.memory = required()?.to_owned(),
            "-smp" => self.config.cores = required()?.to_owned(),
            "-nographic" => self.config.no_graphics = true,
            // The emulator refuses -display together with -nographic.
            "-display" | "--display" => {
                self.config.no_graphics = false;
                self.forward(raw);
            }
            "-s" => self.config.debug_stub = true,
            "-S" => self.forward(raw),
            "-append" => self.boot.replace_all(required()?),
            "--init" | "--init-arg" | "--rootfs" | "--automount" => {
                self.boot.insert(name, required()?)?
            }
            _ => self.forward(raw),
        }
        Ok(())
    }
}

/// Applies `args` on top of `config` and `boot`.
///
/// Fails if an option that takes its value from the following argument is the last argument.
pub fn merge<R: AsRef<str>>(config: MachineConfig, boot: Cmdline, args: &[R]) -> Result<Merged> {
    let mut merged = Merged {
        config,
        boot,
        forward: Vec::new(),
    };
    set_arguments(args, ARGUMENTS, |m| merged.apply(m))?;
    Ok(merged)
}
