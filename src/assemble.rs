// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Renders a merged configuration into the emulator's argument vector.

use std::path::Path;

use kernel_cmdline::Cmdline;

use crate::config::MachineConfig;
use crate::merge::Merged;

/// Builds the full emulator argument vector.
///
/// Machine parameters come first in a fixed order, followed by the kernel and its command line,
/// then every forwarded argument in its original order. Values are never split or quoted.
pub fn assemble(
    config: &MachineConfig,
    boot: &Cmdline,
    forward: &[String],
    kernel: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-M".into(),
        config.machine.clone(),
        "-initrd".into(),
        config.disk_image.clone(),
        "-cpu".into(),
        config.cpu.clone(),
        "-m".into(),
        config.memory.clone(),
        "-smp".into(),
        config.cores.clone(),
    ];
    if config.no_graphics {
        args.push("-nographic".into());
    }
    if config.debug_stub {
        args.push("-s".into());
    }
    args.push("-kernel".into());
    args.push(kernel.to_string_lossy().into_owned());
    args.push("-append".into());
    args.push(boot.as_string());
    args.extend(forward.iter().cloned());
    args
}

impl Merged {
    /// Shorthand for [`assemble`] on the merged state.
    pub fn assemble(&self, kernel: &Path) -> Vec<String> {
        assemble(&self.config, &self.boot, &self.forward, kernel)
    }
}
