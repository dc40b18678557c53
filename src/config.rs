// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Built-in machine defaults and the launcher's own settings.

use std::env;

use kernel_cmdline::Cmdline;

pub const DEFAULT_MACHINE: &str = "virt,gic-version=3";
pub const DEFAULT_DISK_IMAGE: &str = "moss.img";
pub const DEFAULT_CPU: &str = "cortex-a72";
pub const DEFAULT_MEMORY: &str = "2G";
pub const DEFAULT_CORES: &str = "4";

/// Boot command line used when nothing on the command line touches it.
pub const DEFAULT_BOOT_CMDLINE: &str = "--init=/bin/bash --init-arg=-i --rootfs=ext4fs \
    --automount=/dev,devfs --automount=/tmp,tmpfs --automount=/proc,procfs";

pub const DEFAULT_EMULATOR: &str = "qemu-system-aarch64";
pub const DEFAULT_OBJCOPY: &str = "aarch64-none-elf-objcopy";

const EMULATOR_ENV: &str = "QEMU_RUNNER_EMULATOR";
const OBJCOPY_ENV: &str = "QEMU_RUNNER_OBJCOPY";

/// Emulated machine parameters.
///
/// All values are passed to the emulator as given; none of them are validated here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    pub machine: String,
    pub disk_image: String,
    pub cpu: String,
    pub memory: String,
    pub cores: String,
    pub no_graphics: bool,
    pub debug_stub: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            machine: DEFAULT_MACHINE.to_owned(),
            disk_image: DEFAULT_DISK_IMAGE.to_owned(),
            cpu: DEFAULT_CPU.to_owned(),
            memory: DEFAULT_MEMORY.to_owned(),
            cores: DEFAULT_CORES.to_owned(),
            no_graphics: true,
            debug_stub: false,
        }
    }
}

/// Returns [`DEFAULT_BOOT_CMDLINE`] split into individually overridable entries.
pub fn default_boot_cmdline() -> Cmdline {
    match DEFAULT_BOOT_CMDLINE.parse() {
        Ok(cmdline) => cmdline,
        Err(never) => match never {},
    }
}

/// Host tools used to convert and run the kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Emulator executable.
    pub emulator: String,
    /// Converter executable, invoked as `objcopy -O binary <in> <out>`.
    pub objcopy: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            emulator: DEFAULT_EMULATOR.to_owned(),
            objcopy: DEFAULT_OBJCOPY.to_owned(),
        }
    }
}

impl LauncherConfig {
    /// Reads tool overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its value. Unset and empty
    /// variables keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        LauncherConfig {
            emulator: get(EMULATOR_ENV, DEFAULT_EMULATOR),
            objcopy: get(OBJCOPY_ENV, DEFAULT_OBJCOPY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boot_cmdline_renders_in_order() {
        assert_eq!(
            default_boot_cmdline().as_string(),
            "--init=/bin/bash --init-arg=-i --rootfs=ext4fs --automount=/dev,devfs \
             --automount=/tmp,tmpfs --automount=/proc,procfs"
        );
    }

    #[test]
    fn default_boot_cmdline_is_keyed() {
        let cmdline = default_boot_cmdline();
        assert_eq!(cmdline.entries().len(), 6);
        assert_eq!(cmdline.get("--init"), Some("/bin/bash"));
        assert_eq!(cmdline.get("--init-arg"), Some("-i"));
        assert_eq!(cmdline.get("--rootfs"), Some("ext4fs"));
        assert_eq!(cmdline.get("--automount"), Some("/dev,devfs"));
    }

    #[test]
    fn launcher_config_defaults() {
        let cfg = LauncherConfig::from_lookup(|_| None);
        assert_eq!(cfg, LauncherConfig::default());
    }

    #[test]
    fn launcher_config_overrides() {
        let cfg = LauncherConfig::from_lookup(|key| match key {
            "QEMU_RUNNER_EMULATOR" => Some("/opt/qemu/bin/qemu-system-aarch64".to_owned()),
            "QEMU_RUNNER_OBJCOPY" => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.emulator, "/opt/qemu/bin/qemu-system-aarch64");
        assert_eq!(cfg.objcopy, DEFAULT_OBJCOPY);
    }
}
