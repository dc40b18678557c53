// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Runs a kernel image under QEMU.

use std::env;
use std::process;

use anyhow::Context;
use log::error;

use qemu_runner::argument::format_help;
use qemu_runner::config::LauncherConfig;
use qemu_runner::launcher;
use qemu_runner::merge::ARGUMENTS;
use qemu_runner::Error;

const PROGRAM_NAME: &str = "qemu-runner";

fn runner_main() -> anyhow::Result<i32> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = LauncherConfig::from_env();
    launcher::run_with_config(&config, &args).context("failed to run the kernel")
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let code = match runner_main() {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<Error>() {
                Some(err) if err.is_usage() => {
                    eprintln!("{}\n", err);
                    eprint!("{}", format_help(PROGRAM_NAME, "IMAGE", ARGUMENTS));
                }
                _ => error!("{:#}", e),
            }
            1
        }
    };
    process::exit(code);
}
