// Copyright 2026 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Handles argument matching against a fixed option table.
//!
//! Unlike a general purpose parser, arguments that are not in the table are not an error. They are
//! handed back to the caller as [`Match::Unknown`] so they can be passed through to another
//! program untouched.
//!
//! # Example
//!
//! ```
//! # use qemu_runner::argument::{Argument, Error, Match, set_arguments};
//! let arguments = &[
//!     Argument::value("-m", "SIZE", "guest memory size"),
//!     Argument::flag("-s", "start a gdb stub"),
//! ];
//!
//! let mut forwarded = Vec::new();
//! let res: Result<(), Error> = set_arguments(&["-m=2G", "-s", "-vnc"], arguments, |m| {
//!     match m {
//!         Match::Option { name: "-m", value, .. } => assert_eq!(value, Some("2G")),
//!         Match::Option { name: "-s", .. } => {}
//!         Match::Option { .. } => unreachable!(),
//!         Match::Unknown(raw) => forwarded.push(raw),
//!     }
//!     Ok(())
//! });
//! assert!(res.is_ok());
//! assert_eq!(forwarded, vec!["-vnc"]);
//! ```

use std::fmt::Write;
use std::result;

use remain::sorted;
use thiserror::Error;

/// An error with argument matching.
#[sorted]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The argument expects a value but none followed it.
    #[error("expected a value for {0}")]
    ExpectedValue(String),
}

/// Result of argument matching.
pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArgumentValueMode {
    /// The value is either attached with `=` or taken from the following argument.
    Required,

    /// The value must be attached with `=`. The bare name does not match.
    Inline,

    /// The argument must be spelled exactly and takes no value.
    Disallowed,

    /// Any argument that starts with the name matches. No value is split off.
    Prefix,
}

/// Information about an argument recognized on the command line.
#[derive(Debug)]
pub struct Argument {
    /// The name of the value to display in the usage information.
    pub value: Option<&'static str>,
    /// Specifies how values should be handled for this argument.
    pub value_mode: ArgumentValueMode,
    /// The full spelling of the argument, including leading dashes.
    pub name: &'static str,
    /// Usage information for this argument to display to the user.
    pub help: &'static str,
}

impl Argument {
    pub const fn value(name: &'static str, value: &'static str, help: &'static str) -> Argument {
        Argument {
            value: Some(value),
            value_mode: ArgumentValueMode::Required,
            name,
            help,
        }
    }

    pub const fn inline_value(
        name: &'static str,
        value: &'static str,
        help: &'static str,
    ) -> Argument {
        Argument {
            value: Some(value),
            value_mode: ArgumentValueMode::Inline,
            name,
            help,
        }
    }

    pub const fn flag(name: &'static str, help: &'static str) -> Argument {
        Argument {
            value: None,
            value_mode: ArgumentValueMode::Disallowed,
            name,
            help,
        }
    }

    pub const fn prefix(name: &'static str, help: &'static str) -> Argument {
        Argument {
            value: None,
            value_mode: ArgumentValueMode::Prefix,
            name,
            help,
        }
    }
}

/// A single argument as seen by the callback of [`set_arguments`].
#[derive(Debug, PartialEq, Eq)]
pub enum Match<'a> {
    /// An argument from the table.
    Option {
        /// `name` of the matching table entry.
        name: &'static str,
        /// The value, for arguments that take one.
        value: Option<&'a str>,
        /// The argument exactly as given, without any separate value argument.
        raw: &'a str,
    },
    /// An argument that is not in the table.
    Unknown(&'a str),
}

enum Hit<'a> {
    Flag,
    Inline(&'a str),
    NextArgument,
}

fn hit<'a>(arg: &Argument, raw: &'a str) -> Option<Hit<'a>> {
    match arg.value_mode {
        ArgumentValueMode::Disallowed => (raw == arg.name).then_some(Hit::Flag),
        ArgumentValueMode::Prefix => raw.starts_with(arg.name).then_some(Hit::Flag),
        ArgumentValueMode::Inline => raw
            .strip_prefix(arg.name)?
            .strip_prefix('=')
            .map(Hit::Inline),
        ArgumentValueMode::Required => {
            let rest = raw.strip_prefix(arg.name)?;
            if rest.is_empty() {
                Some(Hit::NextArgument)
            } else {
                rest.strip_prefix('=').map(Hit::Inline)
            }
        }
    }
}

/// Walks `args` left to right, matching each against `arg_list`, and calls `f` once per argument
/// or argument/value pair.
///
/// The first table entry that matches wins. An argument in [`ArgumentValueMode::Required`] mode
/// spelled without `=` consumes the following argument as its value whatever it looks like. If
/// there is no following argument, [`Error::ExpectedValue`] is returned. If the callback returns
/// `Err`, matching stops and that `Err` is returned.
pub fn set_arguments<'a, R, F, E>(
    args: &'a [R],
    arg_list: &[Argument],
    mut f: F,
) -> result::Result<(), E>
where
    R: AsRef<str>,
    F: FnMut(Match<'a>) -> result::Result<(), E>,
    E: From<Error>,
{
    let mut cursor = args.iter();
    while let Some(raw) = cursor.next() {
        let raw = raw.as_ref();
        let found = arg_list
            .iter()
            .find_map(|arg| hit(arg, raw).map(|h| (arg.name, h)));
        let m = match found {
            None => Match::Unknown(raw),
            Some((name, Hit::Flag)) => Match::Option {
                name,
                value: None,
                raw,
            },
            Some((name, Hit::Inline(value))) => Match::Option {
                name,
                value: Some(value),
                raw,
            },
            Some((name, Hit::NextArgument)) => match cursor.next() {
                Some(value) => Match::Option {
                    name,
                    value: Some(value.as_ref()),
                    raw,
                },
                None => return Err(Error::ExpectedValue(name.to_owned()).into()),
            },
        };
        f(m)?;
    }
    Ok(())
}

/// Formats command line usage information.
///
/// The usage line is of the format "`program_name` `required_arg` \[ARGUMENTS\]", followed by one
/// line per table entry.
pub fn format_help(program_name: &str, required_arg: &str, args: &[Argument]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Usage: {} {}{}\n",
        program_name,
        required_arg,
        if args.is_empty() { "" } else { " [ARGUMENTS]" }
    );
    if args.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Argument{}:", if args.len() > 1 { "s" } else { "" });
    for arg in args {
        let spelling = match (arg.value_mode, arg.value) {
            (ArgumentValueMode::Required, Some(v)) => format!("{}[=]{}", arg.name, v),
            (ArgumentValueMode::Inline, Some(v)) => format!("{}={}", arg.name, v),
            (ArgumentValueMode::Prefix, _) => format!("{}*", arg.name),
            _ => arg.name.to_owned(),
        };
        let _ = writeln!(out, "  {:<24}{}", spelling, arg.help);
    }
    let _ = writeln!(out, "\nAny other argument is passed to the emulator unchanged.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<'a>(args: &'a [&'a str], arg_list: &[Argument]) -> Result<Vec<Match<'a>>> {
        let mut matches = Vec::new();
        set_arguments(args, arg_list, |m| {
            matches.push(m);
            Ok::<(), Error>(())
        })?;
        Ok(matches)
    }

    #[test]
    fn name_value_pair() {
        let arguments = [Argument::value("-smp", "N", "number of cores")];
        let matches = collect(&["-smp", "5", "-smp=5"], &arguments).unwrap();
        assert_eq!(
            matches,
            vec![
                Match::Option {
                    name: "-smp",
                    value: Some("5"),
                    raw: "-smp"
                },
                Match::Option {
                    name: "-smp",
                    value: Some("5"),
                    raw: "-smp=5"
                },
            ]
        );

        let not_match_res = collect(&["-smp", "5", "-smp"], &arguments);
        assert_eq!(not_match_res, Err(Error::ExpectedValue("-smp".to_owned())));
    }

    #[test]
    fn next_argument_taken_verbatim() {
        let arguments = [Argument::value("-append", "CMDLINE", "kernel command line")];
        let matches = collect(&["-append", "--init=/bin/sh"], &arguments).unwrap();
        assert_eq!(
            matches,
            vec![Match::Option {
                name: "-append",
                value: Some("--init=/bin/sh"),
                raw: "-append"
            }]
        );
    }

    #[test]
    fn explicit_empty_value() {
        let arguments = [Argument::value("-cpu", "MODEL", "cpu model")];
        let matches = collect(&["-cpu="], &arguments).unwrap();
        assert_eq!(
            matches,
            vec![Match::Option {
                name: "-cpu",
                value: Some(""),
                raw: "-cpu="
            }]
        );
    }

    #[test]
    fn similar_names_do_not_match() {
        let arguments = [
            Argument::value("-m", "SIZE", "memory"),
            Argument::flag("-s", "gdb stub"),
            Argument::inline_value("--init", "PATH", "init program"),
        ];
        let args = ["-machine", "-smp", "-sx", "--init", "--init-arg=-i"];
        let matches = collect(&args, &arguments).unwrap();
        assert_eq!(
            matches,
            vec![
                Match::Unknown("-machine"),
                Match::Unknown("-smp"),
                Match::Unknown("-sx"),
                Match::Unknown("--init"),
                Match::Unknown("--init-arg=-i"),
            ]
        );
    }

    #[test]
    fn inline_only() {
        let arguments = [Argument::inline_value("--rootfs", "FS", "root filesystem")];
        let matches = collect(&["--rootfs=ext4fs", "--rootfs", "tmpfs"], &arguments).unwrap();
        assert_eq!(
            matches,
            vec![
                Match::Option {
                    name: "--rootfs",
                    value: Some("ext4fs"),
                    raw: "--rootfs=ext4fs"
                },
                Match::Unknown("--rootfs"),
                Match::Unknown("tmpfs"),
            ]
        );
    }

    #[test]
    fn prefix_match() {
        let arguments = [
            Argument::prefix("-display", "display backend"),
            Argument::prefix("--display", "display backend"),
        ];
        let matches = collect(&["-display", "--display=gtk", "-displayx"], &arguments).unwrap();
        assert_eq!(
            matches,
            vec![
                Match::Option {
                    name: "-display",
                    value: None,
                    raw: "-display"
                },
                Match::Option {
                    name: "--display",
                    value: None,
                    raw: "--display=gtk"
                },
                Match::Option {
                    name: "-display",
                    value: None,
                    raw: "-displayx"
                },
            ]
        );
    }

    #[test]
    fn callback_error_stops() {
        let arguments = [Argument::flag("-s", "gdb stub")];
        let mut calls = 0;
        let res = set_arguments(&["-s", "-s"], &arguments, |_| {
            calls += 1;
            Err(Error::ExpectedValue("stop".to_owned()))
        });
        assert!(res.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn help_lists_arguments() {
        let arguments = [
            Argument::value("-M", "MACHINE", "machine type"),
            Argument::inline_value("--init", "PATH", "init program"),
            Argument::flag("-s", "gdb stub"),
            Argument::prefix("-display", "display backend"),
        ];
        let help = format_help("runner", "IMAGE", &arguments);
        assert!(help.starts_with("Usage: runner IMAGE [ARGUMENTS]\n"));
        assert!(help.contains("-M[=]MACHINE"));
        assert!(help.contains("--init=PATH"));
        assert!(help.contains("-display*"));
        assert!(help.contains("\n  -s "));
    }
}
