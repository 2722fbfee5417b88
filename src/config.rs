use std::{ffi::OsString, path::PathBuf};

use crate::error::{Error, Result};

pub const USAGE: &str = "usage: process-image [-v|--verbose] <input-path> <output-path>";

/// Command-line configuration for `process-image`.
#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub verbose: bool,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Args {
    /// Parses arguments with the program name already stripped.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut verbose = false;
        let mut positional = Vec::with_capacity(2);
        for arg in args.into_iter().map(Into::into) {
            if arg == "-v" || arg == "--verbose" {
                verbose = true;
                continue;
            }
            // Paths need not be valid UTF-8, flags must be.
            if let Some(flag) = arg.to_str().filter(|a| a.starts_with('-') && a.len() > 1) {
                return Err(Error::Usage(format!("unknown flag {flag}")));
            }
            positional.push(PathBuf::from(arg));
        }
        match <[PathBuf; 2]>::try_from(positional) {
            Ok([input, output]) => Ok(Self {
                verbose,
                input,
                output,
            }),
            Err(positional) => Err(Error::Usage(format!(
                "expected 2 paths, got {}",
                positional.len()
            ))),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Error
        }
    }
}
