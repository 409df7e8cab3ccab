//! Shared harness for `talonctl` runtime tests.


use std::cell::RefCell;
use std::ffi::OsString;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use talon_config::Config;
use tempfile::TempDir;

use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::{IoStreams, run_with_loader};

/// Loader returning a fixed configuration and recording what it was given.
pub(crate) struct StaticConfigLoader {
    config: Config,
    received: RefCell<Vec<OsString>>,
}

impl StaticConfigLoader {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            config,
            received: RefCell::new(Vec::new()),
        }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.received.replace(args.to_vec());
        Ok(self.config.clone())
    }
}

pub(crate) struct TestWorld {
    pub(crate) dir: TempDir,
    pub(crate) config: Config,
    pub(crate) loader_arguments: Vec<OsString>,
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,
    pub(crate) exit_code: Option<ExitCode>,
}

impl TestWorld {
    pub(crate) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            config: Config::default(),
            loader_arguments: Vec::new(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        }
    }

    pub(crate) fn home(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf()).expect("utf8 temp dir")
    }

    pub(crate) fn run(&mut self, command: &str) {
        self.stdout.clear();
        self.stderr.clear();
        let args: Vec<OsString> = std::iter::once("talonctl")
            .chain(command.split_whitespace())
            .map(OsString::from)
            .collect();
        let loader = StaticConfigLoader::new(self.config.clone());
        let io = IoStreams {
            stdout: &mut self.stdout,
            stderr: &mut self.stderr,
        };
        self.exit_code = Some(run_with_loader(args, io, &loader));
        self.loader_arguments = loader.received.into_inner();
    }

    pub(crate) fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.clone()).expect("stdout utf8")
    }

    pub(crate) fn stderr_text(&self) -> String {
        String::from_utf8(self.stderr.clone()).expect("stderr utf8")
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        self.exit_code.expect("exit code recorded")
    }
}
