//! plugin
//!
//! Subprocess protocol spoken when a host application loads the module.
//!
//! # Protocol
//!
//! ```text
//! memex-git-plugin [repo-path] <id|name|describe|run> [verb] [args...]
//! ```
//!
//! - `id`, `name`, `describe`: the constant metadata string on stdout, with
//!   no trailing newline, exit 0. The repository is never consulted.
//! - `run <verb> [args...]`: forwards to the module. Rendered output goes to
//!   stdout; an error message goes to stderr (no trailing newline) with
//!   exit 1.
//! - `run` without a verb: `command required` on stderr, exit 1.
//! - anything else: `unknown command` on stderr, exit 1.
//!
//! The repository path is `$MEMEX_REPO_PATH` if set, otherwise the optional
//! leading `repo-path` argument, otherwise the current directory. A leading
//! argument counts as a path only when it is not a protocol verb and more
//! arguments follow it.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing::debug;

use crate::cli::args::REPO_PATH_ENV;
use crate::core::config::{Overrides, Settings, CONFIG_ENV};
use crate::module::{metadata, GitModule, ModuleConfig, ModuleError};
use crate::ui::output;

/// Protocol-level failures, reported before any module command runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown command")]
    UnknownCommand,

    #[error("command required")]
    CommandRequired,
}

/// One protocol request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Id,
    Name,
    Describe,
    Run { verb: String, args: Vec<String> },
}

impl Request {
    fn is_protocol_verb(arg: &str) -> bool {
        matches!(arg, "id" | "name" | "describe" | "run")
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCall {
    /// Leading positional repository path, if one was given
    pub repo_arg: Option<String>,
    pub request: Request,
}

/// Parse process arguments (without the program name).
pub fn parse(args: &[String]) -> Result<PluginCall, ProtocolError> {
    let (repo_arg, rest) = match args.split_first() {
        Some((first, rest)) if !Request::is_protocol_verb(first) && !rest.is_empty() => {
            (Some(first.clone()), rest)
        }
        _ => (None, args),
    };

    let (verb, rest) = rest.split_first().ok_or(ProtocolError::UnknownCommand)?;
    let request = match verb.as_str() {
        "id" => Request::Id,
        "name" => Request::Name,
        "describe" => Request::Describe,
        "run" => {
            let (nested, nested_args) = rest.split_first().ok_or(ProtocolError::CommandRequired)?;
            Request::Run {
                verb: nested.clone(),
                args: nested_args.to_vec(),
            }
        }
        _ => return Err(ProtocolError::UnknownCommand),
    };

    Ok(PluginCall { repo_arg, request })
}

/// Pick the repository path: environment first, then the positional
/// argument, then the current directory (empty string).
pub fn repo_path(env_value: Option<String>, repo_arg: Option<String>) -> String {
    env_value
        .filter(|v| !v.is_empty())
        .or(repo_arg)
        .unwrap_or_default()
}

/// What a host needs from a loaded module.
pub trait HostModule {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// Run a verb and return its rendered output.
    fn run(&mut self, verb: &str, args: &[String]) -> Result<String, ModuleError>;
}

impl HostModule for GitModule {
    fn id(&self) -> &str {
        metadata::ID
    }

    fn name(&self) -> &str {
        metadata::NAME
    }

    fn description(&self) -> &str {
        metadata::DESCRIPTION
    }

    fn run(&mut self, verb: &str, args: &[String]) -> Result<String, ModuleError> {
        let result = self.handle_command(verb, args)?;
        Ok(output::render(&result, self.settings().hash_style))
    }
}

/// Answer one request, writing to the given streams.
///
/// Returns the process exit code.
pub fn serve<M: HostModule>(
    request: &Request,
    module: &mut M,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<u8> {
    match request {
        Request::Id => write!(out, "{}", module.id())?,
        Request::Name => write!(out, "{}", module.name())?,
        Request::Describe => write!(out, "{}", module.description())?,
        Request::Run { verb, args } => match module.run(verb, args) {
            Ok(text) => writeln!(out, "{}", text)?,
            Err(e) => {
                write!(err, "{}", e)?;
                return Ok(1);
            }
        },
    }
    out.flush()?;
    Ok(0)
}

/// Entry point for the plugin binary.
pub fn run() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let call = match parse(&args) {
        Ok(call) => call,
        Err(e) => {
            let _ = write!(err, "{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Metadata answers never depend on configuration.
    let settings = match &call.request {
        Request::Run { .. } => {
            let config_path = std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
            match Settings::resolve(
                Settings::hosted(),
                config_path.as_deref(),
                &Overrides::default(),
            ) {
                Ok(settings) => settings,
                Err(e) => {
                    let _ = write!(err, "{}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        _ => Settings::hosted(),
    };

    let repo = repo_path(std::env::var(REPO_PATH_ENV).ok(), call.repo_arg);
    debug!(repo = %repo, request = ?call.request, "plugin request");

    let mut module = GitModule::new(ModuleConfig::new(repo, settings));
    match serve(&call.request, &mut module, &mut out, &mut err) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Records what it was asked to run.
    #[derive(Default)]
    struct FakeModule {
        calls: Vec<(String, Vec<String>)>,
        fail_with: Option<ModuleError>,
    }

    impl HostModule for FakeModule {
        fn id(&self) -> &str {
            "fake"
        }

        fn name(&self) -> &str {
            "Fake Module"
        }

        fn description(&self) -> &str {
            "Does nothing"
        }

        fn run(&mut self, verb: &str, args: &[String]) -> Result<String, ModuleError> {
            self.calls.push((verb.to_string(), args.to_vec()));
            match self.fail_with.take() {
                Some(e) => Err(e),
                None => Ok(format!("ran {}", verb)),
            }
        }
    }

    fn serve_fake(request: &Request, module: &mut FakeModule) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = serve(request, module, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    mod parsing {
        use super::*;

        #[test]
        fn metadata_verbs() {
            assert_eq!(parse(&args(&["id"])).unwrap().request, Request::Id);
            assert_eq!(parse(&args(&["name"])).unwrap().request, Request::Name);
            assert_eq!(
                parse(&args(&["describe"])).unwrap().request,
                Request::Describe
            );
        }

        #[test]
        fn run_forwards_nested_verb_and_args() {
            let call = parse(&args(&["run", "commit", "hello", "extra"])).unwrap();
            assert_eq!(call.repo_arg, None);
            assert_eq!(
                call.request,
                Request::Run {
                    verb: "commit".into(),
                    args: args(&["hello", "extra"]),
                }
            );
        }

        #[test]
        fn run_without_verb() {
            assert_eq!(
                parse(&args(&["run"])),
                Err(ProtocolError::CommandRequired)
            );
        }

        #[test]
        fn no_arguments_is_unknown() {
            assert_eq!(parse(&[]), Err(ProtocolError::UnknownCommand));
        }

        #[test]
        fn unknown_single_argument() {
            assert_eq!(
                parse(&args(&["status"])),
                Err(ProtocolError::UnknownCommand)
            );
        }

        #[test]
        fn leading_repo_path() {
            let call = parse(&args(&["/srv/memex", "run", "status"])).unwrap();
            assert_eq!(call.repo_arg.as_deref(), Some("/srv/memex"));
            assert_eq!(
                call.request,
                Request::Run {
                    verb: "status".into(),
                    args: vec![],
                }
            );
        }

        #[test]
        fn leading_repo_path_then_unknown_verb() {
            assert_eq!(
                parse(&args(&["/srv/memex", "push"])),
                Err(ProtocolError::UnknownCommand)
            );
        }

        #[test]
        fn protocol_verb_never_taken_as_path() {
            let call = parse(&args(&["name", "id"])).unwrap();
            assert_eq!(call.repo_arg, None);
            assert_eq!(call.request, Request::Name);
        }
    }

    mod repo_path {
        use super::*;

        #[test]
        fn env_wins() {
            assert_eq!(
                repo_path(Some("/env".into()), Some("/arg".into())),
                "/env"
            );
        }

        #[test]
        fn empty_env_falls_through() {
            assert_eq!(repo_path(Some(String::new()), Some("/arg".into())), "/arg");
        }

        #[test]
        fn defaults_to_current_directory() {
            assert_eq!(repo_path(None, None), "");
        }
    }

    mod serving {
        use super::*;

        #[test]
        fn metadata_is_unterminated() {
            let mut module = FakeModule::default();
            assert_eq!(
                serve_fake(&Request::Id, &mut module),
                (0, "fake".to_string(), String::new())
            );
            assert_eq!(serve_fake(&Request::Describe, &mut module).1, "Does nothing");
            assert!(module.calls.is_empty());
        }

        #[test]
        fn run_success_writes_stdout() {
            let mut module = FakeModule::default();
            let request = Request::Run {
                verb: "log".into(),
                args: vec![],
            };
            let (code, out, err) = serve_fake(&request, &mut module);
            assert_eq!(code, 0);
            assert_eq!(out, "ran log\n");
            assert!(err.is_empty());
            assert_eq!(module.calls, vec![("log".to_string(), vec![])]);
        }

        #[test]
        fn run_failure_writes_stderr_and_exits_one() {
            let mut module = FakeModule {
                fail_with: Some(ModuleError::NotInitialized),
                ..Default::default()
            };
            let request = Request::Run {
                verb: "status".into(),
                args: vec![],
            };
            let (code, out, err) = serve_fake(&request, &mut module);
            assert_eq!(code, 1);
            assert!(out.is_empty());
            assert_eq!(err, "git repository not initialized");
        }

        #[test]
        fn git_module_metadata_ignores_missing_path() {
            let temp = TempDir::new().unwrap();
            let missing = temp.path().join("does/not/exist");
            let mut module = GitModule::new(ModuleConfig::new(
                missing.to_string_lossy(),
                Settings::hosted(),
            ));

            let mut out = Vec::new();
            let mut err = Vec::new();
            serve(&Request::Name, &mut module, &mut out, &mut err).unwrap();
            assert_eq!(out, b"Git Management");
            assert!(!missing.exists());
        }
    }
}
