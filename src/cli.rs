use crate::registry::ModuleRegistry;
use crate::resolver::resolve;
use crate::serializer::export_openapi;
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for a locator that could not be resolved
pub const EXIT_RESOLUTION_FAILURE: i32 = 1;

/// Export the OpenAPI specification of a web application
#[derive(Parser, Debug)]
#[command(name = "openapi-export")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Application path (e.g., module:app)
    #[arg(short = 'a', long = "app", value_name = "MODULE:ATTRIBUTE")]
    pub app: String,

    /// Output file path; .yaml/.yml writes YAML, anything else JSON (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Outcome of argument parsing
#[derive(Debug)]
pub enum Parsed {
    /// Arguments are valid; run the export
    Run(CliArgs),
    /// Help, version or a usage error was printed; exit with this code
    Exit(i32),
}

/// Parse command line arguments (including the program name).
///
/// An invocation without any argument prints the help text to `stdout` and
/// exits successfully. Help and version requests also go to `stdout`; usage
/// errors go to `stderr` with clap's exit code.
pub fn parse_args<I, T>(argv: I, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Parsed>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    if argv.len() <= 1 {
        let help = CliArgs::command().render_help();
        write!(stdout, "{}", help).context("Failed to print help")?;
        return Ok(Parsed::Exit(0));
    }

    match CliArgs::try_parse_from(argv) {
        Ok(args) => {
            debug!("Parsed arguments: {:?}", args);
            Ok(Parsed::Run(args))
        }
        Err(e) => {
            let rendered = e.render().to_string();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write!(stdout, "{}", rendered).context("Failed to print help")?;
                    Ok(Parsed::Exit(0))
                }
                _ => {
                    write!(stderr, "{}", rendered).context("Failed to print usage")?;
                    Ok(Parsed::Exit(e.exit_code()))
                }
            }
        }
    }
}

/// Run the export workflow
///
/// Resolution failures are reported as a single line on `stderr` and turn
/// into exit code 1. Failures while writing the output are returned as
/// errors.
pub fn run(
    registry: &ModuleRegistry,
    args: &CliArgs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<i32> {
    info!("Application: {}", args.app);
    if let Some(ref output) = args.output {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    let app = match resolve(registry, &args.app) {
        Ok(app) => app,
        Err(e) => {
            debug!("Resolution failed: {:?}", e);
            writeln!(stderr, "{}", e).context("Failed to print error")?;
            return Ok(EXIT_RESOLUTION_FAILURE);
        }
    };

    export_openapi(&app, args.output.as_deref(), stdout).with_context(|| {
        format!("Failed to export OpenAPI document of '{}'", args.app)
    })?;

    if let Some(ref output) = args.output {
        info!("Successfully wrote OpenAPI document to {}", output.display());
    }
    Ok(0)
}

/// Parse `argv` and run the export against `registry`, using the given streams.
pub fn run_with_io<I, T>(
    registry: &ModuleRegistry,
    argv: I,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse_args(argv, stdout, stderr)? {
        Parsed::Exit(code) => Ok(code),
        Parsed::Run(args) => run(registry, &args, stdout, stderr),
    }
}

/// Entry point for binaries that embed their own application modules.
///
/// Initializes logging (`RUST_LOG`, raised to debug by `--verbose`), then
/// exports the application named on the command line from `registry`.
///
/// ```no_run
/// use openapi_export::{cli, registry::ModuleRegistry, sample};
///
/// fn main() -> anyhow::Result<std::process::ExitCode> {
///     let mut registry = ModuleRegistry::new();
///     sample::register(&mut registry);
///     cli::main_with_registry(&registry)
/// }
/// ```
pub fn main_with_registry(registry: &ModuleRegistry) -> Result<ExitCode> {
    let argv: Vec<OsString> = std::env::args_os().collect();
    init_logger(argv.iter().any(|arg| arg == "-v" || arg == "--verbose"));

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = run_with_io(registry, argv, &mut stdout.lock(), &mut stderr.lock())?;

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

fn init_logger(verbose: bool) {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // RUST_LOG is parsed after the default so it can override it
    let _ = env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    fn create_test_registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        sample::register(&mut registry);
        registry
    }

    #[test]
    fn test_parse_short_flags() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let parsed = parse_args(
            ["openapi-export", "-a", "pkg:app", "-o", "spec.yaml"],
            &mut out,
            &mut err,
        )
        .unwrap();

        match parsed {
            Parsed::Run(args) => {
                assert_eq!(args.app, "pkg:app");
                assert_eq!(args.output, Some(PathBuf::from("spec.yaml")));
                assert!(!args.verbose);
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_arguments_prints_help() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let parsed = parse_args(["openapi-export"], &mut out, &mut err).unwrap();

        assert!(matches!(parsed, Parsed::Exit(0)));
        assert!(String::from_utf8(out).unwrap().contains("--app"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_parse_help_flag() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let parsed = parse_args(["openapi-export", "--help"], &mut out, &mut err).unwrap();

        assert!(matches!(parsed, Parsed::Exit(0)));
        assert!(String::from_utf8(out).unwrap().contains("--app"));
    }

    #[test]
    fn test_parse_missing_app_is_usage_error() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let parsed = parse_args(["openapi-export", "-o", "spec.json"], &mut out, &mut err).unwrap();

        match parsed {
            Parsed::Exit(code) => assert_eq!(code, 2),
            other => panic!("expected usage error, got {:?}", other),
        }
        assert!(out.is_empty());
        assert!(String::from_utf8(err).unwrap().contains("--app"));
    }

    #[test]
    fn test_run_resolution_failure() {
        let registry = create_test_registry();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = run_with_io(
            &registry,
            ["openapi-export", "--app", "nonexistent.module:app"],
            &mut out,
            &mut err,
        )
        .unwrap();

        assert_eq!(code, EXIT_RESOLUTION_FAILURE);
        assert!(out.is_empty());
        let message = String::from_utf8(err).unwrap();
        assert!(message.starts_with("Could not import module 'nonexistent.module'"));
        assert_eq!(message.lines().count(), 1);
    }

    #[test]
    fn test_run_to_stdout() {
        let registry = create_test_registry();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = run_with_io(
            &registry,
            ["openapi-export", "-a", "samples.sample_app:app"],
            &mut out,
            &mut err,
        )
        .unwrap();

        assert_eq!(code, 0);
        let spec: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(spec["info"]["title"], "Sample API");
    }

    #[test]
    fn test_run_write_failure_is_an_error() {
        let registry = create_test_registry();
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("missing").join("spec.json");
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = run_with_io(
            &registry,
            [
                "openapi-export".into(),
                "-a".into(),
                "samples.sample_app:app".into(),
                "-o".into(),
                output.into_os_string(),
            ],
            &mut out,
            &mut err,
        );

        let error = result.unwrap_err();
        assert!(format!("{:#}", error).contains("spec.json"));
        assert!(err.is_empty());
    }
}
