//! # Mattermost Alert CLI
//!
//! Executable side of the Mattermost alert action.
//!
//! The search platform runs the action as `mattermost-alert --execute` and
//! writes the alert payload to its standard input. This crate provides:
//! - The execution-mode check
//! - The diagnostic line format written to stderr
//! - Process-level settings from the environment
//! - The runner wiring stdin, settings and the HTTP sender into the core
//!   pipeline

use clap::Parser;
use mattermost_alert_core::{
    process_alert, AlertError, AlertPayload, HttpWebhookSender, OutboundMessage,
};
use std::ffi::OsString;
use std::io::Read;

pub mod diagnostics;
pub mod settings;

pub use diagnostics::{init_diagnostics, DiagnosticFormat};
pub use settings::{AdapterSettings, SettingsError};

/// Flag the platform passes when it runs the action
pub const EXECUTE_FLAG: &str = "--execute";

const END_OF_OPTIONS: &str = "--";

// ============================================================================
// CLI Structure
// ============================================================================

/// Mattermost alert action
///
/// Arguments are captured verbatim: the platform contract only looks at the
/// first one, so help, version and unknown flags are not interpreted.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "mattermost-alert")]
#[command(about = "Post search alerts to a Mattermost incoming webhook")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Arguments supplied by the invoking platform
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

impl Cli {
    /// Capture the process arguments (including the program name)
    ///
    /// Never fails; arguments that cannot be captured leave the CLI empty,
    /// which is reported as an unsupported execution mode.
    ///
    /// An end-of-options marker is inserted after the program name so that a
    /// `--` supplied by the caller is kept as an ordinary argument.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args
            .next()
            .unwrap_or_else(|| OsString::from("mattermost-alert"));
        let argv = [program, OsString::from(END_OF_OPTIONS)]
            .into_iter()
            .chain(args);

        Self::try_parse_from(argv).unwrap_or_default()
    }

    /// Execution mode selected by the first argument
    pub fn mode(&self) -> ExecutionMode {
        match self.args.first().map(String::as_str) {
            Some(EXECUTE_FLAG) => ExecutionMode::Execute,
            _ => ExecutionMode::Unsupported,
        }
    }

    /// Fail unless the action was started in execution mode
    pub fn ensure_execution_mode(&self) -> Result<(), CliError> {
        match self.mode() {
            ExecutionMode::Execute => Ok(()),
            ExecutionMode::Unsupported => Err(CliError::UnsupportedMode),
        }
    }
}

/// Ways the platform can invoke the action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Process the alert on stdin
    Execute,
    /// Anything else
    Unsupported,
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unsupported execution mode (expected --execute flag)")]
    UnsupportedMode,

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Diagnostics initialization failed: {message}")]
    Diagnostics { message: String },

    #[error(transparent)]
    Alert(#[from] AlertError),
}

impl CliError {
    /// Process exit code for this error
    ///
    /// The platform only distinguishes success from failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedMode => 1,
            Self::Settings(_) => 1,
            Self::Diagnostics { .. } => 1,
            Self::Alert(_) => 1,
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Read one alert from `input` and deliver it over HTTP
///
/// Returns the delivered message.
pub async fn execute_alert<R: Read>(
    input: R,
    settings: &AdapterSettings,
) -> Result<OutboundMessage, CliError> {
    let payload = AlertPayload::from_reader(input).map_err(AlertError::from)?;
    let sender = HttpWebhookSender::new(&settings.sender_config()).map_err(AlertError::from)?;

    Ok(process_alert(&payload, &sender).await?)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
