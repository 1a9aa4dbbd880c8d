use mattermost_alert_cli::{
    execute_alert, init_diagnostics, AdapterSettings, Cli, CliError, SettingsError,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::from_args(std::env::args_os());
    let settings = AdapterSettings::from_env();

    // Diagnostics come first so every later failure is reported in the
    // platform's line format.
    let debug = settings.as_ref().map(|s| s.debug).unwrap_or(false);
    if let Err(e) = init_diagnostics(debug) {
        eprintln!("[mattermost-alert] [error] {}", e);
        std::process::exit(e.exit_code());
    }

    match run(&cli, settings).await {
        Ok(()) => info!("alert sent successfully"),
        Err(CliError::UnsupportedMode) => {
            error!("{}", CliError::UnsupportedMode);
            std::process::exit(CliError::UnsupportedMode.exit_code());
        }
        Err(e) => {
            error!(error = %e, "unhandled exception");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &Cli, settings: Result<AdapterSettings, SettingsError>) -> Result<(), CliError> {
    cli.ensure_execution_mode()?;
    let settings = settings?;

    execute_alert(std::io::stdin().lock(), &settings).await?;
    Ok(())
}
