//! kubectl-zones CLI - list pods with the availability zone of their node

use anyhow::Result;
use clap::Parser;
use kubectl_zones::commands::zones::{self, ZonesOptions};
use kubectl_zones::config::settings::Settings;
use kubectl_zones::log_warn;
use kubectl_zones::utils::{display_error_and_exit, logger};
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "kubectl-zones")]
#[command(
    about = "List pods together with the availability zone of their node",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Arguments forwarded to `kubectl get pods` (-A/--all-namespaces adds a NAMESPACE column)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    kubectl_args: Vec<String>,
}

impl Cli {
    /// Parse the process arguments, keeping a leading `--` that clap would consume
    fn parse_forwarded<I, T>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
        let mut cli = Self::try_parse_from(raw.clone())?;

        if raw.get(1).is_some_and(|arg| arg.as_os_str() == "--") {
            cli.kubectl_args.insert(0, "--".to_string());
        }

        Ok(cli)
    }
}

/// Fall back to defaults when the config cannot be loaded, keeping the error to report
fn settings_or_default(loaded: Result<Settings>) -> (Settings, Option<anyhow::Error>) {
    match loaded {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    }
}

fn main() {
    let cli = Cli::parse_forwarded(std::env::args_os()).unwrap_or_else(|err| err.exit());

    let (settings, config_error) = settings_or_default(Settings::load());

    logger::init(&settings.logging.level);

    if let Some(err) = config_error {
        log_warn!("Ignoring config file: {:#}", err);
    }

    let options = ZonesOptions::from_args(cli.kubectl_args);
    if let Err(err) = zones::run(options, &settings) {
        display_error_and_exit(err);
    }
}
