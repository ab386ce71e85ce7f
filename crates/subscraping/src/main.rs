mod enumerate;

use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use subscraping::config::{ProviderConfig, SessionConfig, DEFAULT_HTTP_TIMEOUT_SECS};
use subscraping::keys::RandomKeyPicker;
use subscraping::utils::{ensure_dir, log::init_tracing_subscriber, validate_domain};
use subscraping::{sources, Error, Result};
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .subcommand(Command::new("sources").about("List all sources"))
        .subcommand(
            Command::new("enum")
                .about("Enumerate the subdomains of a target")
                .arg(
                    Arg::new("target")
                        .help("The domain name to enumerate")
                        .value_name("TARGET")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Provider config (YAML) holding the API keys"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .value_parser(clap::value_parser!(u64))
                        .help("HTTP request timeout in seconds (default: 30)"),
                )
                .arg(
                    Arg::new("logs")
                        .short('s')
                        .long("logs")
                        .action(ArgAction::SetTrue)
                        .help("Save logs into a .log file"),
                )
                .arg(
                    Arg::new("json")
                        .short('j')
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print one JSON object per subdomain"),
                ),
        )
        .arg_required_else_help(true)
        .get_matches();

    match cli.subcommand() {
        Some(("sources", _)) => {
            let sources = sources::all_sources(Arc::new(RandomKeyPicker));
            sources::display_all(&sources);
        }
        Some(("enum", args)) => {
            let target = args
                .get_one::<String>("target")
                .ok_or_else(|| Error::CliUsage("Missing target".into()))?;
            let target = validate_domain(target)?;

            // logs are written next to the other runs of this target
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            let output_dir = format!("output/subscraping/{}", target);
            let save_logs = args.get_flag("logs");
            if save_logs {
                ensure_dir(output_dir.as_ref())?;
            }
            init_tracing_subscriber(save_logs, output_dir.as_ref(), &timestamp.to_string());

            let providers = match args.get_one::<PathBuf>("config") {
                Some(path) => ProviderConfig::from_file(path)?,
                None => ProviderConfig::default(),
            };
            let session_config = SessionConfig {
                timeout: Duration::from_secs(
                    *args
                        .get_one::<u64>("timeout")
                        .unwrap_or(&DEFAULT_HTTP_TIMEOUT_SECS),
                ),
                ..SessionConfig::default()
            };

            info!("Enumerating {} (run_{})", target, timestamp);
            enumerate::enumerate(&target, &providers, &session_config, args.get_flag("json"))?;
        }

        // fallback if a cmd is not handled (should not possible)
        _ => {
            error!("{:12} - Command not handled, exit program", "CLI ERROR");
            return Err(Error::CliUsage("Command not handled".into()));
        }
    }

    Ok(())
}
