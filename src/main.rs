//! Step the brightness of an external display over DDC/CI

mod config;
mod control;
mod external;

use anyhow::Result;
use clap::{ArgEnum, Parser};
use config::Config;
use control::{adjustment::Operation, invocation::Invocation};
use external::{dependency_provider::DependencyProvider, kernel_module};
use flexi_logger::{Logger, LoggerHandle};
use std::path::PathBuf;

/// Change the brightness of an external display, remembering the last set
/// value between runs
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    #[clap(arg_enum)]
    action: Action,

    /// Configuration file to use instead of the one in the user's config
    /// directory
    #[clap(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Log more details, can be repeated
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,
}

#[derive(ArgEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Increase,
    Decrease,
    Min,
    Max,
}

impl From<Action> for Operation {
    fn from(action: Action) -> Self {
        match action {
            Action::Increase => Operation::Increase,
            Action::Decrease => Operation::Decrease,
            Action::Min => Operation::SetMin,
            Action::Max => Operation::SetMax,
        }
    }
}

fn init_logging(verbosity: usize) -> Result<LoggerHandle> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let handle = Logger::try_with_env_or_str(level)?.start()?;
    log_panics::init();
    Ok(handle)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = init_logging(args.verbose)?;
    let config = Config::load(args.config.as_deref())?;

    let module = &config.kernel_module;
    if module.ensure_loaded {
        if let Err(e) =
            kernel_module::ensure_loaded(&module.name, &module.list_command, &module.load_command)
                .await
        {
            log::warn!("{:#}", e);
        }
    }

    let provider = DependencyProvider::make_system(&config);
    let outcome = Invocation::new(&provider, config.adjustment, config.fallback)
        .run(args.action.into())
        .await?;
    log::debug!("Finished: {:?}", outcome);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_actions() {
        for (arg, operation) in [
            ("increase", Operation::Increase),
            ("decrease", Operation::Decrease),
            ("min", Operation::SetMin),
            ("max", Operation::SetMax),
        ] {
            let args = Args::try_parse_from(["ddc-brightness", arg]).unwrap();
            assert_eq!(Operation::from(args.action), operation);
        }
    }

    #[test]
    fn test_usage_errors() {
        assert!(Args::try_parse_from(["ddc-brightness"]).is_err());
        assert!(Args::try_parse_from(["ddc-brightness", "brighter"]).is_err());
        assert!(Args::try_parse_from(["ddc-brightness", "increase", "decrease"]).is_err());
    }

    #[test]
    fn test_options() {
        let args =
            Args::try_parse_from(["ddc-brightness", "-vv", "--config", "/etc/b.toml", "max"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.config, Some(PathBuf::from("/etc/b.toml")));
        assert_eq!(args.action, Action::Max);
    }
}
