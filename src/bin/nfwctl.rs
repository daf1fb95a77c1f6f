use std::path::Path;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use nfwctl::{
    ClientConfig, ConfirmationGate, Dispatcher, ForceGate, HttpRemoteClient, TerminalGate,
    cli_utils::{self, OutputFormat},
    commands::{
        InvokeOptions, errors::exit_with_user_error, handle_help_command, handle_invoke_command,
        handle_operations_command,
    },
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Endpoint URL of the firewall management API")]
    endpoint_url: Option<String>,
    #[arrrg(optional, "Region of the firewall management API")]
    region: Option<String>,
    #[arrrg(optional, "Configuration file (JSON or YAML)")]
    config: Option<String>,
    #[arrrg(optional, "Output format: json or yaml (default: json)")]
    output: OutputFormat,
    #[arrrg(optional, "Response selector: '*', a response field, or ^Parameter")]
    select: Option<String>,
    #[arrrg(optional, "Read parameter bindings from a JSON file, or - for stdin")]
    input_json: Option<String>,
    #[arrrg(flag, "Echo the pass-thru parameter of a mutating operation")]
    pass_thru: bool,
    #[arrrg(flag, "Do not ask for confirmation before mutating operations")]
    force: bool,
    #[arrrg(flag, "Enable debug logging")]
    verbose: bool,
}

const USAGE: &str = r#"Usage: nfwctl [options] <operation> [Name=Value ...]
       nfwctl operations
       nfwctl help <operation>

Options:
  --endpoint-url <url>     Endpoint URL (default: https://network-firewall.<region>.amazonaws.com)
  --region <region>        Region (or NFWCTL_REGION / AWS_REGION)
  --config <file>          Configuration file (JSON or YAML)
  --output <format>        Output format: json or yaml (default: json)
  --select <selector>      '*' for the whole response, Field[.Nested] for one field,
                           ^Parameter to echo an input parameter
  --pass-thru              Echo the pass-thru parameter of a mutating operation
  --force                  Do not ask for confirmation before mutating operations
  --input-json <file|->    Bind parameters from a JSON object (explicit bindings win)
  --verbose                Enable debug logging (RUST_LOG is honoured)

Operations take the API action name or its kebab-case form:
  nfwctl describe-firewall FirewallName=edge-fw
  nfwctl list-firewalls VpcId=vpc-0abc --select '*'
  nfwctl tag-resource ResourceArn=arn:aws:... Tag='{"Key":"env","Value":"prod"}' --force"#;

fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);
    tracing_subscriber::registry()
        .with(fmt::Layer::default().compact().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()?;
    Ok(())
}

fn load_config(options: &Options) -> ClientConfig {
    let file = match &options.config {
        Some(path) => {
            ClientConfig::load(Path::new(path)).unwrap_or_else(|e| exit_with_user_error(&e))
        }
        None => ClientConfig::default(),
    };
    file.with_env(|name| std::env::var(name).ok())
        .with_overrides(options.endpoint_url.as_deref(), options.region.as_deref())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line_relaxed("USAGE: nfwctl <operation> [Name=Value...]");

    if free.is_empty() {
        cli_utils::exit_with_usage_error("No operation specified", USAGE);
    }

    init_logging(options.verbose)?;

    match free[0].as_str() {
        "operations" => {
            handle_operations_command();
            return Ok(());
        }
        "help" => {
            handle_help_command(&free[1..], USAGE);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&options);
    let endpoint = config.endpoint().unwrap_or_else(|e| exit_with_user_error(&e));
    tracing::debug!(endpoint = %endpoint, region = ?config.region, "resolved endpoint");

    let client = HttpRemoteClient::new(endpoint, config.region.clone(), config.headers.clone());
    let gate: Box<dyn ConfirmationGate> = if options.force {
        Box::new(ForceGate)
    } else {
        Box::new(TerminalGate)
    };
    let dispatcher = Dispatcher::new(client, gate);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let invoke_options = InvokeOptions {
        select: options.select.clone(),
        pass_thru: options.pass_thru,
        input_json: options.input_json.clone(),
        output: options.output,
    };
    handle_invoke_command(&free, &dispatcher, &invoke_options, cancel).await;

    Ok(())
}
