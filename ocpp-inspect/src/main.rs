//! ocpp-inspect - validate and convert OCPP messages
//!
//! Reads one message payload (file or stdin), parses it with the full
//! validation rules, and prints it in the requested representation.
//!
//! # Usage
//!
//! ```bash
//! # JSON request to its SOAP body
//! echo '{"type": "Hard"}' | ocpp-inspect --ocpp 1.6 --action Reset --to xml
//!
//! # Check a 2.1 payload and tag it with its JSON-LD context
//! ocpp-inspect --ocpp 2.1 --action SetVariables --to json-ld --pretty payload.json
//!
//! # Re-render a captured SOAP response
//! ocpp-inspect --ocpp 1.6 --kind response --from soap --to json capture.xml
//! ```
//!
//! Exit status is non-zero when the payload does not parse.

mod convert;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ocpp_messages::{CodecConfig, MessageKind, OcppVersion, RequestId};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::convert::{read_input, Conversion, InputFormat, Kind, OutputFormat, Version};

/// OCPP message validator and converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OCPP version
    #[arg(long = "ocpp", value_enum, default_value = "1.6")]
    ocpp: Version,

    /// Action name, e.g. BootNotification (required for JSON input)
    #[arg(short, long)]
    action: Option<String>,

    /// Message direction
    #[arg(short, long, value_enum, default_value = "request")]
    kind: Kind,

    /// Input representation
    #[arg(long, value_enum, default_value = "json")]
    from: InputFormat,

    /// Output representation
    #[arg(long, value_enum, default_value = "json")]
    to: OutputFormat,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Omit the XML declaration from SOAP output
    #[arg(long)]
    no_declaration: bool,

    /// Accept XML bodies in a foreign service namespace
    #[arg(long)]
    lenient: bool,

    /// Charge box identity for generated SOAP headers
    #[arg(long, default_value = "EK3-001")]
    identity: String,

    /// MessageID (requests) or RelatesTo (responses) for generated SOAP headers
    #[arg(long)]
    message_id: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Payload file; stdin when absent
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("failed to install logger: {}", e);
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let message_id = args.message_id.as_deref().map(RequestId::parse).transpose()?;

    let mut config = CodecConfig::new()
        .with_pretty(args.pretty)
        .with_xml_declaration(!args.no_declaration);
    if args.lenient {
        config = config.lenient_namespaces();
    }

    let conversion = Conversion {
        version: args.ocpp,
        kind: args.kind,
        action: args.action.clone(),
        from: args.from,
        to: args.to,
        identity: args.identity.clone(),
        message_id,
        config,
    };

    info!(
        "OCPP {} {} {:?} -> {:?}",
        OcppVersion::from(args.ocpp),
        MessageKind::from(args.kind),
        args.from,
        args.to
    );

    let input = read_input(args.file.as_deref())?;
    Ok(conversion.run(&input)?)
}

fn init_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // Logs go to stderr so stdout stays a clean payload
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
