use clap::{Parser, Subcommand};
use paywire_protocol::{Currency, MessageKind, Secp256k1Provider, ServerResponseStatus};
use paywire_tool::commands;
use paywire_tool::{load_tool_config, read_key_file, Terms, ToolConfig, ToolError, VerifyKeys};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "paywire", about = "Build, sign, wrap and decode payment messages")]
struct Args {
    #[arg(long)]
    config: Option<String>,

    /// Overrides the configured key number
    #[arg(long)]
    key_number: Option<u8>,

    /// Overrides the configured private key file
    #[arg(long)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a key pair and store both halves as hex files
    Keygen {
        #[arg(long)]
        private_out: String,
        #[arg(long)]
        public_out: String,
    },
    /// Build and sign a payment request
    Request {
        #[command(flatten)]
        terms: TermsArgs,
        #[arg(long, requires = "input_amount")]
        input_currency: Option<Currency>,
        #[arg(long, requires = "input_currency")]
        input_amount: Option<i64>,
    },
    /// Build and sign a payment response
    Response {
        #[command(flatten)]
        terms: TermsArgs,
        #[arg(long, default_value = "success", value_parser = parse_status)]
        status: ServerResponseStatus,
        #[arg(long)]
        error_message: Option<String>,
    },
    /// Bundle one or two signed payment requests for the server
    WrapRequest {
        #[arg(long)]
        payer: String,
        #[arg(long)]
        payee: Option<String>,
    },
    /// Bundle one or two signed payment responses
    WrapResponse {
        #[arg(long)]
        payer: String,
        #[arg(long)]
        payee: Option<String>,
    },
    /// Build the payee's opening message
    InitPayee {
        #[arg(long)]
        payee: String,
        #[arg(long)]
        currency: Option<Currency>,
        #[arg(long)]
        amount: i64,
    },
    /// Decode a hex-encoded message, optionally checking its signatures
    Decode {
        #[arg(long)]
        kind: MessageKind,
        #[arg(long)]
        hex: String,
        /// Public key file for the (first) signed message
        #[arg(long)]
        public_key: Option<String>,
        /// Public key file for the second sub-message of a wrapper
        #[arg(long)]
        payee_public_key: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct TermsArgs {
    #[arg(long)]
    payer: String,
    #[arg(long)]
    payee: String,
    #[arg(long)]
    currency: Option<Currency>,
    #[arg(long)]
    amount: i64,
    /// Milliseconds since the epoch; defaults to now
    #[arg(long)]
    timestamp: Option<i64>,
}

impl From<TermsArgs> for Terms {
    fn from(args: TermsArgs) -> Self {
        Terms {
            payer: args.payer,
            payee: args.payee,
            currency: args.currency,
            amount: args.amount,
            timestamp: args.timestamp,
        }
    }
}

fn parse_status(s: &str) -> Result<ServerResponseStatus, String> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "success" => Ok(ServerResponseStatus::Success),
        "failure" => Ok(ServerResponseStatus::Failure),
        "duplicate_request" => Ok(ServerResponseStatus::DuplicateRequest),
        other => Err(format!("unknown status: {other}")),
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn emit(mut event: Value) {
    event["ts"] = json!(unix_ts());
    println!("{}", event);
}

fn optional_key(path: Option<&str>) -> Result<Option<Vec<u8>>, ToolError> {
    path.map(read_key_file).transpose()
}

fn run(args: Args) -> Result<Value, ToolError> {
    let mut config = match args.config.as_deref() {
        Some(path) => load_tool_config(path)?,
        None => ToolConfig::default(),
    };
    if let Some(key_number) = args.key_number {
        config.key_number = key_number;
    }
    if let Some(private_key) = args.private_key {
        config.private_key_path = Some(private_key);
    }

    let provider = Secp256k1Provider;
    match args.command {
        Command::Keygen {
            private_out,
            public_out,
        } => commands::keygen(&provider, &config, &private_out, &public_out),
        Command::Request {
            terms,
            input_currency,
            input_amount,
        } => {
            let input = input_currency.zip(input_amount);
            commands::request(&provider, &config, &terms.into(), input)
        }
        Command::Response {
            terms,
            status,
            error_message,
        } => commands::response(
            &provider,
            &config,
            &terms.into(),
            status,
            error_message.as_deref(),
        ),
        Command::WrapRequest { payer, payee } => {
            commands::wrap_request(&payer, payee.as_deref())
        }
        Command::WrapResponse { payer, payee } => {
            commands::wrap_response(&payer, payee.as_deref())
        }
        Command::InitPayee {
            payee,
            currency,
            amount,
        } => commands::init_payee(&config, &payee, currency, amount),
        Command::Decode {
            kind,
            hex,
            public_key,
            payee_public_key,
        } => {
            let keys = VerifyKeys {
                payer: optional_key(public_key.as_deref().or(config.public_key_path.as_deref()))?,
                payee: optional_key(payee_public_key.as_deref())?,
            };
            commands::decode(&provider, kind, &hex, &keys)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(event) => emit(event),
        Err(err) => {
            log::error!("{err}");
            emit(json!({
                "event": "error",
                "error": err.to_string(),
            }));
            std::process::exit(1);
        }
    }
}
