//! xk-geodat: GeoIP/GeoSite .dat inspector.
//!
//! Every outcome is printed to stdout as a single JSON document; logs go
//! to stderr.

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use geodat::{report, ErrorClass};
use serde::Serialize;
use std::process;

#[derive(Parser)]
#[command(name = "xk-geodat")]
#[command(version)]
#[command(about = "GeoIP/GeoSite .dat inspector for Xray/Xkeen-UI", long_about = None)]
#[command(after_help = "Examples:
  xk-geodat tags --kind geosite --path /opt/etc/xray/geosite.dat
  xk-geodat dump --kind geosite --path /opt/etc/xray/geosite.dat --tag google --offset 0 --limit 200")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tags inside DAT (GeoSite/GeoIP)
    Tags(SourceArgs),

    /// Dump items for a tag (paged)
    #[command(alias = "tag")]
    Dump {
        #[command(flatten)]
        source: SourceArgs,

        /// Tag/country code
        #[arg(long, default_value = "")]
        tag: String,

        /// Offset of the first item
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Page size (max 2000)
        #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
        limit: i64,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// geosite|geoip
    #[arg(long, default_value = "")]
    kind: String,

    /// Path to .dat
    #[arg(long, default_value = "")]
    path: String,

    /// Pretty JSON
    #[arg(long)]
    pretty: bool,
}

impl SourceArgs {
    fn is_incomplete(&self) -> bool {
        self.kind.is_empty() || self.path.is_empty()
    }
}

#[derive(Serialize)]
struct ErrOut<'a> {
    ok: bool,
    error: &'a str,
    #[serde(rename = "details", skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::MissingSubcommand
            | ErrorKind::InvalidSubcommand => e.exit(),
            _ => print_error("bad_args", Some(e.to_string()), false, 2),
        },
    };

    match cli.command {
        Commands::Tags(args) => {
            if args.is_incomplete() {
                print_error("kind_and_path_required", None, args.pretty, 2);
            }
            match report::tags(&args.kind, &args.path) {
                Ok(result) => print_json(&result, args.pretty, 0),
                Err(e) => fail("tags_failed", &e, args.pretty),
            }
        }
        Commands::Dump {
            source,
            tag,
            offset,
            limit,
        } => {
            if source.is_incomplete() || tag.is_empty() {
                print_error("kind_path_tag_required", None, source.pretty, 2);
            }
            match report::dump(&source.kind, &source.path, &tag, offset, limit) {
                Ok(result) => print_json(&result, source.pretty, 0),
                Err(e) => fail("dump_failed", &e, source.pretty),
            }
        }
    }
}

fn fail(code: &str, err: &geodat::Error, pretty: bool) -> ! {
    let exit_code = match err.class() {
        ErrorClass::Caller => 2,
        ErrorClass::Processing => 1,
    };
    log::debug!("{} ({}): {}", code, err.code(), err);
    print_error(code, Some(err.to_string()), pretty, exit_code)
}

fn print_error(code: &str, detail: Option<String>, pretty: bool, exit_code: i32) -> ! {
    let out = ErrOut {
        ok: false,
        error: code,
        detail,
    };
    print_json(&out, pretty, exit_code)
}

fn print_json<T: Serialize>(value: &T, pretty: bool, exit_code: i32) -> ! {
    match report::to_json(value, pretty) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("json_marshal_failed: {}", e);
            process::exit(2);
        }
    }
    process::exit(exit_code)
}
