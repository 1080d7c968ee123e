//! Command line front end: `barehttp [GET/POST] URL`.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use barehttp::{Client, Config};
use clap::Parser;

const USAGE: &str = "barehttp [GET/POST] [URL]";

#[derive(Debug, Parser)]
#[command(
    name = "barehttp",
    version,
    about = "Send one GET or POST over a plain tcp socket and print the response",
    override_usage = "barehttp [GET/POST] [URL] [-d KEY=VALUE]..."
)]
struct Cli {
    /// The url, optionally preceded by the method
    #[arg(value_name = "ARGS", num_args = 0..=2)]
    args: Vec<String>,

    /// Form field sent with POST. Repeat for more fields
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_pair)]
    data: Vec<(String, String)>,

    /// Connect, read and write timeout in seconds. Unbounded if not given
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (method, url) = match cli.args.as_slice() {
        [] => {
            println!("{}\n", USAGE);
            process::exit(1);
        }
        [url] => ("GET", url.as_str()),
        [method, url, ..] => (method.as_str(), url.as_str()),
    };

    if let Err(e) = run(&cli, method, url) {
        eprintln!("barehttp error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, method: &str, url: &str) -> Result<()> {
    let timeout = cli.timeout.map(Duration::from_secs);
    let client = Client::with_config(Config::new().timeout(timeout));

    let params: Vec<(&str, &str)> = cli
        .data
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let response = client
        .command(url, method, &params)
        .with_context(|| format!("{} {}", method, url))?;

    println!("{}", response);

    Ok(())
}
