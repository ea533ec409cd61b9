use alerts2csv::{
    client::PagerDutyClient,
    config::{self, parse_timestamp, ApiKey, DEFAULT_API_KEYFILE, DEFAULT_API_URL, DEFAULT_OUTPUT_PATH},
    export::export_alerts,
    models::TimeWindow,
};
use clap::Parser;
use std::io;
use std::path::PathBuf;

/// Generates a CSV of human-acknowledged alerts associated with a given
/// PagerDuty service name (e.g., mycluster.abcd.p1.openshiftapps.com)
#[derive(Parser, Debug)]
#[command(name = "alerts2csv", version)]
struct Args {
    /// (partial) PagerDuty service name(s). Specify '-' here to read
    /// newline-separated entries from stdin
    #[arg(required = true)]
    service_name: Vec<String>,

    /// start of the time window in ISO-8601 format (e.g., 2023-01-01) (default: 1 month ago)
    #[arg(short, long, value_name = "DATETIME", value_parser = parse_timestamp)]
    since: Option<String>,

    /// end of the time window in ISO-8601 format (e.g., 2023-01-01) (default: now)
    #[arg(short, long, value_name = "DATETIME", value_parser = parse_timestamp)]
    until: Option<String>,

    /// path of the text file containing your PagerDuty API key
    #[arg(short = 'k', long, value_name = "PATH", default_value = DEFAULT_API_KEYFILE)]
    pd_api_keyfile: PathBuf,

    /// path where the output CSV should be written
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    output_path: PathBuf,

    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL, hide = true)]
    api_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let api_key = match ApiKey::load(&args.pd_api_keyfile) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    };
    let client = PagerDutyClient::with_base_url(&api_key, args.api_url)?;

    let queries = config::service_queries(args.service_name, io::stdin().lock())?;
    let window = TimeWindow::new(args.since, args.until);

    let summary = export_alerts(&client, &queries, &window, &args.output_path).await?;

    println!(
        "Saved {} incidents to {}",
        summary.rows_written,
        args.output_path.display()
    );
    Ok(())
}
