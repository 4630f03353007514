use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, value_parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use webext_locales_mt::mt::{GoogleTranslateProvider, MockMode, MockTranslator, TranslationClient};
use webext_locales_mt::retry::RetryConfig;
use webext_locales_mt::{Configuration, Credentials};

const API_URL_VAR: &str = "GOOGLE_TRANSLATE_API_URL";

fn cli() -> Command {
    Command::new("webext-locales-mt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Machine-translate a browser extension's messages.json and description")
        .arg(
            Arg::new("input")
                .help("Input configuration JSON (source locales and target languages)")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of Google Translate")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("retries")
                .long("retries")
                .short('r')
                .help("Extra attempts for a request that fails with a transient error")
                .value_parser(value_parser!(u32))
                .default_value("0"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show every translation request")
                .action(clap::ArgAction::SetTrue),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match try_main(&matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let directive = if verbose {
        "webext_locales_mt=debug"
    } else {
        "webext_locales_mt=info"
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn try_main(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input configuration")?;
    let config = Configuration::load(input).await?;

    let retries = matches.get_one::<u32>("retries").copied().unwrap_or(0);
    let client = build_client(matches.get_flag("mock"))?.with_retry(RetryConfig::api_call(retries));

    let summary = webext_locales_mt::run(&config, &client).await?;
    if summary.is_clean() {
        info!("All translations written");
    } else {
        info!("Finished with errors, see log above");
    }
    Ok(())
}

fn build_client(use_mock: bool) -> Result<TranslationClient> {
    if use_mock {
        info!("Using mock translator");
        return Ok(TranslationClient::new(MockTranslator::new(MockMode::Suffix)));
    }

    let credentials = Credentials::from_env()
        .context("Google Translate credentials are required (or use --mock)")?;
    let mut provider = GoogleTranslateProvider::new(credentials)?;
    if let Ok(url) = std::env::var(API_URL_VAR) {
        provider = provider.with_base_url(url);
    }
    Ok(TranslationClient::new(provider))
}
