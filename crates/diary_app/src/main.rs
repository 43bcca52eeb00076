mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use diary_engine::{run_pipeline_blocking, DiaryConfig, FetchSettings, StopReason};
use diary_logging::{diary_error, diary_warn};

#[derive(Debug, Parser)]
#[command(
    name = "mastodon-diary",
    version,
    about = "Get all your Mastodon posts tagged #Diary as an HTML diary"
)]
struct Cli {
    #[arg(
        env = "MASTODON_URL",
        help = "URL of the Mastodon profile, e.g. https://mastodon.social/@alice"
    )]
    url: String,
    #[arg(
        long,
        env = "OUTPUT_FILE",
        default_value = "posts.html",
        value_name = "PATH",
        help = "Output HTML file"
    )]
    output: PathBuf,
    #[arg(
        long,
        env = "TIMEZONE",
        value_name = "ZONE",
        help = "IANA time zone for dates (default UTC)"
    )]
    timezone: Option<String>,
    #[arg(
        long,
        env = "TEMPLATE_FILE",
        value_name = "PATH",
        help = "HTML template containing {{posts}}"
    )]
    template: Option<PathBuf>,
    #[arg(
        long,
        env = "DIARY_TITLE",
        default_value = "Diary",
        help = "Page title when no template is used"
    )]
    title: String,
    #[arg(long, default_value_t = 30, value_name = "SECS", help = "Per-request timeout")]
    timeout_secs: u64,
    #[arg(long, value_name = "PATH", help = "Also write logs to this file")]
    log_file: Option<PathBuf>,
    #[arg(short, long, help = "Log every request")]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> DiaryConfig {
        let mut config = DiaryConfig::new(self.url, self.output);
        config.time_zone = self.timezone;
        config.template_path = self.template;
        config.title = self.title;
        config.fetch = FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..FetchSettings::default()
        };
        config
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::initialize(
        diary_logging::level_for(cli.verbose),
        cli.log_file.as_deref(),
    );

    match run(cli.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The terminal logger writes errors to stderr.
            diary_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DiaryConfig) -> Result<()> {
    let summary = run_pipeline_blocking(&config)
        .with_context(|| format!("failed to build diary for {}", config.profile_url))?;

    if let StopReason::MalformedPostId { id } = &summary.stop {
        diary_warn!("History may be incomplete: stopped at post id {id:?}");
    }
    println!("Posts written to {}", summary.output_path.display());
    Ok(())
}
