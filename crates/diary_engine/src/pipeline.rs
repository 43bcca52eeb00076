use std::fs;
use std::path::PathBuf;

use diary_core::{
    build_entries, group_entries, render_document, render_fragments, resolve_zone, Account,
    MarkerExtractor, POSTS_PLACEHOLDER,
};
use diary_logging::{diary_debug, diary_info, diary_warn};

use crate::{
    fetch_all, resolve_account, ApiError, AtomicFileWriter, FetchSettings, MastodonApi,
    PersistError, ReqwestMastodonClient, StopReason,
};

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct DiaryConfig {
    pub profile_url: String,
    pub output_path: PathBuf,
    /// IANA zone name; UTC when absent, UTC with a warning when unknown.
    pub time_zone: Option<String>,
    /// HTML file containing the `{{posts}}` placeholder.
    pub template_path: Option<PathBuf>,
    /// Title of the built-in page when no template is given.
    pub title: String,
    pub fetch: FetchSettings,
}

impl DiaryConfig {
    pub fn new(profile_url: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            profile_url: profile_url.into(),
            output_path: output_path.into(),
            time_zone: None,
            template_path: None,
            title: "Diary".to_string(),
            fetch: FetchSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub account: Account,
    pub posts_fetched: usize,
    pub entries: usize,
    pub stop: StopReason,
    pub zone_fallback: bool,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to read template {path:?}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

/// Runs the pipeline to completion on a single-threaded runtime.
pub fn run_pipeline_blocking(config: &DiaryConfig) -> Result<RunSummary, PipelineError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(PipelineError::Runtime)?;
    runtime.block_on(run_pipeline(config))
}

/// Runs the whole diary export against the live server.
pub async fn run_pipeline(config: &DiaryConfig) -> Result<RunSummary, PipelineError> {
    let client = ReqwestMastodonClient::new(config.fetch.clone())?;
    run_pipeline_with(&client, config).await
}

/// Resolve, fetch, extract, group, render and write.
///
/// Nothing is written unless every request succeeded.
pub async fn run_pipeline_with(
    api: &dyn MastodonApi,
    config: &DiaryConfig,
) -> Result<RunSummary, PipelineError> {
    let zone = resolve_zone(config.time_zone.as_deref());
    if zone.fallback {
        diary_warn!(
            "Unrecognized time zone {:?}; formatting dates in UTC",
            config.time_zone.as_deref().unwrap_or_default()
        );
    }

    // Read the template before any network work so a bad path fails fast.
    let template = match &config.template_path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| PipelineError::Template {
                path: path.clone(),
                source,
            })?;
            if !text.contains(POSTS_PLACEHOLDER) {
                diary_warn!(
                    "Template {:?} has no {} placeholder; entries will not appear",
                    path,
                    POSTS_PLACEHOLDER
                );
            }
            Some(text)
        }
        None => None,
    };

    let account = resolve_account(api, &config.profile_url).await?;
    let fetched = fetch_all(api, &account).await?;

    let built = build_entries(&fetched.posts, &MarkerExtractor::default(), zone.zone);
    diary_debug!("Skipped {} posts without diary content", built.skipped);
    if built.invalid_timestamps > 0 {
        diary_warn!(
            "{} diary entries have unparseable timestamps",
            built.invalid_timestamps
        );
    }

    let fragments = group_entries(&built.entries);
    let body = render_fragments(&fragments);
    let document = render_document(&body, template.as_deref(), &config.title);

    let output_path = AtomicFileWriter::new(&config.output_path).write(&document)?;
    diary_info!(
        "Wrote {} diary entries to {:?}",
        built.entries.len(),
        output_path
    );

    Ok(RunSummary {
        account,
        posts_fetched: fetched.posts.len(),
        entries: built.entries.len(),
        stop: fetched.stop,
        zone_fallback: zone.fallback,
        output_path,
    })
}
