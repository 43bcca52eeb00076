//! Diary engine: account lookup, status pagination and the end-to-end run.
mod client;
mod pages;
mod persist;
mod pipeline;
mod resolve;
mod types;

pub use client::{FetchSettings, MastodonApi, ReqwestMastodonClient};
pub use pages::{fetch_all, next_cursor, Page, StatusPages};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    run_pipeline, run_pipeline_blocking, run_pipeline_with, DiaryConfig, PipelineError,
    RunSummary,
};
pub use resolve::resolve_account;
pub use types::{ApiError, FailureKind, FetchOutcome, StopReason};
