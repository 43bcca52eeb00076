use diary_core::{Account, RawPost};
use diary_logging::{diary_debug, diary_info, diary_warn};

use crate::{ApiError, FetchOutcome, MastodonApi, StopReason};

/// Cursor for the page after one whose last post has `last_id`: one less
/// than its numeric value. `None` when the id is not an integer.
pub fn next_cursor(last_id: &str) -> Option<i64> {
    last_id.trim().parse::<i64>().ok()?.checked_sub(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Posts(Vec<RawPost>),
    Finished(StopReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Before(i64),
    Done(StopReason),
}

/// Walks an account's statuses backwards in time, one request per call.
///
/// Each request depends on the last id of the previous page, so pages are
/// strictly sequential. Once finished the walker keeps reporting the same
/// stop reason; it cannot be rewound.
pub struct StatusPages<'a> {
    api: &'a dyn MastodonApi,
    host: &'a str,
    account_id: &'a str,
    cursor: Cursor,
}

impl<'a> StatusPages<'a> {
    pub fn new(api: &'a dyn MastodonApi, account: &'a Account) -> Self {
        Self {
            api,
            host: &account.host,
            account_id: &account.id,
            cursor: Cursor::Start,
        }
    }

    pub async fn next_page(&mut self) -> Result<Page, ApiError> {
        let max_id = match &self.cursor {
            Cursor::Start => None,
            Cursor::Before(max_id) => Some(*max_id),
            Cursor::Done(reason) => return Ok(Page::Finished(reason.clone())),
        };

        let posts = self
            .api
            .account_statuses(self.host, self.account_id, max_id)
            .await?;
        diary_debug!("Page with max_id={:?} returned {} posts", max_id, posts.len());

        let Some(last) = posts.last() else {
            self.cursor = Cursor::Done(StopReason::Exhausted);
            return Ok(Page::Finished(StopReason::Exhausted));
        };

        self.cursor = match next_cursor(&last.id) {
            Some(next) => Cursor::Before(next),
            None => {
                diary_warn!(
                    "Post id {:?} is not an integer; stopping pagination early",
                    last.id
                );
                Cursor::Done(StopReason::MalformedPostId {
                    id: last.id.clone(),
                })
            }
        };
        Ok(Page::Posts(posts))
    }
}

/// Fetches the full history of `account`, newest first.
///
/// Any request failure aborts the whole fetch. A malformed cursor id ends
/// the walk with the posts gathered so far.
pub async fn fetch_all(
    api: &dyn MastodonApi,
    account: &Account,
) -> Result<FetchOutcome, ApiError> {
    let mut pages = StatusPages::new(api, account);
    let mut posts = Vec::new();
    let mut page_count = 0;

    loop {
        match pages.next_page().await? {
            Page::Posts(page) => {
                page_count += 1;
                posts.extend(page);
            }
            Page::Finished(stop) => {
                diary_info!(
                    "Fetched {} posts in {} pages ({:?})",
                    posts.len(),
                    page_count,
                    stop
                );
                return Ok(FetchOutcome {
                    posts,
                    pages: page_count,
                    stop,
                });
            }
        }
    }
}
