use diary_core::{parse_profile_url, Account};
use diary_logging::diary_info;
use serde_json::Value;

use crate::{ApiError, FailureKind, MastodonApi};

/// Resolves a profile URL to the server host and numeric account id.
pub async fn resolve_account(
    api: &dyn MastodonApi,
    profile_url: &str,
) -> Result<Account, ApiError> {
    let profile = parse_profile_url(profile_url)
        .map_err(|err| ApiError::new(FailureKind::InvalidProfileUrl, err.to_string()))?;

    let body = api.lookup_account(&profile.host, &profile.username).await?;
    if let Some(error) = body.get("error") {
        return Err(ApiError::new(
            FailureKind::UserNotFound,
            format!("{}: {}", profile.username, describe(error)),
        ));
    }

    let id = match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Err(ApiError::new(
                FailureKind::UserNotFound,
                format!("{}: lookup response has no account id", profile.username),
            ))
        }
    };

    diary_info!(
        "Resolved {} on {} to account id {}",
        profile.username,
        profile.host,
        id
    );
    Ok(Account {
        host: profile.host,
        username: profile.username,
        id,
    })
}

fn describe(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
