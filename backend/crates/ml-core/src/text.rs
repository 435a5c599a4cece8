//! Text helpers shared by the HTTP layer and the mailer.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const MAX_EMAIL_LENGTH: usize = 254;

/// Loose structural check for a bare address (`local@domain.tld`).
///
/// Display-name forms such as `Jane <jane@example.com>` are rejected; the
/// address is stored and used verbatim as the SMTP recipient.
pub fn is_email_valid(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    if email
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | ',' | ';' | '/'))
    {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Domain needs at least one dot with non-empty labels on both sides
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Like [`is_email_valid`], returning a located error for the HTTP layer
#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if is_email_valid(email) {
        Ok(())
    } else {
        Err(CoreError::InvalidEmail {
            value: email.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Turn a plain-text body into paragraphs: every non-blank line, trimmed,
/// becomes one `<p>` element. Blank lines are dropped.
pub fn htmlify_body(body: &str) -> String {
    let paragraphs: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    format!("<p>{}</p>", paragraphs.join("</p><p>"))
}
