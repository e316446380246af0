//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Content hash of `static/css/main.css`, computed by the build script.
pub const CSS_HASH: &str = env!("CSS_HASH");

/// The current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Append the stylesheet hash to a static asset path for cache busting.
///
/// Usage in templates: `{{ "/static/css/main.css"|versioned }}`
#[askama::filter_fn]
pub fn versioned(path: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(versioned_path(&path.to_string()))
}

fn versioned_path(path: &str) -> String {
    format!("{path}?v={CSS_HASH}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_path() {
        let url = versioned_path("/static/css/main.css");
        assert!(url.starts_with("/static/css/main.css?v="));
        assert!(url.ends_with(CSS_HASH));
    }
}
