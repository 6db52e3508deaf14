//! Command-line flags.

use erl_scan::ScannerOptions;

use crate::CliError;

/// Environment variable listing extra feature keywords, comma-separated.
pub const FEATURES_ENV: &str = "ERLSCAN_FEATURES";

/// Flags shared by `tokens` and `forms`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Track columns (`--columns`).
    pub columns: bool,
    /// Print each token's source text (`--text`).
    pub text: bool,
    /// Recognize `%ssa%` check comments (`--ssa-checks`).
    pub ssa_checks: bool,
    /// Feature keywords to reserve (`--feature=<word>`, repeatable).
    pub features: Vec<String>,
    /// Feed the file in chunks of this many bytes (`--chunk=<n>`).
    pub chunk: Option<usize>,
}

impl CliOptions {
    /// Parse flags following the file argument.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut options = CliOptions::default();
        for arg in args {
            if arg == "--columns" {
                options.columns = true;
            } else if arg == "--text" {
                options.text = true;
            } else if arg == "--ssa-checks" {
                options.ssa_checks = true;
            } else if let Some(word) = arg.strip_prefix("--feature=") {
                if word.is_empty() {
                    return Err(CliError::Usage(format!("empty feature keyword in '{arg}'")));
                }
                options.features.push(word.to_string());
            } else if let Some(size) = arg.strip_prefix("--chunk=") {
                match size.parse::<usize>() {
                    Ok(n) if n > 0 => options.chunk = Some(n),
                    _ => {
                        return Err(CliError::Usage(format!(
                            "invalid chunk size '{size}': expected a positive integer"
                        )))
                    }
                }
            } else {
                return Err(CliError::Usage(format!("unknown option '{arg}'")));
            }
        }
        Ok(options)
    }

    /// Add comma-separated feature keywords, as read from [`FEATURES_ENV`].
    pub fn add_env_features(&mut self, value: &str) {
        self.features.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(String::from),
        );
    }

    pub fn scanner_options(&self) -> ScannerOptions {
        ScannerOptions::new()
            .with_text(self.text)
            .with_check_comments(self.ssa_checks)
            .with_feature_keywords(self.features.iter().cloned())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
