//! The `tokens` and `forms` commands.

use std::collections::VecDeque;

use erl_scan::{
    scan, Forms, Input, Location, Outcome, Remaining, ScanResult, ScannerOptions, Token,
};

use crate::options::CliOptions;
use crate::CliError;

pub fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| {
        let path = path.to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => CliError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, source },
        }
    })
}

/// Print every token of the file, stopping at the first error.
pub fn tokens(path: &str, options: &CliOptions) -> Result<(), CliError> {
    let content = read_file(path)?;
    let mut all = Vec::new();
    let mut failure = None;
    drive(&content, options, |outcome| match outcome {
        Outcome::Ok { tokens, .. } => {
            all.extend(tokens);
            true
        }
        Outcome::Eof(_) => false,
        Outcome::Error { error, .. } => {
            failure = Some(error);
            false
        }
    });

    println!("Tokens for '{}' ({} tokens):", path, all.len());
    for tok in &all {
        print_token(tok, options.text);
    }
    match failure {
        Some(error) => Err(CliError::Scan {
            path: path.to_string(),
            error,
        }),
        None => Ok(()),
    }
}

/// Print the file form by form, reporting errors and carrying on after them.
pub fn forms(path: &str, options: &CliOptions) -> Result<(), CliError> {
    let content = read_file(path)?;
    let mut index = 0;
    let mut failed = 0;
    drive(&content, options, |outcome| {
        match outcome {
            Outcome::Ok { tokens, end } => {
                index += 1;
                println!("Form {index} ({} tokens, ends at {end}):", tokens.len());
                for tok in &tokens {
                    print_token(tok, options.text);
                }
            }
            Outcome::Eof(_) => return false,
            Outcome::Error { error, .. } => {
                failed += 1;
                eprintln!("{path}:{error}");
            }
        }
        true
    });

    if failed > 0 {
        return Err(CliError::Forms {
            path: path.to_string(),
            count: failed,
        });
    }
    Ok(())
}

fn print_token(tok: &Token, show_text: bool) {
    match tok.text() {
        Some(text) if show_text => println!("  {tok}  {text:?}"),
        _ => println!("  {tok}"),
    }
}

/// Split `text` into pieces of at most `size` bytes, never inside a
/// character. A piece grows past `size` only to finish a multi-byte
/// character.
pub fn split_chunks(text: &str, size: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut from = 0;
    while from < text.len() {
        let mut to = (from + size.max(1)).min(text.len());
        while !text.is_char_boundary(to) {
            to += 1;
        }
        pieces.push(&text[from..to]);
        from = to;
    }
    pieces
}

/// Scan `text` form by form, calling `visit` with every finished outcome
/// until it returns `false` or input ends. Errors do not end the drive:
/// scanning resumes with the unconsumed input.
///
/// With a chunk size the text goes through the step API piece by piece;
/// otherwise it is scanned in place with [`Forms`].
pub fn drive(text: &str, options: &CliOptions, mut visit: impl FnMut(Outcome) -> bool) {
    let scanner_options: ScannerOptions = options.scanner_options();
    let start = if options.columns {
        Location::with_column(1, 1)
    } else {
        Location::line(1)
    };
    let Some(size) = options.chunk else {
        let mut forms = Forms::new(text, start, &scanner_options);
        while let Some(outcome) = forms.next_outcome() {
            if matches!(outcome, Outcome::Eof(_)) || !visit(outcome) {
                return;
            }
        }
        return;
    };

    let mut queue: VecDeque<String> = split_chunks(text, size)
        .into_iter()
        .map(String::from)
        .collect();
    tracing::debug!(chunks = queue.len(), "feeding input");

    let mut location = start;
    let mut cont = None;
    loop {
        let chunk = queue.pop_front();
        let input = chunk.as_deref().map_or(Input::Eof, Input::Chunk);
        match scan(cont.take(), input, location, &scanner_options) {
            ScanResult::More(next) => cont = Some(next),
            ScanResult::Done { outcome, rest } => {
                location = match &outcome {
                    Outcome::Ok { end, .. } | Outcome::Error { end, .. } => *end,
                    Outcome::Eof(_) => return,
                };
                if !visit(outcome) {
                    return;
                }
                match rest {
                    Remaining::Text(text) => queue.push_front(text),
                    Remaining::Eof => return,
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
