//! Filter command - normalise filter tokens and show the resulting chips

use crate::{
    filters::{FilterToken, codec},
    output,
};

/// Execute the filter command
///
/// Tokens are folded into one selection and re-encoded, so duplicates collapse
/// and single-valued categories keep only their last value.
pub fn execute(tokens: &[FilterToken], quiet: bool) {
    for line in render(tokens, quiet) {
        println!("{line}");
    }
}

/// Normalised chips (ids in quiet mode) followed by the selection summary
#[must_use]
pub fn render(tokens: &[FilterToken], quiet: bool) -> Vec<String> {
    let selection = codec::decode(tokens);
    let normalised = codec::encode(&selection);

    if quiet {
        return normalised.into_iter().map(|t| t.id).collect();
    }
    let mut lines = vec![output::chips(&normalised)];
    lines.extend(selection.to_string().lines().map(str::to_string));
    lines
}
