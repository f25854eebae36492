// src/core/commands/helpers.rs

//! Provides helper functions for tokenizing payloads and extracting command arguments.
//! These helpers keep argument handling and error mapping consistent across commands.

use super::reply::CommandError;

/// Characters that separate arguments after the verb.
pub const ARG_SEPARATORS: [char; 2] = [';', ','];

/// Splits a payload into its verb and argument list.
///
/// The verb is the text before the first space of the trimmed payload. The rest
/// is split on `;` or `,` with empty tokens discarded, and `sender_id` is
/// prepended so that `args[0]` always identifies the caller.
pub fn tokenize<'a>(payload: &'a str, sender_id: &str) -> (&'a str, Vec<String>) {
    let payload = payload.trim();
    let (verb, rest) = payload.split_once(' ').unwrap_or((payload, ""));

    let mut args = vec![sender_id.to_string()];
    args.extend(
        rest.split(ARG_SEPARATORS)
            .filter(|token| !token.is_empty())
            .map(str::to_string),
    );
    (verb, args)
}

/// Rejects empty names and anything that could escape the storage root:
/// parent-directory segments, absolute paths and drive prefixes.
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || path.contains("..") {
        return false;
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return false;
    }
    if path.contains(":/") || path.contains(":\\") {
        return false;
    }
    let mut chars = path.chars();
    if let (Some(first), Some(':')) = (chars.next(), chars.next())
        && first.is_ascii_alphabetic()
    {
        return false;
    }
    !std::path::Path::new(path).is_absolute()
}

/// The invoking sender, which is always `args[0]`.
pub fn sender_arg(args: &[String]) -> Result<String, CommandError> {
    args.first().cloned().ok_or(CommandError::Unauthorized)
}

/// A path argument at `index`; missing or unsafe paths are `FORBIDDEN`.
pub fn path_arg(args: &[String], index: usize) -> Result<String, CommandError> {
    match args.get(index) {
        Some(path) if is_valid_path(path) => Ok(path.clone()),
        _ => Err(CommandError::Forbidden),
    }
}

/// A free-form argument at `index`; a missing value is `FORBIDDEN`.
pub fn content_arg(args: &[String], index: usize) -> Result<String, CommandError> {
    args.get(index).cloned().ok_or(CommandError::Forbidden)
}
