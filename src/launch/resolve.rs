//! launch::resolve
//!
//! Template substitution and the quote-aware command tokenizer.
//!
//! A configured tool command is a single shell-style string, possibly with
//! placeholders (`$LOCAL`, `$REMOTE`). Resolution happens in two steps:
//!
//! 1. Textual placeholder substitution. One left-to-right pass; substituted
//!    text is never re-scanned, so placeholder-like content inside a value
//!    stays verbatim. Unrecognized placeholders are left as-is.
//! 2. Splitting the leading executable token from the argument remainder.
//!    The token grammar mirrors OS command-line parsing: a token is a
//!    strictly alternating sequence of unquoted runs (no space, tab, or
//!    double quote) and quoted runs (double-quoted, backslash escapes the
//!    next character), starting with either kind. This lets an executable
//!    path contain quoted segments, e.g. `"C:\Program Files\tool.exe" -x`.
//!
//! The executable token keeps its quotes; [`unquote`] strips them for
//! consumers that need the bare path. The argument remainder is returned
//! verbatim, leading whitespace included, and is never re-tokenized here.

use thiserror::Error;

/// Placeholder for the baseline (unmodified) file path.
pub const LOCAL: &str = "$LOCAL";

/// Placeholder for the working (modified) file path.
pub const REMOTE: &str = "$REMOTE";

/// Errors from command resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No leading executable token could be matched.
    #[error("command template has no executable token: {template:?}")]
    NoExecutable {
        /// The offending template, after substitution
        template: String,
    },
}

/// Replace placeholder keys with their values in one left-to-right pass.
///
/// At each position the first matching key wins. The substituted value is
/// appended wholesale and never re-scanned, so substitution cannot recurse.
/// Text matching no key is copied through unchanged.
pub fn substitute(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'outer: while let Some(ch) = rest.chars().next() {
        for (key, value) in substitutions {
            if !key.is_empty() {
                if let Some(after) = rest.strip_prefix(key) {
                    out.push_str(value);
                    rest = after;
                    continue 'outer;
                }
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Run {
    Unquoted,
    Quoted,
}

/// Split a command string into its leading executable token and the
/// argument remainder.
///
/// The token keeps embedded quotes; the remainder is everything after it,
/// verbatim. See the module docs for the token grammar.
///
/// # Errors
///
/// Returns [`ResolveError::NoExecutable`] when no prefix matches the token
/// grammar (empty string, leading whitespace, or an unterminated leading
/// quote). Callers treat this as a configuration error.
///
/// # Example
///
/// ```
/// use toolgate::launch::resolve::split_leading_token;
///
/// let (exe, args) = split_leading_token("\"C:\\Program Files\\tool.exe\" --diff a b").unwrap();
/// assert_eq!(exe, "\"C:\\Program Files\\tool.exe\"");
/// assert_eq!(args, " --diff a b");
/// ```
pub fn split_leading_token(command: &str) -> Result<(&str, &str), ResolveError> {
    let mut pos = 0;
    let mut last: Option<Run> = None;

    while let Some(ch) = command[pos..].chars().next() {
        match ch {
            ' ' | '\t' => break,
            '"' => {
                // Two adjacent quoted runs never join into one token.
                if last == Some(Run::Quoted) {
                    break;
                }
                match scan_quoted(command, pos) {
                    Some(end) => {
                        pos = end;
                        last = Some(Run::Quoted);
                    }
                    // Unterminated quote: the run does not match, the
                    // token ends before it.
                    None => break,
                }
            }
            _ => {
                pos = scan_unquoted(command, pos);
                last = Some(Run::Unquoted);
            }
        }
    }

    if pos == 0 {
        return Err(ResolveError::NoExecutable {
            template: command.to_string(),
        });
    }
    Ok((&command[..pos], &command[pos..]))
}

/// Resolve a command template: substitute placeholders, then split the
/// executable token from the argument string.
pub fn resolve_command(
    template: &str,
    substitutions: &[(&str, &str)],
) -> Result<(String, String), ResolveError> {
    let substituted = substitute(template, substitutions);
    let (executable, arguments) = split_leading_token(&substituted)?;
    Ok((executable.to_string(), arguments.to_string()))
}

/// Strip quote delimiters from a token and unescape `\"` and `\\` inside
/// quoted segments. A backslash before any other character stays literal.
pub fn unquote(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    let mut in_quotes = false;
    while let Some(ch) = chars.next() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            _ => out.push(ch),
        }
    }
    out
}

/// Scan a quoted run starting at the `"` at `start`; returns the position
/// one past the closing quote, or `None` when unterminated.
fn scan_quoted(s: &str, start: usize) -> Option<usize> {
    debug_assert!(s[start..].starts_with('"'));
    let body = &s[start + 1..];
    let mut iter = body.char_indices();
    while let Some((i, ch)) = iter.next() {
        match ch {
            '"' => return Some(start + 1 + i + ch.len_utf8()),
            // Backslash escapes the next character, whatever it is.
            '\\' => {
                iter.next()?;
            }
            _ => {}
        }
    }
    None
}

/// Scan an unquoted run starting at `start`; returns the position of the
/// first space, tab, or double quote (or the end of the string).
fn scan_unquoted(s: &str, start: usize) -> usize {
    for (i, ch) in s[start..].char_indices() {
        if matches!(ch, ' ' | '\t' | '"') {
            return start + i;
        }
    }
    s.len()
}
