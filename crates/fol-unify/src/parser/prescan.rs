//! Bracket and quote pre-scan, run before the term grammar so that
//! structural mistakes are reported with their own position.

use super::term::ParseError;

/// Check that parentheses balance and quoted names are closed, and that no
/// argument list opens below `max_depth` levels of nesting.
///
/// Parentheses inside single-quoted names do not count.
pub(crate) fn check_balanced(input: &str, max_depth: Option<usize>) -> Result<(), ParseError> {
    let mut open: Vec<usize> = Vec::new();
    let mut quote_start: Option<usize> = None;

    for (pos, ch) in input.char_indices() {
        if quote_start.is_some() {
            // A doubled quote closes and reopens, which nets out the same
            if ch == '\'' {
                quote_start = None;
            }
            continue;
        }
        match ch {
            '\'' => quote_start = Some(pos),
            '(' => {
                open.push(pos);
                if let Some(max) = max_depth {
                    // Arguments inside this paren sit at level open.len()
                    if open.len() > max {
                        return Err(ParseError::TooDeep {
                            position: pos,
                            max_depth: max,
                        });
                    }
                }
            }
            ')' => {
                if open.pop().is_none() {
                    return Err(ParseError::UnbalancedParens { position: pos });
                }
            }
            _ => {}
        }
    }

    if let Some(position) = quote_start {
        return Err(ParseError::UnterminatedQuote { position });
    }
    match open.pop() {
        Some(position) => Err(ParseError::UnbalancedParens { position }),
        None => Ok(()),
    }
}
