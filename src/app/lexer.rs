//! Turns comment-bearing CMakeSettings.json text into strict JSON.
//!
//! Line (`// ...`) and block (`/* ... */`) comments are replaced by a single
//! space. Single- and double-quoted literals are copied through untouched,
//! so comment delimiters inside strings survive.

enum Token {
    Comment { end: usize },
    Literal { end: usize },
}

pub fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match scan_token(bytes, i) {
            Some(Token::Comment { end }) => {
                out.push_str(&text[run_start..i]);
                // a space, not nothing, so neighbouring tokens stay apart
                out.push(' ');
                i = end;
                run_start = end;
            }
            Some(Token::Literal { end }) => i = end,
            None => i += 1,
        }
    }

    out.push_str(&text[run_start..]);
    out
}

fn scan_token(bytes: &[u8], start: usize) -> Option<Token> {
    match bytes[start] {
        b'/' => match bytes.get(start + 1) {
            Some(b'/') => Some(Token::Comment {
                end: line_comment_end(bytes, start + 2),
            }),
            Some(b'*') => block_comment_end(bytes, start + 2).map(|end| Token::Comment { end }),
            _ => None,
        },
        quote @ (b'"' | b'\'') => {
            literal_end(bytes, start + 1, quote).map(|end| Token::Literal { end })
        }
        _ => None,
    }
}

/// The newline itself is left in place.
fn line_comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| from + offset)
}

/// Position just past the first `*/`, or `None` when the comment never closes.
fn block_comment_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..]
        .windows(2)
        .position(|pair| pair == b"*/")
        .map(|offset| from + offset + 2)
}

/// Position just past the closing quote, honouring backslash escapes.
fn literal_end(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}
