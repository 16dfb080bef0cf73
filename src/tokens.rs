use regex::Regex;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    Number(&'a str),
    StringLiteral(&'a str),
    PlainChars(&'a str),
}

/// A token together with the byte offset in the input where it starts.
#[derive(Debug, PartialEq)]
pub struct Located<'a> {
    pub token: Token<'a>,
    pub offset: usize,
}

#[derive(Debug)]
pub struct TokenizerError {
    pub remainder: String,
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tokenizer failed, remaining input: {}", self.remainder)
    }
}

lazy_static! {
    // Alternatives are tried left to right, so a leading sign followed by a
    // digit is always a number and never a symbol.
    static ref TOKEN_RE: Regex = Regex::new(
        r##"(?x)
            ^\s*
            (?:
                (?P<number>[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)
                |"(?P<string>[^"]*)"
                |\[\[(?P<multiline>(?s:.*?))\]\]
                |(?P<plain>[A-Za-z0-9_\-+*/%~&|^!=<>?]+)
                |(?P<open>\()
                |(?P<close>\))
            )
        "##
    )
    .expect("token regex is valid");
}

pub fn tokenize(input: &str) -> Result<Vec<Located>, TokenizerError> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    loop {
        let rest = &input[offset..];
        if rest.trim_start().is_empty() {
            break;
        }
        let caps = TOKEN_RE.captures(rest).ok_or_else(|| TokenizerError {
            remainder: rest.trim_start().to_string(),
        })?;
        let whole = caps.get(0).map_or(0, |m| m.end());
        let (token, start) = if let Some(m) = caps.name("number") {
            (Token::Number(m.as_str()), m.start())
        } else if let Some(m) = caps.name("string") {
            // Include the opening quote in the token's position.
            (Token::StringLiteral(m.as_str()), m.start() - 1)
        } else if let Some(m) = caps.name("multiline") {
            (Token::StringLiteral(m.as_str()), m.start() - 2)
        } else if let Some(m) = caps.name("plain") {
            (Token::PlainChars(m.as_str()), m.start())
        } else if let Some(m) = caps.name("open") {
            (Token::OpenRoundBracket, m.start())
        } else if let Some(m) = caps.name("close") {
            (Token::CloseRoundBracket, m.start())
        } else {
            unreachable!("token regex matched without a capture")
        };
        tokens.push(Located {
            token,
            offset: offset + start,
        });
        offset += whole;
    }
    Ok(tokens)
}
