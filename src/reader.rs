use crate::tokens::{tokenize, Located, Token, TokenizerError};
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Located<'a>>>;

/// The untyped tree produced by the reader, before special forms are
/// recognised.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Number(f64),
    Text(String),
    Symbol(String),
    Boolean(bool),
    List(Vec<Datum>),
}

#[derive(Debug)]
pub enum Error {
    Tokenizer(TokenizerError),
    NoMoreTokens,
    UnclosedList,
    UnexpectedClose(String),
    BadNumber(String),
    TrailingInput(String),
}

pub type Result<T = Datum> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Tokenizer(e) => write!(f, "{}", e),
            Error::NoMoreTokens => write!(f, "parse failed: no input"),
            Error::UnclosedList => write!(f, "parse failed: unclosed list"),
            Error::UnexpectedClose(rest) => {
                write!(f, "parse failed, remaining input: {}", rest)
            }
            Error::BadNumber(chars) => write!(f, "parse failed: bad number {}", chars),
            Error::TrailingInput(rest) => write!(f, "parse failed, remaining input: {}", rest),
        }
    }
}

/// Reads exactly one value from `input`. Anything left over afterwards is an
/// error.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input).map_err(Error::Tokenizer)?;
    let mut reader = tokens.iter().peekable();
    let datum = read_form(&mut reader, input)?;
    match reader.peek() {
        None => Ok(datum),
        Some(next) => Err(Error::TrailingInput(input[next.offset..].to_string())),
    }
}

fn read_form(reader: &mut Reader, input: &str) -> Result {
    match reader.next() {
        Some(Located {
            token: Token::OpenRoundBracket,
            ..
        }) => read_list(reader, input).map(Datum::List),
        Some(Located {
            token: Token::CloseRoundBracket,
            offset,
        }) => Err(Error::UnexpectedClose(input[*offset..].to_string())),
        Some(Located { token, .. }) => read_atom(token),
        None => Err(Error::NoMoreTokens),
    }
}

fn read_list(reader: &mut Reader, input: &str) -> Result<Vec<Datum>> {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Located {
                token: Token::CloseRoundBracket,
                ..
            }) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader, input)?),
            None => return Err(Error::UnclosedList),
        }
    }
    Ok(elements)
}

fn read_atom(token: &Token) -> Result {
    match token {
        Token::Number(chars) => chars
            .parse::<f64>()
            .map(Datum::Number)
            .map_err(|_| Error::BadNumber(chars.to_string())),
        Token::StringLiteral(chars) => Ok(Datum::Text(chars.to_string())),
        Token::PlainChars("true") => Ok(Datum::Boolean(true)),
        Token::PlainChars("false") => Ok(Datum::Boolean(false)),
        Token::PlainChars(chars) => Ok(Datum::Symbol(chars.to_string())),
        Token::OpenRoundBracket | Token::CloseRoundBracket => {
            unreachable!("brackets are handled by read_form")
        }
    }
}
