use std::{fmt::Formatter, num::ParseIntError, str::FromStr};
use thiserror::Error;

/// A range reference as sent to the Sheets API, e.g. `'Sheet1'!A1:B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl From<&str> for A1Notation {
    fn from(s: &str) -> Self {
        A1Notation(s.to_owned())
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self) -> A1Notation;
}

/// 1-based column number (`A` = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(u32);

/// 1-based row number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row(u32);

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnParseError {
    #[error("Empty column")]
    Empty,
    #[error("Non-alphabetic character in column")]
    NonAlphabeticCharacter,
    #[error("Column out of range")]
    Overflow,
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_col(s)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowParseError {
    #[error("Row numbers start at 1")]
    Zero,
    #[error("Invalid row number: {0}")]
    NotANumber(ParseIntError),
}

impl FromStr for Row {
    type Err = RowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u32>().map_err(RowParseError::NotANumber)? {
            0 => Err(RowParseError::Zero),
            row => Ok(Row(row)),
        }
    }
}

/// A cell reference. The row is absent for whole-column references such as the
/// `B` in `A1:B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Option<Row>,
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "{}{}", self.col, row),
            None => write!(f, "{}", self.col),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Empty range")]
    Empty,
    #[error("Empty sheet name")]
    EmptySheetName,
    #[error("Unterminated quoted sheet name")]
    UnterminatedSheetName,
    #[error("Invalid cell reference '{cell}': {reason}")]
    InvalidCell { cell: String, reason: String },
    #[error("Range end {end} precedes start {start}")]
    Reversed { start: String, end: String },
}

impl FromStr for CellPosition {
    type Err = A1NotationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| A1NotationParseError::InvalidCell {
            cell: s.to_owned(),
            reason,
        };

        let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
        let (col, row) = s.split_at(split);

        let col = col.parse().map_err(|e: ColumnParseError| invalid(e.to_string()))?;
        let row = if row.is_empty() {
            None
        } else {
            Some(row.parse().map_err(|e: RowParseError| invalid(e.to_string()))?)
        };

        Ok(CellPosition { col, row })
    }
}

/// A rectangular range on one sheet tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub sheet_title: Option<String>,
    pub start: CellPosition,
    pub end: CellPosition,
}

impl CellRange {
    /// Number of columns spanned by the range.
    pub fn width(&self) -> u32 {
        self.end.col.0 - self.start.col.0 + 1
    }
}

impl FromStr for CellRange {
    type Err = A1NotationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(A1NotationParseError::Empty);
        }

        let (sheet_title, local) = split_sheet_title(s)?;

        let (start, end) = match local.split_once(':') {
            Some((start, end)) => (start, end),
            None => (local, local),
        };

        let start: CellPosition = start.parse()?;
        let end: CellPosition = end.parse()?;

        let rows_reversed = matches!((start.row, end.row), (Some(s), Some(e)) if e < s);
        if end.col < start.col || rows_reversed {
            return Err(A1NotationParseError::Reversed {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(CellRange {
            sheet_title,
            start,
            end,
        })
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self) -> A1Notation {
        match &self.sheet_title {
            Some(title) => A1Notation(format!(
                "'{}'!{}:{}",
                title.replace('\'', "''"),
                self.start,
                self.end
            )),
            None => A1Notation(format!("{}:{}", self.start, self.end)),
        }
    }
}

/// Splits `Sheet!A1:B2` / `'My ''quoted'' sheet'!A1:B2` into title and local part.
fn split_sheet_title(s: &str) -> Result<(Option<String>, &str), A1NotationParseError> {
    if let Some(quoted) = s.strip_prefix('\'') {
        let mut title = String::new();
        let mut chars = quoted.char_indices().peekable();
        while let Some((index, c)) = chars.next() {
            if c != '\'' {
                title.push(c);
                continue;
            }
            if let Some((_, '\'')) = chars.peek() {
                title.push('\'');
                chars.next();
                continue;
            }
            let rest = quoted[index + 1..]
                .strip_prefix('!')
                .ok_or(A1NotationParseError::UnterminatedSheetName)?;
            if title.is_empty() {
                return Err(A1NotationParseError::EmptySheetName);
            }
            return Ok((Some(title), rest));
        }
        return Err(A1NotationParseError::UnterminatedSheetName);
    }

    match s.split_once('!') {
        Some(("", _)) => Err(A1NotationParseError::EmptySheetName),
        Some((title, rest)) => Ok((Some(title.to_owned()), rest)),
        None => Ok((None, s)),
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}

fn parse_col<T: AsRef<str>>(col_str: T) -> Result<Column, ColumnParseError> {
    let col_str = col_str.as_ref();
    if col_str.is_empty() {
        return Err(ColumnParseError::Empty);
    }
    if col_str.chars().any(|c| !c.is_ascii_alphabetic()) {
        return Err(ColumnParseError::NonAlphabeticCharacter);
    }

    col_str
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .try_fold(0u32, |acc, c| {
            acc.checked_mul(26)
                .and_then(|acc| acc.checked_add(c as u32 - 'A' as u32 + 1))
        })
        .map(Column)
        .ok_or(ColumnParseError::Overflow)
}
