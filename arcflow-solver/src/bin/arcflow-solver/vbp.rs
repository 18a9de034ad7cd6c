//! Reading of vector bin-packing instances in the VBP format.
//!
//! The format is a sequence of whitespace-separated integers, where `#` starts a comment which
//! runs until the end of the line:
//! ```text
//! D
//! c_1 ... c_D
//! N
//! w_1_1 ... w_1_D b_1
//! ...
//! w_N_1 ... w_N_D b_N
//! ```
//! Here `D` is the number of dimensions, `c` the capacity of the bin, `N` the number of item
//! types, `w_i` the usage of item type `i` and `b_i` its demand.
//!
//! Only the shape of the file is checked here; whether the numbers make sense is decided by the
//! builder.
use std::io::Read;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum VbpError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("'{token}' on line {line} is not an integer")]
    InvalidInteger { line: usize, token: String },

    #[error("the file ended while reading {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("the {what} on line {line} should be non-negative, but is {value}")]
    NegativeCount {
        what: &'static str,
        line: usize,
        value: i32,
    },

    #[error("unexpected '{token}' on line {line} after the last item type")]
    TrailingInput { line: usize, token: String },
}

/// The contents of a VBP file.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct VbpInstance {
    pub(crate) bin_dimensions: Vec<i32>,
    pub(crate) item_dimensions_by_type: Vec<Vec<i32>>,
    pub(crate) demand_by_type: Vec<i32>,
}

pub(crate) fn parse_vbp(mut source: impl Read) -> Result<VbpInstance, VbpError> {
    let mut contents = String::new();
    let _ = source.read_to_string(&mut contents)?;

    let mut tokens = Tokens::new(&contents);

    let num_dimensions = tokens.next_count("number of dimensions")?;
    let bin_dimensions = (0..num_dimensions)
        .map(|_| tokens.next_integer("the bin capacities"))
        .collect::<Result<Vec<_>, _>>()?;

    let num_item_types = tokens.next_count("number of item types")?;
    let mut item_dimensions_by_type = Vec::with_capacity(num_item_types);
    let mut demand_by_type = Vec::with_capacity(num_item_types);
    for _ in 0..num_item_types {
        let usage = (0..num_dimensions)
            .map(|_| tokens.next_integer("the usage of an item type"))
            .collect::<Result<Vec<_>, _>>()?;
        item_dimensions_by_type.push(usage);
        demand_by_type.push(tokens.next_integer("the demand of an item type")?);
    }

    if let Some((line, token)) = tokens.next_token() {
        return Err(VbpError::TrailingInput {
            line,
            token: token.to_owned(),
        });
    }

    Ok(VbpInstance {
        bin_dimensions,
        item_dimensions_by_type,
        demand_by_type,
    })
}

/// The integers of a VBP file together with their (1-based) line numbers.
struct Tokens<'a> {
    tokens: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(contents: &'a str) -> Self {
        let tokens = contents.lines().enumerate().flat_map(|(index, line)| {
            let content = line.split('#').next().unwrap_or_default();
            content
                .split_whitespace()
                .map(move |token| (index + 1, token))
        });

        Tokens {
            tokens: Box::new(tokens),
        }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        self.tokens.next()
    }

    fn next_integer(&mut self, expected: &'static str) -> Result<i32, VbpError> {
        let (_, value) = self.next_integer_with_line(expected)?;
        Ok(value)
    }

    fn next_integer_with_line(&mut self, expected: &'static str) -> Result<(usize, i32), VbpError> {
        let (line, token) = self
            .next_token()
            .ok_or(VbpError::UnexpectedEnd { expected })?;

        let value = token.parse::<i32>().map_err(|_| VbpError::InvalidInteger {
            line,
            token: token.to_owned(),
        })?;

        Ok((line, value))
    }

    fn next_count(&mut self, what: &'static str) -> Result<usize, VbpError> {
        let (line, value) = self.next_integer_with_line(what)?;

        usize::try_from(value).map_err(|_| VbpError::NegativeCount { what, line, value })
    }
}
