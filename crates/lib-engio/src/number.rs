//! Plain decimal number grammar for the mantissa of an engineering value.
//!
//! Accepts an optional leading minus, digits with an optional fractional
//! part (or a bare fraction such as `.5`) and an optional exponent.

use crate::error::{EngIoError, EngIoResult};
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    IResult, Parser,
};

fn mantissa(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(char('-')),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

/// Parse a complete decimal number.
pub fn parse_number(input: &str) -> EngIoResult<f64> {
    let (_, text) = all_consuming(mantissa)
        .parse(input)
        .map_err(|_| EngIoError::InvalidNumber(input.to_string()))?;

    text.parse::<f64>()
        .map_err(|_| EngIoError::InvalidNumber(input.to_string()))
}
