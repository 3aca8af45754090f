//! Expression parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/") unary)*
//! unary   := ("-" | "+") unary | power
//! power   := atom (("^" | "**") unary)?
//! atom    := number | name "(" expr ("," expr)* ")" | name | "(" expr ")"
//! ```
//!
//! Powers are right associative and may carry a signed exponent
//! (`2^-x`). Decimal literals become exact rationals (`0.5` is `1/2`).
//! The names `pi` and `E` denote the constants, `sqrt(u)` is `u^(1/2)`
//! and `log` is the natural logarithm.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, recognize},
    multi::{fold_many0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult,
};

use dtransform_integers::Rational;

use crate::arena::ExprArena;
use crate::error::ParseError;
use crate::expr::{Constant, ExprHandle, Function};

/// Syntax tree produced by the grammar, lowered into the arena afterwards.
#[derive(Debug, Clone, PartialEq)]
enum ParseNode {
    Number(Rational),
    Name(String),
    Call(String, Vec<ParseNode>),
    Neg(Box<ParseNode>),
    Add(Box<ParseNode>, Box<ParseNode>),
    Sub(Box<ParseNode>, Box<ParseNode>),
    Mul(Box<ParseNode>, Box<ParseNode>),
    Div(Box<ParseNode>, Box<ParseNode>),
    Pow(Box<ParseNode>, Box<ParseNode>),
}

impl ParseNode {
    fn lower(self, arena: &mut ExprArena) -> Result<ExprHandle, ParseError> {
        Ok(match self {
            ParseNode::Number(r) => arena.number(r),
            ParseNode::Name(name) => match Constant::from_name(&name) {
                Some(c) => arena.constant(c),
                None => arena.symbol(&name),
            },
            ParseNode::Call(name, args) => {
                let [arg]: [ParseNode; 1] =
                    args.try_into().map_err(|args: Vec<ParseNode>| ParseError::Arity {
                        name: name.clone(),
                        expected: 1,
                        found: args.len(),
                    })?;
                let arg = arg.lower(arena)?;
                if name == "sqrt" {
                    let half = arena.number(Rational::from_i64(1, 2));
                    arena.pow(arg, half)
                } else {
                    let func =
                        Function::from_name(&name).ok_or(ParseError::UnknownFunction(name))?;
                    arena.apply(func, arg)
                }
            }
            ParseNode::Neg(a) => {
                let a = a.lower(arena)?;
                arena.neg(a)
            }
            ParseNode::Add(a, b) => {
                let (a, b) = (a.lower(arena)?, b.lower(arena)?);
                arena.add([a, b])
            }
            ParseNode::Sub(a, b) => {
                let (a, b) = (a.lower(arena)?, b.lower(arena)?);
                arena.sub(a, b)
            }
            ParseNode::Mul(a, b) => {
                let (a, b) = (a.lower(arena)?, b.lower(arena)?);
                arena.mul([a, b])
            }
            ParseNode::Div(a, b) => {
                let (a, b) = (a.lower(arena)?, b.lower(arena)?);
                arena.div(a, b)
            }
            ParseNode::Pow(a, b) => {
                let (a, b) = (a.lower(arena)?, b.lower(arena)?);
                arena.pow(a, b)
            }
        })
    }
}

impl ExprArena {
    /// Parses `input` into this arena.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a complete expression or
    /// calls an unknown function.
    pub fn parse(&mut self, input: &str) -> Result<ExprHandle, ParseError> {
        let (rest, node) = parse_expr(input).map_err(|e| ParseError::Syntax(e.to_string()))?;
        let rest = rest.trim();
        if !rest.is_empty() {
            return Err(ParseError::TrailingInput(rest.to_owned()));
        }
        node.lower(self)
    }
}

fn parse_expr(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(
            preceded(multispace0, alt((tag("+"), tag("-")))),
            parse_term,
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "+" => ParseNode::Add(Box::new(acc), Box::new(rhs)),
            _ => ParseNode::Sub(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

fn parse_term(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_unary(input)?;
    fold_many0(
        pair(
            preceded(multispace0, alt((tag("*"), tag("/")))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "*" => ParseNode::Mul(Box::new(acc), Box::new(rhs)),
            _ => ParseNode::Div(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

fn parse_unary(input: &str) -> IResult<&str, ParseNode> {
    alt((
        map(preceded(preceded(multispace0, tag("-")), parse_unary), |e| {
            ParseNode::Neg(Box::new(e))
        }),
        preceded(preceded(multispace0, tag("+")), parse_unary),
        parse_power,
    ))(input)
}

fn power_operator(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((tag("**"), tag("^"))))(input)
}

fn parse_power(input: &str) -> IResult<&str, ParseNode> {
    let (input, base) = parse_atom(input)?;
    match power_operator(input) {
        Ok((rest, _)) => {
            let (rest, exponent) = parse_unary(rest)?;
            Ok((rest, ParseNode::Pow(Box::new(base), Box::new(exponent))))
        }
        Err(_) => Ok((input, base)),
    }
}

fn parse_atom(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((parse_number, parse_call, parse_name, parse_parens)),
    )(input)
}

fn parse_number(input: &str) -> IResult<&str, ParseNode> {
    let (rest, text) = alt((
        recognize(pair(
            take_while1(|c: char| c.is_ascii_digit()),
            opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
        )),
        recognize(pair(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
    ))(input)?;
    let text = text.strip_suffix('.').unwrap_or(text);
    let value = text.parse::<Rational>().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, ParseNode::Number(value)))
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn parse_call(input: &str) -> IResult<&str, ParseNode> {
    let (rest, name) = parse_identifier(input)?;
    let (rest, args) = delimited(
        preceded(multispace0, char('(')),
        separated_list1(preceded(multispace0, char(',')), parse_expr),
        preceded(multispace0, char(')')),
    )(rest)?;
    Ok((rest, ParseNode::Call(name.to_owned(), args)))
}

fn parse_name(input: &str) -> IResult<&str, ParseNode> {
    map(parse_identifier, |s: &str| ParseNode::Name(s.to_owned()))(input)
}

fn parse_parens(input: &str) -> IResult<&str, ParseNode> {
    delimited(char('('), parse_expr, preceded(multispace0, char(')')))(input)
}
