//! Mouse-map anchors
//!
//! Widgets on the mouse map are placed at named anchors such as `#button3`,
//! `#led1` or a whole-device section like `#Device`. Anchors sort buttons
//! first, then LEDs, then sections, each by index or name.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, u32 as decimal},
    combinator::{all_consuming, map},
    sequence::preceded,
    IResult, Parser,
};
use std::fmt;
use thiserror::Error;

/// A named location on the mouse map
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Anchor {
    Button(u32),
    Led(u32),
    /// A whole-device area, e.g. `Device`, `Buttons`, `LEDs`
    Section(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum AnchorError {
    #[error("Invalid mouse-map anchor '{0}' (expected e.g. #button3, #led1 or #Device)")]
    Invalid(String),
}

impl Anchor {
    /// Caption shown next to a widget placed at this anchor
    pub fn caption(&self) -> String {
        match self {
            Anchor::Button(index) => format!("Button {}", index),
            Anchor::Led(index) => format!("LED {}", index),
            Anchor::Section(name) => name.clone(),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Button(index) => write!(f, "#button{}", index),
            Anchor::Led(index) => write!(f, "#led{}", index),
            Anchor::Section(name) => write!(f, "#{}", name),
        }
    }
}

/// Parses an anchor string
///
/// # Example
///
/// ```
/// use piper_gtk::core::anchor::{parse_anchor, Anchor};
///
/// assert_eq!(parse_anchor("#button3"), Ok(Anchor::Button(3)));
/// assert_eq!(parse_anchor("#LEDs"), Ok(Anchor::Section("LEDs".to_string())));
/// assert!(parse_anchor("button3").is_err());
/// ```
pub fn parse_anchor(input: &str) -> Result<Anchor, AnchorError> {
    all_consuming(anchor)
        .parse(input.trim())
        .map(|(_, anchor)| anchor)
        .map_err(|_| AnchorError::Invalid(input.to_string()))
}

fn anchor(input: &str) -> IResult<&str, Anchor> {
    preceded(char('#'), alt((indexed, section))).parse(input)
}

fn indexed(input: &str) -> IResult<&str, Anchor> {
    alt((
        map(preceded(tag("button"), decimal), Anchor::Button),
        map(preceded(tag("led"), decimal), Anchor::Led),
    ))
    .parse(input)
}

fn section(input: &str) -> IResult<&str, Anchor> {
    map(alpha1, |name: &str| Anchor::Section(name.to_string())).parse(input)
}
