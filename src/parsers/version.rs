use crate::parsers::{Result, VersionParseError};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    multi::many0,
    sequence::preceded,
    Err,
};
use std::{
    fmt::{self, Display, Formatter},
    result::Result as StdResult,
    str::FromStr,
};

/// Files at or above this version store their source textures with the DXT pixel layout.
pub const PIXEL_LAYOUT_DXT_THRESHOLD: u32 = 0x0A00_0100;

/// A NIF version packed the same way the file header stores it: one byte per dotted component,
/// most significant first. `20.0.0.5` is `0x14000005`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NifVersion(pub u32);

impl NifVersion {
    /// Parses a dotted version such as `"10.0.1.0"`. The whole string must be consumed.
    pub fn parse(input: &str) -> StdResult<Self, VersionParseError> {
        finish(version(input.trim()))
    }

    /// Parses the first line of a NIF file, e.g. `"Gamebryo File Format, Version 20.0.0.5"`.
    pub fn from_header_line(input: &str) -> StdResult<Self, VersionParseError> {
        finish(header_line(input.trim_end()))
    }

    /// Whether source textures exported for this version use the compressed pixel layout.
    pub fn uses_dxt_pixel_layout(self) -> bool {
        self.0 >= PIXEL_LAYOUT_DXT_THRESHOLD
    }
}

impl From<u32> for NifVersion {
    fn from(raw: u32) -> Self {
        NifVersion(raw)
    }
}

impl FromStr for NifVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        NifVersion::parse(s)
    }
}

impl Display for NifVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let [a, b, c, d] = self.0.to_be_bytes();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

fn finish(res: Result<u32>) -> StdResult<NifVersion, VersionParseError> {
    match res {
        Ok(("", packed)) => Ok(NifVersion(packed)),
        Ok((rest, _)) => Err(VersionParseError::TrailingInput(rest.to_owned())),
        Err(Err::Failure(e)) | Err(Err::Error(e)) => Err(e),
        Err(Err::Incomplete(..)) => Err(VersionParseError::NomError {
            kind: nom::error::ErrorKind::Eof,
            other: None,
        }),
    }
}

fn component(input: &str) -> Result<u8> {
    let (input, digits) = digit1(input)?;
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);

    if value > u64::from(u8::MAX) {
        return Err(Err::Failure(VersionParseError::ComponentOutOfRange(value)));
    }

    Ok((input, value as u8))
}

/// One to four dot-separated components. Missing trailing components are zero, so `"3.1"` packs
/// to `0x03010000`.
pub fn version(input: &str) -> Result<u32> {
    let (input, major) = component(input)?;
    let (input, minor) = many0(preceded(char('.'), component))(input)?;

    if minor.len() > 3 {
        return Err(Err::Failure(VersionParseError::TooManyComponents));
    }

    let packed = minor
        .iter()
        .enumerate()
        .fold(u32::from(major) << 24, |packed, (i, c)| {
            packed | u32::from(*c) << (16 - 8 * i as u32)
        });

    Ok((input, packed))
}

pub fn header_line(input: &str) -> Result<u32> {
    let prefix: Result<&str> = alt((
        tag("Gamebryo File Format, Version "),
        tag("NetImmerse File Format, Version "),
    ))(input);

    let (input, _) = match prefix {
        Ok(v) => v,
        Err(_) => return Err(Err::Failure(VersionParseError::UnknownHeader)),
    };

    version(input)
}
