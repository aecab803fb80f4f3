pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use keyarmor_codec::decoder::{DecodableFrom, Decoder};
use regex::Regex;

pub use error::{Error, Result};

const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Width of a base64 body line, per RFC 7468 section 2.
pub const LINE_WIDTH: usize = 64;

const BOUNDARY_PATTERN: &str = r"^-----(BEGIN|END) ([A-Z0-9 ]+)-----[ \t]*$";
const BOUNDARY_PREFIX: &str = "-----";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// DER-encoded X.509 SubjectPublicKeyInfo wrapping an RSA public key
    RsaPublicKey,
    /// DER-encoded PKCS#8 PrivateKeyInfo wrapping an RSA private key
    RsaPrivateKey,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::RsaPublicKey => RSA_PUBLIC_KEY_LABEL,
            Label::RsaPrivateKey => RSA_PRIVATE_KEY_LABEL,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            RSA_PUBLIC_KEY_LABEL => Ok(Label::RsaPublicKey),
            RSA_PRIVATE_KEY_LABEL => Ok(Label::RsaPrivateKey),
            _ => Err(Error::InvalidLabel(s.to_string())),
        }
    }
}

/// Line separator used when writing armored text.
///
/// Decoding accepts both separators regardless of this setting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryKind {
    Begin,
    End,
}

struct Boundary {
    kind: BoundaryKind,
    label: String,
}

impl Boundary {
    /// Returns `Ok(None)` for lines that are not boundaries at all.
    fn parse(re: &Regex, line: &str) -> Result<Option<Boundary>> {
        if !line.starts_with(BOUNDARY_PREFIX) {
            return Ok(None);
        }
        let captured = re
            .captures(line)
            .ok_or(Error::InvalidEncapsulationBoundary)?;
        let kind = match captured.get(1).map(|m| m.as_str()) {
            Some("BEGIN") => BoundaryKind::Begin,
            Some("END") => BoundaryKind::End,
            _ => return Err(Error::InvalidEncapsulationBoundary),
        };
        let label = captured
            .get(2)
            .ok_or(Error::InvalidEncapsulationBoundary)?
            .as_str()
            .to_string();
        Ok(Some(Boundary { kind, label }))
    }
}

/*
ref: https://www.rfc-editor.org/rfc/rfc7468.html#section-3
*/

/// An armored block: a label plus the base64 encoding of the DER body.
///
/// A `Pem` built by [`Pem::from_bytes`] or parsed with [`FromStr`] always
/// carries a canonical, padded, standard-alphabet base64 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem {
    label: Label,
    base64_data: String, // base64 encoded data, without line breaks
}

impl Pem {
    pub fn from_bytes(label: Label, data: &[u8]) -> Self {
        let base64_data = STANDARD.encode(data);
        Pem { label, base64_data }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn data(&self) -> &str {
        &self.base64_data
    }

    /// The body wrapped at [`LINE_WIDTH`] characters.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        // base64 output is ASCII, so every byte offset is a char boundary
        (0..self.base64_data.len())
            .step_by(LINE_WIDTH)
            .map(|start| {
                let end = usize::min(start + LINE_WIDTH, self.base64_data.len());
                &self.base64_data[start..end]
            })
    }

    /// Fails with [`Error::UnexpectedLabel`] unless the block carries `expected`.
    pub fn expect_label(&self, expected: Label) -> Result<()> {
        if self.label != expected {
            return Err(Error::UnexpectedLabel {
                expected: expected.to_string(),
                actual: self.label.to_string(),
            });
        }
        Ok(())
    }

    /// Renders the armored text, terminating every line with `ending`.
    pub fn encode(&self, ending: LineEnding) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_armored(&mut out, ending);
        out
    }

    fn write_armored<W: std::fmt::Write>(&self, w: &mut W, ending: LineEnding) -> std::fmt::Result {
        let eol = ending.as_str();
        write!(w, "-----BEGIN {}-----{}", self.label, eol)?;
        for line in self.lines() {
            write!(w, "{}{}", line, eol)?;
        }
        write!(w, "-----END {}-----{}", self.label, eol)
    }
}

impl Display for Pem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_armored(f, LineEnding::Lf)
    }
}

/// Trait for types that can be converted to PEM format
pub trait ToPem {
    /// The error type returned by to_pem
    type Error;

    /// Get the PEM label for this type
    fn pem_label(&self) -> Label;

    /// Convert to PEM format
    fn to_pem(&self) -> std::result::Result<Pem, Self::Error>;
}

/// Trait for types that can be constructed from PEM format
pub trait FromPem: Sized {
    /// The error type returned by from_pem
    type Error;

    /// Get the expected PEM label for this type
    fn expected_label() -> Label;

    /// Construct from PEM format
    fn from_pem(pem: &Pem) -> std::result::Result<Self, Self::Error>;
}

impl DecodableFrom<Pem> for Vec<u8> {}

impl Decoder<Pem, Vec<u8>> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>> {
        // This discards label information from Pem format.
        STANDARD.decode(self.data()).map_err(Error::Base64Decode)
    }
}

impl DecodableFrom<String> for Pem {}

impl Decoder<String, Pem> for String {
    type Error = Error;

    fn decode(&self) -> Result<Pem> {
        Pem::from_str(self)
    }
}

impl DecodableFrom<&str> for Pem {}

impl Decoder<&str, Pem> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Pem> {
        Pem::from_str(self)
    }
}

impl TryFrom<&[u8]> for Pem {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        Pem::from_str(text)
    }
}

/*
* init -> pre-eb -> body -> post-eb
*                   |_|
 */
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
enum PemParsingState {
    #[default]
    Init,
    Body,
    PostEncapsulationBoundary,
}

impl FromStr for Pem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let re = Regex::new(BOUNDARY_PATTERN).map_err(|_| Error::InvalidEncapsulationBoundary)?;
        let mut state = PemParsingState::default();
        let mut label = None;
        let mut base64_lines = vec![];
        // `lines` strips both "\n" and "\r\n"
        let mut lines = s.lines().enumerate();
        while state != PemParsingState::PostEncapsulationBoundary {
            match state {
                // explanatory text before the block is ignored, even when it
                // looks like a broken boundary
                // https://www.rfc-editor.org/rfc/rfc7468.html#section-5.2
                PemParsingState::Init => match lines.next() {
                    Some((_, line)) => match Boundary::parse(&re, line).ok().flatten() {
                        Some(b) if b.kind == BoundaryKind::Begin => {
                            label = Some(Label::from_str(&b.label)?);
                            state = PemParsingState::Body;
                        }
                        Some(_) => return Err(Error::MissingPreEncapsulationBoundary),
                        None => {}
                    },
                    None => return Err(Error::MissingPreEncapsulationBoundary),
                },
                PemParsingState::Body => match lines.next() {
                    Some((number, line)) => match Boundary::parse(&re, line)? {
                        Some(b) if b.kind == BoundaryKind::End => {
                            let begin = label.ok_or(Error::MissingPreEncapsulationBoundary)?;
                            if b.label != begin.as_str() {
                                return Err(Error::LabelMissMatch);
                            }
                            state = PemParsingState::PostEncapsulationBoundary;
                        }
                        Some(_) => return Err(Error::MissingPostEncapsulationBoundary),
                        None => {
                            if let Some(found) = line.chars().find(|c| !is_base64_char(*c)) {
                                return Err(Error::InvalidBase64Line {
                                    line: number + 1,
                                    found,
                                });
                            }
                            if !line.is_empty() {
                                base64_lines.push(line);
                            }
                        }
                    },
                    None => return Err(Error::MissingPostEncapsulationBoundary),
                },
                PemParsingState::PostEncapsulationBoundary => {}
            }
        }

        // one block per input
        for (number, line) in lines {
            if let Ok(Some(Boundary {
                kind: BoundaryKind::Begin,
                ..
            })) = Boundary::parse(&re, line)
            {
                return Err(Error::TrailingBlock { line: number + 1 });
            }
        }

        if base64_lines.is_empty() {
            return Err(Error::MissingData);
        }
        let label = label.ok_or(Error::MissingPreEncapsulationBoundary)?;
        let pem = Pem {
            label,
            base64_data: base64_lines.concat(),
        };
        // reject bad padding or trailing bits up front instead of at decode time
        STANDARD.decode(pem.data()).map_err(Error::Base64Decode)?;
        Ok(pem)
    }
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}
