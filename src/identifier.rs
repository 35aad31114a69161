use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A Cryptology ePrint Archive identifier in canonical `<year>/<sequence>` form (e.g. `2019/579`).
///
/// The year is four digits. The sequence is either three zero-padded digits (`000` to `999`) or
/// four digits without a leading zero (`1000` and up), matching the numbering the archive hands
/// out.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    canonical: String,
}

impl Identifier {
    /// Parse an identifier, accepting the bare form as well as `ia.cr/` and `eprint.iacr.org/`
    /// prefixes, optionally behind an `http://` or `https://` scheme.
    pub fn parse(identifier: &str) -> Result<Self, ValidationError> {
        static ID_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?x)^
                (?:(?:https?://)?(?:eprint\.iacr\.org|ia\.cr)/)?   # optional host, optional scheme
                (?P<year>[0-9]{4})
                /
                (?P<seq>[0-9]{3}|[1-9][0-9]{3})
                $",
            )
            .unwrap()
        });

        let trimmed = identifier.trim();
        let caps = ID_RE
            .captures(trimmed)
            .ok_or_else(|| ValidationError::Identifier(identifier.to_string()))?;
        Ok(Identifier {
            canonical: format!("{}/{}", &caps["year"], &caps["seq"]),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The part before the slash.
    pub fn year(&self) -> &str {
        self.split().0
    }

    /// The part after the slash, with its zero padding kept.
    pub fn sequence(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Canonical form always holds exactly one slash.
        self.canonical
            .split_once('/')
            .unwrap_or((self.canonical.as_str(), ""))
    }
}

impl FromStr for Identifier {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Identifier::parse(&s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.canonical
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}
