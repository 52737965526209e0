//! Common types.

use serde::Serialize;
use thiserror::Error;

/// The kind of claim a token is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// Match a live capture against an enrolled identity.
    Verify,
    /// Register a new identity.
    Enrol,
}

/// Where an enrollment photo came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSource {
    /// An electronic ID document chip.
    Eid,
    /// An optical scan of an ID document.
    Oid,
    /// A selfie.
    Selfie,
}

/// The liveness mode requested for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssuranceType {
    /// Genuine Presence Assurance.
    GenuinePresence,
    /// Liveness Assurance.
    Liveness,
}

impl ClaimType {
    /// All the claim types.
    pub const ALL: [Self; 2] = [Self::Verify, Self::Enrol];

    /// The token the service uses for this claim type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Enrol => "enrol",
        }
    }
}

impl PhotoSource {
    /// All the photo sources.
    pub const ALL: [Self; 3] = [Self::Eid, Self::Oid, Self::Selfie];

    /// The token the service uses for this photo source.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eid => "eid",
            Self::Oid => "oid",
            Self::Selfie => "selfie",
        }
    }
}

impl AssuranceType {
    /// All the assurance types.
    pub const ALL: [Self; 2] = [Self::GenuinePresence, Self::Liveness];

    /// The token the service uses for this assurance type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GenuinePresence => "genuine_presence",
            Self::Liveness => "liveness",
        }
    }
}

/// A string did not name any variant of the enumeration.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// The enumeration being parsed.
    pub kind: &'static str,
    /// The input that failed to parse.
    pub value: String,
}

/// Implement `Display` and `FromStr` in terms of the wire tokens.
macro_rules! wire_token_impls {
    ($ty:ident, $kind:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

wire_token_impls!(ClaimType, "claim type");
wire_token_impls!(PhotoSource, "photo source");
wire_token_impls!(AssuranceType, "assurance type");
