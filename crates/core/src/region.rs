//! Supported regions and their prompt context strings.
//!
//! The region adapts the AI prompt to local regulators and payment rails
//! (e.g. UPI/RBI for India, FTC for the US). Unknown codes fall back to the
//! baseline region rather than failing the request.

use serde::{Deserialize, Serialize};

/// Baseline region used when a request omits the region or sends an
/// unsupported code.
pub const DEFAULT_REGION: Region = Region::In;

/// A supported country/locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    In,
    Us,
    Gb,
    Sg,
    Au,
}

impl Region {
    /// All supported codes, for validation error messages.
    pub const ALL: [Region; 5] = [Region::In, Region::Us, Region::Gb, Region::Sg, Region::Au];

    /// Parse a region code (case-insensitive). Unknown or empty input
    /// yields [`DEFAULT_REGION`].
    pub fn parse_or_default(code: Option<&str>) -> Region {
        match code.map(|c| c.trim().to_ascii_uppercase()).as_deref() {
            Some("IN") => Region::In,
            Some("US") => Region::Us,
            Some("GB") | Some("UK") => Region::Gb,
            Some("SG") => Region::Sg,
            Some("AU") => Region::Au,
            _ => DEFAULT_REGION,
        }
    }

    /// Whether `code` names a supported region (after trimming and
    /// uppercasing). Used by request validation, which rejects unknown
    /// codes instead of silently falling back.
    pub fn is_supported(code: &str) -> bool {
        matches!(
            code.trim().to_ascii_uppercase().as_str(),
            "IN" | "US" | "GB" | "UK" | "SG" | "AU"
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::In => "IN",
            Region::Us => "US",
            Region::Gb => "GB",
            Region::Sg => "SG",
            Region::Au => "AU",
        }
    }

    /// Regulatory/context framing embedded into the AI prompt.
    pub fn prompt_context(&self) -> &'static str {
        match self {
            Region::In => {
                "India: official payment messages come from banks or the NPCI/UPI \
                 system, never ask for UPI PINs, and cite the RBI for regulatory \
                 matters. Official SMS senders use registered headers, not phone numbers."
            }
            Region::Us => {
                "United States: official notices reference the FTC or CFPB, never \
                 request Social Security numbers by text, and banks never ask for \
                 full account credentials over SMS."
            }
            Region::Gb => {
                "United Kingdom: official messages follow FCA guidance, banks use \
                 registered sender IDs, and HMRC never texts payment links."
            }
            Region::Sg => {
                "Singapore: official messages follow MAS anti-scam guidelines and \
                 banks have removed clickable links from SMS entirely."
            }
            Region::Au => {
                "Australia: official notices reference the ACCC/Scamwatch, and \
                 myGov or banks never text one-time links asking for credentials."
            }
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
