//! Analysis result value types.
//!
//! An [`AnalysisResult`] is produced once per distinct (message, region)
//! pair and never mutated afterwards -- cache hits return the stored value
//! byte-for-byte.

use serde::{Deserialize, Serialize};

/// Upper bound on `red_flags_fixed`; values above this are clamped.
pub const MAX_RED_FLAGS: u32 = 10;

/// Structured output of rewriting a scam message into a safe version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The message exactly as submitted.
    pub original_message: String,
    /// The rewritten version, as an official sender would phrase it.
    pub safe_version: String,
    /// Per-aspect differences between the scam and official phrasings.
    /// Insertion order follows the model response; semantically unordered.
    pub differences: Vec<Difference>,
    /// Number of red flags the rewrite removed, in `0..=10`.
    pub red_flags_fixed: u32,
    /// Side-by-side tone description of both versions.
    pub tone_comparison: ToneComparison,
    /// One takeaway the reader should remember.
    pub key_learning: String,
}

/// One aspect in which the scam and official versions differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// What the difference is about (e.g. "sender", "urgency", "links").
    pub aspect: String,
    /// How the scam message handles this aspect.
    pub scam: String,
    /// How an official message handles it.
    pub official: String,
    /// Short status label from the model (e.g. "fixed", "removed").
    pub status: String,
}

/// Tone description of the scam message versus the official rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneComparison {
    pub scam: String,
    pub official: String,
}
