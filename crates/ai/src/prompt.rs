//! Prompt construction for the rewrite call.

use scamshield_core::region::Region;

/// Build the instruction prompt for one rewrite request.
///
/// The model is asked to answer with a single JSON object; the parser
/// tolerates surrounding prose (see [`crate::parse`]), but the prompt
/// pushes hard toward bare JSON to keep parse failures rare.
pub fn build_prompt(message: &str, region: Region) -> String {
    format!(
        r#"You are an expert in fraud prevention and official communications.

A user received this suspicious text message:
"{message}"

Regional context -- {region_code}: {region_context}

Rewrite the message the way a legitimate, official sender would have
written it, then explain what changed. Respond with ONLY a JSON object,
no markdown fences and no commentary, in exactly this shape:

{{
  "original_message": "<the message as given>",
  "safe_version": "<the official rewrite>",
  "differences": [
    {{"aspect": "<what differs>", "scam": "<scam phrasing>", "official": "<official phrasing>", "status": "<fixed|removed|added>"}}
  ],
  "red_flags_fixed": <number of red flags removed, 0-10>,
  "tone_comparison": {{"scam": "<tone of the scam>", "official": "<tone of the rewrite>"}},
  "key_learning": "<one sentence the user should remember>"
}}"#,
        message = message,
        region_code = region.as_str(),
        region_context = region.prompt_context(),
    )
}
