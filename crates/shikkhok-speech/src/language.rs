//! Speech language selection.

/// Unicode block for Bengali script.
const BENGALI_BLOCK: std::ops::RangeInclusive<char> = '\u{0980}'..='\u{09FF}';

/// Pick a TTS language code for `text`.
///
/// Any Bengali-script character selects `bn`; otherwise the configured
/// default is used.
pub fn language_hint<'a>(text: &str, default: &'a str) -> &'a str {
    if text.chars().any(|c| BENGALI_BLOCK.contains(&c)) {
        "bn"
    } else {
        default
    }
}
