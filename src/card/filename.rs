/// Fixed prefix of every exported card.
pub const CARD_FILE_PREFIX: &str = "RSVP_Card_";
/// Extension of every exported card.
pub const CARD_FILE_EXT: &str = "png";

/// Derive the download file name for a guest: `RSVP_Card_<name>.png`.
///
/// Each run of whitespace becomes a single `_`. Path separators are replaced too, so the result
/// is always a bare file name.
pub fn card_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        stem.push(if matches!(ch, '/' | '\\') { '_' } else { ch });
    }
    format!("{CARD_FILE_PREFIX}{stem}.{CARD_FILE_EXT}")
}
