//! Static flag-emoji to DeepL language-code mapping

/// Resolve a two-letter flag identifier to its DeepL target language code.
///
/// Pure and total: anything not in the table returns `None`, which callers
/// must treat as "not a translation trigger" rather than an error.
pub fn resolve_language(flag: &str) -> Option<&'static str> {
    match flag.trim().to_ascii_uppercase().as_str() {
        "KR" => Some("KO"),
        "US" => Some("EN-US"),
        "GB" => Some("EN-GB"),
        "JP" => Some("JA"),
        "CN" => Some("ZH"),
        "DE" => Some("DE"),
        "FR" => Some("FR"),
        "ES" => Some("ES"),
        "IT" => Some("IT"),
        "RU" => Some("RU"),
        "PT" => Some("PT-PT"),
        "BR" => Some("PT-BR"),
        _ => None,
    }
}

/// Decode a flag emoji into its two-letter identifier.
///
/// A region flag is exactly two Unicode regional-indicator symbols
/// (U+1F1E6..U+1F1FF); each maps back to an ASCII letter. Any other emoji
/// returns `None`.
pub fn flag_identifier(emoji: &str) -> Option<String> {
    const RI_FIRST: u32 = 0x1F1E6;
    const RI_LAST: u32 = 0x1F1FF;

    let mut letters = String::with_capacity(2);
    for ch in emoji.trim().chars() {
        let cp = ch as u32;
        if !(RI_FIRST..=RI_LAST).contains(&cp) {
            return None;
        }
        letters.push(char::from(b'A' + (cp - RI_FIRST) as u8));
    }

    if letters.len() == 2 {
        Some(letters)
    } else {
        None
    }
}
