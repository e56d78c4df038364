use heapless::String;

/// Copy `text` into a bounded string, cutting at the last char boundary that fits.
pub(crate) fn bounded_copy<const N: usize>(text: &str) -> String<N> {
    let mut out = String::<N>::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Parse a decimal position key such as `"12"`, tolerating surrounding whitespace.
pub(crate) fn parse_position(key: &str) -> Option<u16> {
    let trimmed = key.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_copy_stops_on_char_boundary() {
        let copied = bounded_copy::<5>("Al-Fatihah");
        assert_eq!(copied.as_str(), "Al-Fa");

        let arabic = bounded_copy::<5>("ٱلْفَاتِحَة");
        assert!(arabic.len() <= 5);
        assert!(arabic.as_str().is_char_boundary(arabic.len()));
    }

    #[test]
    fn positions_must_be_decimal() {
        assert_eq!(parse_position("7"), Some(7));
        assert_eq!(parse_position(" 286 "), Some(286));
        assert_eq!(parse_position(""), None);
        assert_eq!(parse_position("-1"), None);
        assert_eq!(parse_position("1a"), None);
        assert_eq!(parse_position("70000"), None);
    }
}
