/// Short display date for list rows, e.g. "2026-08-30".
pub(crate) fn format_date_ymd(iso: &str) -> String {
    // Backend timestamps are RFC 3339; the date prefix is enough for display.
    iso.get(..10).unwrap_or(iso).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_ymd_truncates_timestamp() {
        assert_eq!(format_date_ymd("2026-08-30T11:22:33.000Z"), "2026-08-30");
    }

    #[test]
    fn test_format_date_ymd_short_input_passthrough() {
        assert_eq!(format_date_ymd("2026"), "2026");
        assert_eq!(format_date_ymd(""), "");
    }
}
