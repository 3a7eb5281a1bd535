/// Strips invisible spreadsheet artifacts and surrounding whitespace. Case is kept.
pub(crate) fn normalize_label(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_label;

    #[test]
    fn strips_bom_and_padding_but_keeps_case() {
        assert_eq!(normalize_label("\u{feff}  Lot A \u{200b}"), "Lot A");
        assert_eq!(normalize_label("Faculty/Staff"), "Faculty/Staff");
        assert_eq!(normalize_label("   "), "");
    }
}
