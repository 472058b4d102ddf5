use validator::ValidationError;

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Dutch IBANs: country code, two check digits, four-letter bank code, ten digits.
pub fn dutch_iban(value: &str) -> Result<(), ValidationError> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = compact.as_bytes();
    let well_formed = bytes.len() == 18
        && bytes[..2].eq_ignore_ascii_case(b"NL")
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..8].iter().all(u8::is_ascii_alphabetic)
        && bytes[8..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(ValidationError::new("iban"));
    }
    Ok(())
}
