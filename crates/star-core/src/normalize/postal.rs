use star_model::UNKNOWN_POSTAL_CODE;

/// Canonical text form of a postal code.
///
/// A trailing `.0` left behind by float serialization is removed and a
/// missing or blank value becomes [`UNKNOWN_POSTAL_CODE`].
pub fn clean_postal_code(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return UNKNOWN_POSTAL_CODE.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_POSTAL_CODE.to_string();
    }
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}
