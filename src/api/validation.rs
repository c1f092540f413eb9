use super::ApiError;

pub const DRUG_NAME_REQUIRED: &str = "Drug name is required";
pub const PRICING_FIELDS_REQUIRED: &str = "Drug name and ZIP code are required";
pub const INVALID_ZIP_CODE: &str = "Invalid ZIP code format";

/// Trims the name; missing or blank names are rejected.
pub fn validate_drug_name(name: Option<&str>) -> Result<&str, ApiError> {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(ApiError::validation(DRUG_NAME_REQUIRED)),
    }
}

/// A ZIP code is exactly five ASCII digits.
pub fn validate_zip_code(zip: &str) -> Result<&str, ApiError> {
    if zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit()) {
        Ok(zip)
    } else {
        Err(ApiError::validation(INVALID_ZIP_CODE))
    }
}

pub fn validate_pricing_request<'a>(
    drug_name: Option<&'a str>,
    zip_code: Option<&'a str>,
) -> Result<(&'a str, &'a str), ApiError> {
    let drug_name = drug_name.map(str::trim).unwrap_or_default();
    let zip_code = zip_code.map(str::trim).unwrap_or_default();

    if drug_name.is_empty() || zip_code.is_empty() {
        return Err(ApiError::validation(PRICING_FIELDS_REQUIRED));
    }

    Ok((drug_name, validate_zip_code(zip_code)?))
}
