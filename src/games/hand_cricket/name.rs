use crate::games::hand_cricket::error::NameError;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 20;

/// Characters the welcome screen lets through as they are typed.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Trims `raw` and checks it is 2-20 ASCII letters or digits.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(bad) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(NameError::InvalidCharacter(bad));
    }

    let len = name.chars().count();
    if len < MIN_NAME_LEN {
        return Err(NameError::TooShort { min: MIN_NAME_LEN });
    }
    if len > MAX_NAME_LEN {
        return Err(NameError::TooLong { max: MAX_NAME_LEN });
    }

    Ok(name.to_string())
}
