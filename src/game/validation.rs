use lazy_static::lazy_static;
use regex::Regex;

pub const MIN_SKILL_LEVEL: i32 = 1;
pub const MAX_SKILL_LEVEL: i32 = 10;
pub const DEFAULT_SKILL_LEVEL: i32 = 5;

lazy_static! {
    // local@domain.tld, no whitespace, at least one dot in the domain
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
            .expect("email pattern is valid");
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email é obrigatório".to_string());
    }
    if !is_valid_email(email) {
        return Err("Email inválido".to_string());
    }
    Ok(())
}

/// Validate a required free-text field: non-blank, printable, bounded length.
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} é obrigatório", field));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{} deve ter no máximo {} caracteres", field, max_len));
    }
    if trimmed.contains('\0') {
        return Err(format!("{} contém caracteres inválidos", field));
    }
    Ok(())
}

pub fn validate_optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<(), String> {
    match value {
        Some(v) if v.trim().chars().count() > max_len => {
            Err(format!("{} deve ter no máximo {} caracteres", field, max_len))
        }
        _ => Ok(()),
    }
}

pub fn validate_skill_level(level: i32) -> Result<(), String> {
    if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&level) {
        return Err(format!(
            "Nível de habilidade deve estar entre {} e {}",
            MIN_SKILL_LEVEL, MAX_SKILL_LEVEL
        ));
    }
    Ok(())
}

pub fn clamp_skill_level(level: i32) -> i32 {
    level.clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL)
}

/// Trim and drop control characters; blank input becomes `None`.
pub fn sanitize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(sanitize)
        .filter(|v| !v.is_empty())
}

pub fn sanitize(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|&c| c != '\0' && c != '\t' && c != '\r' && c != '\n')
        .collect::<String>()
        .trim()
        .to_string()
}
