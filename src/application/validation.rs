use std::collections::BTreeMap;

/// Field-level validation failures, keyed by field path (`name`, `tags.0.id`).
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("the given data was invalid")]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut errs = Self::new();
        errs.add(field, reason);
        errs
    }

    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Trims `value` and rejects it when blank or longer than `max_chars`.
pub fn required_text(
    errs: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> Option<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errs.add(field, "required");
        return None;
    }
    if trimmed.chars().count() > max_chars {
        errs.add(field, format!("may not be greater than {max_chars} characters"));
        return None;
    }
    Some(trimmed.to_string())
}
