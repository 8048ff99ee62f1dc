use std::time::Duration;

/// Waits `ms` milliseconds without blocking the runtime.
pub async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Form field validators.
///
/// Each rule returns `Ok(())` or the message to show under the field.
pub mod validators {
    use regex::Regex;
    use std::sync::LazyLock;

    static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    });

    #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
    pub enum ValidationError {
        #[error("Por favor, ingresa una dirección de correo electrónico válida")]
        Email,
        #[error("Este campo es obligatorio")]
        Required,
    }

    pub type Rule = fn(&str) -> Result<(), ValidationError>;

    pub fn email(value: &str) -> Result<(), ValidationError> {
        if EMAIL_PATTERN.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::Email)
        }
    }

    /// Only the empty string fails; whitespace counts as a value.
    pub fn required(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            Err(ValidationError::Required)
        } else {
            Ok(())
        }
    }

    /// Applies `rules` in order and reports the first failure.
    pub fn validate(value: &str, rules: &[Rule]) -> Result<(), ValidationError> {
        rules.iter().try_for_each(|rule| rule(value))
    }
}
