use crate::domain::errors::ValidationError;

/// A validated generation prompt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt(String);

impl Prompt {
    /// Maximum prompt length accepted by the generation providers we proxy
    pub const MAX_LEN: usize = 4000;

    /// Create a new Prompt with validation
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        if value.len() > Self::MAX_LEN {
            return Err(ValidationError::PromptTooLong {
                actual: value.len(),
                max: Self::MAX_LEN,
            });
        }

        Ok(Self(value))
    }

    /// Get the prompt as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
