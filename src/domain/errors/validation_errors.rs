/// Validation errors for domain value objects and request fields
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Prompt validation errors
    EmptyPrompt,
    PromptTooLong {
        actual: usize,
        max: usize,
    },

    // DisplayName validation errors
    EmptyName,
    NameTooLong {
        actual: usize,
        max: usize,
    },

    // Post request validation errors
    MissingField {
        field: &'static str,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyPrompt => write!(f, "Prompt cannot be empty"),
            ValidationError::PromptTooLong { actual, max } => {
                write!(f, "Prompt too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::EmptyName => write!(f, "Name cannot be empty"),
            ValidationError::NameTooLong { actual, max } => {
                write!(f, "Name too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::MissingField { field } => {
                write!(f, "Please provide a value for '{}'", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
