use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyMessages { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidDate { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyMessages { max, actual } => {
                write!(f, "too many messages: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidDate { input } => write!(f, "unrecognized date: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::TooManyMessages {
            max: 10_000,
            actual: 10_001,
        };
        assert_eq!(err.to_string(), "too many messages: 10001 (max 10000)");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidDate {
            input: "someday".to_owned(),
        };
        assert_eq!(err.to_string(), "unrecognized date: someday");
    }
}
