//! Field validation for user-supplied post and comment content.

use crate::error::{DomainError, FieldError};

use super::comment::COMMENT_AUTHOR_MAX_CHARS;
use super::post::TITLE_MAX_CHARS;

/// Collects every field failure before reporting, so callers can re-prompt once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn required(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "This field is required.");
        }
    }

    pub fn max_chars(&mut self, field: &'static str, value: &str, max: usize) {
        let count = value.chars().count();
        if count > max {
            self.add(
                field,
                format!("Ensure this value has at most {max} characters (it has {count})."),
            );
        }
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

pub trait InputValidator {
    fn collect_errors(&self, errors: &mut FieldErrors);

    fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        self.collect_errors(&mut errors);
        errors.into_result()
    }
}

/// Title and body of a post being created or edited.
#[derive(Debug, Clone)]
pub struct PostContent {
    pub title: String,
    pub text: String,
}

impl PostContent {
    /// Surrounding whitespace is never significant.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            text: self.text.trim().to_string(),
        }
    }
}

impl InputValidator for PostContent {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        errors.required("title", &self.title);
        errors.max_chars("title", &self.title, TITLE_MAX_CHARS);
        errors.required("text", &self.text);
    }
}

/// A reader's submission on a post.
#[derive(Debug, Clone)]
pub struct CommentContent {
    pub author: String,
    pub text: String,
}

impl CommentContent {
    pub fn trimmed(self) -> Self {
        Self {
            author: self.author.trim().to_string(),
            text: self.text.trim().to_string(),
        }
    }
}

impl InputValidator for CommentContent {
    fn collect_errors(&self, errors: &mut FieldErrors) {
        errors.required("author", &self.author);
        errors.max_chars("author", &self.author, COMMENT_AUTHOR_MAX_CHARS);
        errors.required("text", &self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: DomainError) -> Vec<&'static str> {
        match err {
            DomainError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_post_content() {
        let content = PostContent {
            title: "Hello".into(),
            text: "World".into(),
        };
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let content = PostContent {
            title: "".into(),
            text: "x".into(),
        };
        assert_eq!(fields(content.validate().unwrap_err()), vec!["title"]);
    }

    #[test]
    fn test_title_length_counts_characters() {
        let at_limit = PostContent {
            title: "é".repeat(TITLE_MAX_CHARS),
            text: "x".into(),
        };
        assert!(at_limit.validate().is_ok());

        let over = PostContent {
            title: "a".repeat(TITLE_MAX_CHARS + 1),
            text: "x".into(),
        };
        assert_eq!(fields(over.validate().unwrap_err()), vec!["title"]);
    }

    #[test]
    fn test_all_failures_reported_together() {
        let content = CommentContent {
            author: "   ".into(),
            text: "".into(),
        };
        assert_eq!(fields(content.validate().unwrap_err()), vec!["author", "text"]);
    }
}
