//! Contact form fields and validation.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Minimum message length, in characters, after trimming.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Deliberately loose: `something@something.something` with no spaces or
/// extra `@`. Delivery is the real check.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Raw `POST /contact` form fields. Missing fields are empty.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub csrf_token: Option<String>,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            csrf_token: None,
        }
    }

    /// Build from decoded `(key, value)` pairs. The first occurrence of a
    /// field wins and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut name = None;
        let mut email = None;
        let mut message = None;
        let mut csrf_token = None;
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut name,
                "email" => &mut email,
                "message" => &mut message,
                "csrf_token" => &mut csrf_token,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
            csrf_token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    fn empty_message(self) -> &'static str {
        match self {
            Field::Name => "Please enter your name.",
            Field::Email => "Please enter your email address.",
            Field::Message => "Please enter a message.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Message => write!(f, "message"),
        }
    }
}

/// First validation failure. `Display` is the text shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", .0.empty_message())]
    EmptyField(Field),
    #[error("Please enter a valid email address.")]
    InvalidFormat(Field),
    #[error("Message is too short — please write a few more words.")]
    TooShort(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match *self {
            ValidationError::EmptyField(f)
            | ValidationError::InvalidFormat(f)
            | ValidationError::TooShort(f) => f,
        }
    }
}

/// Trimmed, validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validate in fixed order: name, email, message. Only the first failure is
/// reported.
pub fn validate(form: &ContactForm) -> Result<ValidSubmission, ValidationError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyField(Field::Name));
    }
    if email.is_empty() {
        return Err(ValidationError::EmptyField(Field::Email));
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidFormat(Field::Email));
    }
    if message.is_empty() {
        return Err(ValidationError::EmptyField(Field::Message));
    }
    if message.chars().count() < MIN_MESSAGE_CHARS {
        return Err(ValidationError::TooShort(Field::Message));
    }

    Ok(ValidSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}
