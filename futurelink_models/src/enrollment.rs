use std::{collections::BTreeMap, fmt, sync::LazyLock};

use email_address::EmailAddress;
use regex::Regex;
use thiserror::Error;

use crate::macros::nutype_string;

/// Mobile numbers of the local carriers, e.g. `09xxxxxxxxx` or `+959xxxxxxxx`.
pub static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(09|\+?959)\d{7,9}$").unwrap());

nutype_string!(StudentName(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
));

nutype_string!(PhoneNumber(validate(regex = PHONE_NUMBER_REGEX),));

nutype_string!(CourseName(validate(not_empty, len_char_max = 256),));

nutype_string!(EnrollmentMessage(validate(len_char_max = 4096),));

/// A validated enrollment request as received from a prospective student.
///
/// Instances are only produced by [`validate`], which also upholds the
/// invariant that at least one of `email` and `phone` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    pub name: StudentName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub course: CourseName,
    pub message: Option<EnrollmentMessage>,
}

/// Raw form input before validation. A fresh draft is all empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnrollmentDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnrollmentField {
    Name,
    Email,
    Phone,
    Course,
    Message,
}

impl fmt::Display for EnrollmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Course => "Course",
            Self::Message => "Message",
        })
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("value is required")]
    Required,
    #[error("value has an invalid format")]
    Format,
    #[error("either an email address or a phone number is required")]
    CrossFieldRequired,
}

/// Validation result of a submit attempt, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<EnrollmentField, FieldError>);

impl ValidationErrors {
    pub fn insert(&mut self, field: EnrollmentField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: EnrollmentField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnrollmentField, FieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

/// Checks a draft against the configured course list.
///
/// Every rule is evaluated on each attempt, so all errors of a submit
/// surface at once. The draft itself is never modified.
pub fn validate(
    draft: &EnrollmentDraft,
    courses: &[CourseName],
) -> Result<EnrollmentRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = match StudentName::try_new(draft.name.as_str()) {
        Ok(name) => Some(name),
        Err(StudentNameError::NotEmptyViolated) => {
            errors.insert(EnrollmentField::Name, FieldError::Required);
            None
        }
        Err(StudentNameError::LenCharMaxViolated) => {
            errors.insert(EnrollmentField::Name, FieldError::Format);
            None
        }
    };

    let email = if draft.email.is_empty() {
        None
    } else {
        // The parser accepts dotless domains, the enrollment form does not.
        match draft.email.parse::<EmailAddress>() {
            Ok(email) if email.domain().contains('.') => Some(email),
            _ => {
                errors.insert(EnrollmentField::Email, FieldError::Format);
                None
            }
        }
    };

    let phone = if draft.phone.is_empty() {
        None
    } else {
        match PhoneNumber::try_new(draft.phone.as_str()) {
            Ok(phone) => Some(phone),
            Err(PhoneNumberError::RegexViolated) => {
                errors.insert(EnrollmentField::Phone, FieldError::Format);
                None
            }
        }
    };

    let course = if draft.course.is_empty() {
        errors.insert(EnrollmentField::Course, FieldError::Required);
        None
    } else {
        match CourseName::try_new(draft.course.as_str()) {
            Ok(course) if courses.contains(&course) => Some(course),
            _ => {
                errors.insert(EnrollmentField::Course, FieldError::Required);
                None
            }
        }
    };

    let message = if draft.message.is_empty() {
        None
    } else {
        match EnrollmentMessage::try_new(draft.message.as_str()) {
            Ok(message) => Some(message),
            Err(EnrollmentMessageError::LenCharMaxViolated) => {
                errors.insert(EnrollmentField::Message, FieldError::Format);
                None
            }
        }
    };

    if draft.email.is_empty() && draft.phone.is_empty() {
        errors.insert(EnrollmentField::Email, FieldError::CrossFieldRequired);
    }

    match (name, course) {
        (Some(name), Some(course)) if errors.is_empty() => Ok(EnrollmentRequest {
            name,
            email,
            phone,
            course,
            message,
        }),
        _ => Err(errors),
    }
}

/// Plain-language message shown next to the corresponding input.
pub fn error_message(field: EnrollmentField, error: FieldError) -> &'static str {
    match (field, error) {
        (EnrollmentField::Name, FieldError::Required) => "Full Name is required",
        (EnrollmentField::Course, FieldError::Required) => "Please select a course",
        (_, FieldError::Required) => "This field is required",
        (EnrollmentField::Email, FieldError::Format) => "Invalid email address",
        (EnrollmentField::Phone, FieldError::Format) => "Invalid Myanmar phone number",
        (_, FieldError::Format) => "Invalid value",
        (_, FieldError::CrossFieldRequired) => "Either Email or Phone is required",
    }
}
