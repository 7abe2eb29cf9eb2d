//! Request DTOs with validation.
//!
//! Required fields are `Option`s carrying a `required` rule so that a
//! missing field is reported per field rather than as a parse failure.
//! Read-only fields (`id`, `owner`, `created_at`, `updated_at`) are not
//! declared and are therefore ignored when sent.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use petadopt_core::error::AppError;
use petadopt_entity::pet::{Gender, PetChanges, PetSize, PetStatus, PetType};
use petadopt_service::{PetInput, ProfileUpdate, Registration};

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed(BLANK)))
    } else {
        Ok(())
    }
}

/// Usernames: letters, digits and `@.+-_`.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    let valid = value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username").with_message(Cow::Borrowed(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        )))
    }
}

fn validate_choice<T: FromStr<Err = AppError>>(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|e| ValidationError::new("invalid_choice").with_message(Cow::Owned(e.message)))
}

fn validate_pet_type(value: &str) -> Result<(), ValidationError> {
    validate_choice::<PetType>(value)
}

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    validate_choice::<Gender>(value)
}

fn validate_size(value: &str) -> Result<(), ValidationError> {
    validate_choice::<PetSize>(value)
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    validate_choice::<PetStatus>(value)
}

fn parse_opt<T: FromStr<Err = AppError>>(value: Option<String>) -> Result<Option<T>, AppError> {
    value.map(|v| v.parse()).transpose()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::field(field, REQUIRED))
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(
        required(message = "This field is required."),
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    /// Email address.
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,
    /// Password.
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_not_blank")
    )]
    pub password: Option<String>,
    /// Password confirmation.
    pub password2: Option<String>,
}

impl RegisterRequest {
    /// Convert into the service input. Call after `validate()`.
    pub fn into_registration(self) -> Result<Registration, AppError> {
        Ok(Registration {
            username: require(self.username, "username")?,
            email: require(self.email, "email")?,
            password: require(self.password, "password")?,
            password2: self.password2,
        })
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_not_blank")
    )]
    pub username: Option<String>,
    /// Password.
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_not_blank")
    )]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Username and password. Call after `validate()`.
    pub fn into_credentials(self) -> Result<(String, String), AppError> {
        Ok((
            require(self.username, "username")?,
            require(self.password, "password")?,
        ))
    }
}

/// Profile update body for PUT and PATCH on the current user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    /// New username.
    #[validate(
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    /// New email.
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,
}

impl ProfileRequest {
    /// PUT replaces the profile, so `username` must be present.
    pub fn require_complete(&self) -> Result<(), AppError> {
        if self.username.is_none() {
            return Err(AppError::field("username", REQUIRED));
        }
        Ok(())
    }

    /// Convert into the service input.
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username,
            email: self.email,
        }
    }
}

/// Pet body for create and PUT.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PetRequest {
    /// Display name.
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    /// Species.
    #[serde(rename = "type")]
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_pet_type")
    )]
    pub pet_type: Option<String>,
    /// Breed; blank allowed.
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub breed: Option<String>,
    /// Age in years.
    #[validate(
        required(message = "This field is required."),
        range(min = 0, message = "Ensure this value is greater than or equal to 0.")
    )]
    pub age: Option<i64>,
    /// Gender.
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_gender")
    )]
    pub gender: Option<String>,
    /// Size class.
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_size")
    )]
    pub size: Option<String>,
    /// Description.
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_not_blank")
    )]
    pub description: Option<String>,
    /// Adoption status.
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

impl PetRequest {
    /// Convert into the service input. Call after `validate()`.
    pub fn into_input(self) -> Result<PetInput, AppError> {
        Ok(PetInput {
            name: require(trimmed(self.name), "name")?,
            pet_type: require(self.pet_type, "type")?.parse()?,
            breed: trimmed(self.breed),
            age: to_age(require(self.age, "age")?)?,
            gender: require(self.gender, "gender")?.parse()?,
            size: require(self.size, "size")?.parse()?,
            description: require(trimmed(self.description), "description")?,
            status: parse_opt(self.status)?,
        })
    }
}

/// Pet body for PATCH: every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PetPatchRequest {
    /// Display name.
    #[validate(
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    /// Species.
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_pet_type"))]
    pub pet_type: Option<String>,
    /// Breed.
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub breed: Option<String>,
    /// Age in years.
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub age: Option<i64>,
    /// Gender.
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    /// Size class.
    #[validate(custom(function = "validate_size"))]
    pub size: Option<String>,
    /// Description.
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    /// Adoption status.
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

impl PetPatchRequest {
    /// Convert into a change set. Call after `validate()`.
    pub fn into_changes(self) -> Result<PetChanges, AppError> {
        Ok(PetChanges {
            name: trimmed(self.name),
            pet_type: parse_opt(self.pet_type)?,
            breed: trimmed(self.breed),
            age: self.age.map(to_age).transpose()?,
            gender: parse_opt(self.gender)?,
            size: parse_opt(self.size)?,
            description: trimmed(self.description),
            status: parse_opt(self.status)?,
        })
    }
}

fn to_age(age: i64) -> Result<i32, AppError> {
    if age < 0 {
        return Err(AppError::field(
            "age",
            "Ensure this value is greater than or equal to 0.",
        ));
    }
    i32::try_from(age).map_err(|_| {
        AppError::field(
            "age",
            format!("Ensure this value is less than or equal to {}.", i32::MAX),
        )
    })
}

/// Query parameters accepted by the pet list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetListParams {
    /// Free-text search.
    pub search: Option<String>,
    /// Comma-separated ordering, `-` prefix for descending.
    pub ordering: Option<String>,
}
