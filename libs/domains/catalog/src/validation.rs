//! Write-shape validation.
//!
//! Structural rules come from the `validator` derives on the write DTOs.
//! The password rule depends on the [`Operation`] being performed, and user
//! email uniqueness is checked against the store by [`UserValidator`].
//! A structural failure short-circuits the store-backed checks.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use core_config::catalog::CatalogConfig;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{ProductWriteDto, UserWriteDto};
use crate::repository::UserRepository;

/// Violations collected per field, in field-name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.0).unwrap_or(Value::Null)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> CatalogResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::ValidationFailed(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut collected = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid ({})", field, failure.code));
                collected.add(&field, message);
            }
        }
        collected
    }
}

/// Which write is being validated; selects the password rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Update(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl From<&CatalogConfig> for PasswordPolicy {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            min_length: config.min_password_length,
        }
    }
}

impl PasswordPolicy {
    /// Password rule for `operation`, `None` when the password is acceptable
    pub fn check(&self, operation: Operation, password: Option<&str>) -> Option<String> {
        match (operation, password) {
            (Operation::Insert, None) => Some("password is required".to_string()),
            (Operation::Update(_), None) => None,
            (_, Some(password)) if password.trim().is_empty() => {
                Some("password must not be blank".to_string())
            }
            (_, Some(password)) if password.chars().count() < self.min_length => Some(format!(
                "password must have at least {} characters",
                self.min_length
            )),
            (_, Some(_)) => None,
        }
    }
}

/// Rejects blank values and values padded with whitespace, so a write reads
/// back exactly as sent
pub(crate) fn validate_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    if value.trim() != value {
        return Err(ValidationError::new("padded")
            .with_message(Cow::Borrowed("must not start or end with whitespace")));
    }
    Ok(())
}

/// Largest number of fraction digits a price column keeps
pub const PRICE_SCALE: u32 = 2;
/// Prices must stay below 10^10 to fit NUMERIC(12,2)
const PRICE_INTEGER_DIGITS: u32 = 10;

pub(crate) fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("negative")
            .with_message(Cow::Borrowed("price must not be negative")));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("scale")
            .with_message(Cow::Borrowed("price must have at most 2 decimal places")));
    }
    if *price >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(ValidationError::new("range")
            .with_message(Cow::Borrowed("price must be less than 10000000000")));
    }
    Ok(())
}

/// Structural rules for a product write
pub fn validate_product(dto: &ProductWriteDto) -> CatalogResult<()> {
    structural(dto).into_result()
}

/// Structural rules plus the password rule for a user write
pub fn validate_user_shape(
    operation: Operation,
    dto: &UserWriteDto,
    policy: &PasswordPolicy,
) -> FieldErrors {
    let mut errors = structural(dto);
    if let Some(message) = policy.check(operation, dto.password.as_deref()) {
        errors.add("password", message);
    }
    errors
}

fn structural<T: Validate>(dto: &T) -> FieldErrors {
    match dto.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

/// Runs the full user pipeline: shape, password, then email uniqueness
pub struct UserValidator<R: UserRepository> {
    repository: Arc<R>,
    policy: PasswordPolicy,
}

impl<R: UserRepository> Clone for UserValidator<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            policy: self.policy,
        }
    }
}

impl<R: UserRepository> UserValidator<R> {
    pub fn new(repository: Arc<R>, policy: PasswordPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn validate(&self, operation: Operation, dto: &UserWriteDto) -> CatalogResult<()> {
        validate_user_shape(operation, dto, &self.policy).into_result()?;

        let mut errors = FieldErrors::new();
        let duplicate = match operation {
            Operation::Insert => self.repository.email_exists(&dto.email).await?,
            Operation::Update(id) => self
                .repository
                .find_by_email(&dto.email)
                .await?
                .is_some_and(|existing| existing.id != id),
        };
        if duplicate {
            errors.add("email", "email is already registered");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use crate::repository::MockUserRepository;
    use chrono::Utc;

    fn user_dto(password: Option<&str>) -> UserWriteDto {
        UserWriteDto {
            first_name: "Ana".to_string(),
            last_name: "Brown".to_string(),
            email: "ana@gmail.com".to_string(),
            roles: vec![Role::Operator],
            password: password.map(str::to_string),
        }
    }

    fn product_dto() -> ProductWriteDto {
        ProductWriteDto {
            name: "Phone".to_string(),
            description: "Good phone".to_string(),
            price: Decimal::new(80000, 2),
            img_url: None,
            date: Utc::now(),
            category_ids: vec![2],
        }
    }

    #[test]
    fn test_password_rule_per_operation() {
        let policy = PasswordPolicy::default();

        assert!(policy.check(Operation::Insert, None).is_some());
        assert!(policy.check(Operation::Insert, Some("   ")).is_some());
        assert!(policy.check(Operation::Insert, Some("short")).is_some());
        assert!(policy.check(Operation::Insert, Some("long-enough")).is_none());

        assert!(policy.check(Operation::Update(1), None).is_none());
        assert!(policy.check(Operation::Update(1), Some("")).is_some());
        assert!(policy.check(Operation::Update(1), Some("long-enough")).is_none());
    }

    #[test]
    fn test_user_shape_collects_every_field() {
        let mut dto = user_dto(None);
        dto.email = "not-an-email".to_string();
        dto.first_name = String::new();

        let errors = validate_user_shape(Operation::Insert, &dto, &PasswordPolicy::default());

        assert!(errors.contains("email"));
        assert!(errors.contains("first_name"));
        assert_eq!(errors.get("password").unwrap(), ["password is required"]);
    }

    #[test]
    fn test_product_rules() {
        assert!(validate_product(&product_dto()).is_ok());

        let mut dto = product_dto();
        dto.name = "  ".to_string();
        dto.price = Decimal::new(-1, 0);
        dto.category_ids.clear();

        let err = validate_product(&dto).unwrap_err();
        let CatalogError::ValidationFailed(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["category_ids", "name", "price"]
        );
    }

    #[test]
    fn test_price_must_fit_the_stored_precision() {
        let mut dto = product_dto();
        dto.price = Decimal::new(1230, 3);
        assert!(validate_product(&dto).is_ok());

        dto.price = Decimal::new(1234, 3);
        let Err(CatalogError::ValidationFailed(errors)) = validate_product(&dto) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("price").unwrap(),
            ["price must have at most 2 decimal places"]
        );

        dto.price = Decimal::new(99_999_999_999, 2);
        assert!(validate_product(&dto).is_ok());

        dto.price = Decimal::new(100_000_000_000, 0);
        let Err(CatalogError::ValidationFailed(errors)) = validate_product(&dto) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("price").unwrap(),
            ["price must be less than 10000000000"]
        );
    }

    #[test]
    fn test_padded_names_are_rejected() {
        let mut dto = product_dto();
        dto.name = " Smart TV ".to_string();
        let Err(CatalogError::ValidationFailed(errors)) = validate_product(&dto) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("name").unwrap(),
            ["must not start or end with whitespace"]
        );

        let mut user = user_dto(Some("long-enough"));
        user.last_name = "Brown ".to_string();
        let errors = validate_user_shape(Operation::Insert, &user, &PasswordPolicy::default());
        assert!(errors.contains("last_name"));
    }

    #[test]
    fn test_field_errors_display_and_json() {
        let mut errors = FieldErrors::new();
        errors.add("password", "password is required");
        errors.add("email", "email is already registered");

        assert_eq!(
            errors.to_string(),
            "email: email is already registered; password: password is required"
        );
        assert_eq!(
            errors.to_json(),
            serde_json::json!({
                "email": ["email is already registered"],
                "password": ["password is required"]
            })
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_on_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists()
            .times(1)
            .returning(|email| Ok(email.eq_ignore_ascii_case("ana@gmail.com")));

        let validator = UserValidator::new(Arc::new(repo), PasswordPolicy::default());
        let err = validator
            .validate(Operation::Insert, &user_dto(Some("12345678")))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::ValidationFailed(e) if e.contains("email")));
    }

    #[tokio::test]
    async fn test_own_email_is_not_a_duplicate_on_update() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|email| {
            Ok(Some(User {
                id: 3,
                first_name: "Ana".to_string(),
                last_name: "Brown".to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                roles: vec![Role::Operator],
            }))
        });

        let validator = UserValidator::new(Arc::new(repo), PasswordPolicy::default());

        assert!(validator
            .validate(Operation::Update(3), &user_dto(None))
            .await
            .is_ok());
        assert!(validator
            .validate(Operation::Update(4), &user_dto(None))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_structural_failure_skips_store() {
        // No expectations: any store call would panic
        let repo = MockUserRepository::new();
        let validator = UserValidator::new(Arc::new(repo), PasswordPolicy::default());

        let err = validator
            .validate(Operation::Insert, &user_dto(Some("1")))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::ValidationFailed(e) if e.contains("password")));
    }
}
