// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request bodies and their validation.
//!
//! Field format rules are declared with `validator`; cross-field and
//! catalog rules are checked by hand so the first reported message matches
//! what the form shows for that field.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::models::catalog::{self, MAX_SELLER_CATEGORIES, OTHER_MAKER};
use crate::models::quote::{NewQuoteRequest, NewQuoteResponse};
use crate::models::UserType;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Collapse `validator` errors into the first message, ordered by field name.
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "입력값이 올바르지 않습니다".to_string())
}

fn check<T: Validate>(form: &T) -> Result<(), AppError> {
    form.validate()
        .map_err(|e| AppError::Validation(first_message(&e)))
}

fn require(condition: bool, message: &str) -> Result<(), AppError> {
    if condition {
        Ok(())
    } else {
        Err(AppError::Validation(message.to_string()))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_consent(terms: bool, privacy: bool) -> Result<(), AppError> {
    require(
        terms && privacy,
        "이용약관 및 개인정보 처리방침에 동의해주세요",
    )
}

// ─── Accounts ────────────────────────────────────────────────

/// E-mail/password sign-up.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[validate(length(max = 50, message = "담당자명이 너무 깁니다"))]
    pub name: String,
    #[validate(length(max = 100, message = "회사명이 너무 깁니다"))]
    pub company: String,
    pub user_type: UserType,
    #[serde(default)]
    pub agree_to_terms: bool,
    #[serde(default)]
    pub agree_to_privacy: bool,
}

impl RegisterForm {
    pub fn validate_form(&self) -> Result<(), AppError> {
        require_consent(self.agree_to_terms, self.agree_to_privacy)?;
        require(
            self.password == self.password_confirm,
            "비밀번호가 일치하지 않습니다",
        )?;
        require(
            self.password.chars().count() >= MIN_PASSWORD_LEN,
            "비밀번호는 6자 이상이어야 합니다",
        )?;
        require(!is_blank(&self.name), "담당자명을 입력해주세요")?;
        require(!is_blank(&self.company), "회사명을 입력해주세요")?;
        check(self)
    }
}

/// E-mail/password sign-in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

impl LoginForm {
    pub fn validate_form(&self) -> Result<(), AppError> {
        check(self)
    }
}

/// Profile completion after a first federated sign-in.
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteProfileForm {
    #[validate(length(max = 50, message = "담당자명이 너무 깁니다"))]
    pub name: String,
    #[validate(length(max = 100, message = "회사명이 너무 깁니다"))]
    pub company: String,
    pub user_type: UserType,
    #[serde(default)]
    pub agree_to_terms: bool,
    #[serde(default)]
    pub agree_to_privacy: bool,
}

impl CompleteProfileForm {
    pub fn validate_form(&self) -> Result<(), AppError> {
        require_consent(self.agree_to_terms, self.agree_to_privacy)?;
        require(!is_blank(&self.name), "담당자명을 입력해주세요")?;
        require(!is_blank(&self.company), "회사명을 입력해주세요")?;
        check(self)
    }
}

// ─── Seller profile ──────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct SellerProfileForm {
    #[serde(default)]
    #[validate(length(max = 30, message = "연락처가 너무 깁니다"))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "업체 소개는 2000자 이내로 입력해주세요"))]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub region: String,
}

impl SellerProfileForm {
    pub fn validate_form(&self) -> Result<(), AppError> {
        require(
            !self.categories.is_empty(),
            "취급 품목을 1개 이상 선택해주세요",
        )?;
        require(
            self.categories.len() <= MAX_SELLER_CATEGORIES,
            "취급 품목은 최대 5개까지 선택할 수 있습니다",
        )?;
        require(
            self.categories.iter().all(|c| catalog::is_category(c)),
            "알 수 없는 품목입니다",
        )?;
        require(!is_blank(&self.region), "지역을 선택해주세요")?;
        require(catalog::is_region(&self.region), "알 수 없는 지역입니다")?;
        check(self)
    }

    /// Category tags without duplicates, in submitted order.
    pub fn unique_categories(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        seen
    }
}

// ─── Quotes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequestForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub maker: String,
    /// Free-text maker when `maker` is the "other" entry
    #[serde(default)]
    pub maker_custom: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "품번이 너무 깁니다"))]
    pub part_number: String,
    #[validate(range(min = 1, message = "수량은 1개 이상이어야 합니다"))]
    pub quantity: u32,
    #[serde(default)]
    #[validate(length(max = 100, message = "희망 납기가 너무 깁니다"))]
    pub desired_delivery: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "비고는 1000자 이내로 입력해주세요"))]
    pub note: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl QuoteRequestForm {
    /// Maker as stored: the free-text entry replaces the "other" choice.
    pub fn final_maker(&self) -> String {
        if self.maker == OTHER_MAKER {
            self.maker_custom
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        } else {
            self.maker.trim().to_string()
        }
    }

    pub fn validate_form(&self) -> Result<NewQuoteRequest, AppError> {
        require(!is_blank(&self.category), "품목을 선택해주세요")?;
        require(catalog::is_category(&self.category), "알 수 없는 품목입니다")?;
        let maker = self.final_maker();
        require(!maker.is_empty(), "메이커를 입력해주세요")?;
        require(!is_blank(&self.part_number), "품번을 입력해주세요")?;
        require(!is_blank(&self.desired_delivery), "희망 납기를 입력해주세요")?;
        check(self)?;

        Ok(NewQuoteRequest {
            category: self.category.clone(),
            maker,
            part_number: self.part_number.trim().to_string(),
            quantity: self.quantity,
            desired_delivery: self.desired_delivery.trim().to_string(),
            note: self.note.clone().unwrap_or_default(),
            is_anonymous: self.is_anonymous,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuoteResponseForm {
    #[validate(range(exclusive_min = 0.0, message = "단가를 입력해주세요"))]
    pub unit_price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "총액이 올바르지 않습니다"))]
    pub total_price: Option<f64>,
    #[validate(range(max = 365, message = "납기일은 365일 이내로 입력해주세요"))]
    pub delivery_days: u32,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    #[validate(length(max = 1000, message = "비고는 1000자 이내로 입력해주세요"))]
    pub note: Option<String>,
}

impl QuoteResponseForm {
    pub fn validate_form(&self) -> Result<NewQuoteResponse, AppError> {
        require(self.unit_price.is_finite(), "단가를 입력해주세요")?;
        check(self)?;

        Ok(NewQuoteResponse {
            unit_price: self.unit_price,
            total_price: self.total_price,
            delivery_days: self.delivery_days,
            in_stock: self.in_stock,
            note: self.note.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(result: Result<impl Sized, AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            Err(other) => panic!("expected validation error, got {other:?}"),
            Ok(_) => panic!("expected validation error, got Ok"),
        }
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            email: "buyer@example.com".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
            name: "홍길동".to_string(),
            company: "(주)한빛정밀".to_string(),
            user_type: UserType::Buyer,
            agree_to_terms: true,
            agree_to_privacy: true,
        }
    }

    #[test]
    fn test_register_valid() {
        assert!(register_form().validate_form().is_ok());
    }

    #[test]
    fn test_register_requires_consent_first() {
        let mut form = register_form();
        form.agree_to_privacy = false;
        form.password_confirm = "other".to_string();
        assert_eq!(
            validation_message(form.validate_form()),
            "이용약관 및 개인정보 처리방침에 동의해주세요"
        );
    }

    #[test]
    fn test_register_password_rules() {
        let mut form = register_form();
        form.password_confirm = "secret2".to_string();
        assert_eq!(
            validation_message(form.validate_form()),
            "비밀번호가 일치하지 않습니다"
        );

        let mut form = register_form();
        form.password = "12345".to_string();
        form.password_confirm = "12345".to_string();
        assert_eq!(
            validation_message(form.validate_form()),
            "비밀번호는 6자 이상이어야 합니다"
        );
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let mut form = register_form();
        form.email = "not-an-email".to_string();
        assert_eq!(
            validation_message(form.validate_form()),
            "올바른 이메일 형식이 아닙니다"
        );
    }

    #[test]
    fn test_complete_profile_requires_names() {
        let form = CompleteProfileForm {
            name: "  ".to_string(),
            company: "회사".to_string(),
            user_type: UserType::Seller,
            agree_to_terms: true,
            agree_to_privacy: true,
        };
        assert_eq!(
            validation_message(form.validate_form()),
            "담당자명을 입력해주세요"
        );
    }

    #[test]
    fn test_seller_profile_rules() {
        let mut form = SellerProfileForm {
            phone: Some("02-1234-5678".to_string()),
            description: None,
            categories: vec![],
            region: "서울".to_string(),
        };
        assert_eq!(
            validation_message(form.validate_form()),
            "취급 품목을 1개 이상 선택해주세요"
        );

        form.categories = vec!["센서".to_string(), "로봇".to_string()];
        assert_eq!(validation_message(form.validate_form()), "알 수 없는 품목입니다");

        form.categories = vec!["센서".to_string()];
        form.region = String::new();
        assert_eq!(validation_message(form.validate_form()), "지역을 선택해주세요");

        form.region = "전국".to_string();
        assert!(form.validate_form().is_ok());
    }

    #[test]
    fn test_seller_profile_dedupes_categories() {
        let form = SellerProfileForm {
            phone: None,
            description: None,
            categories: vec!["PLC".to_string(), "센서".to_string(), "PLC".to_string()],
            region: "경기".to_string(),
        };
        assert_eq!(form.unique_categories(), vec!["PLC", "센서"]);
    }

    fn request_form() -> QuoteRequestForm {
        QuoteRequestForm {
            category: "서보모터".to_string(),
            maker: "미쓰비시".to_string(),
            maker_custom: None,
            part_number: " HG-KR43B ".to_string(),
            quantity: 4,
            desired_delivery: "2주 이내".to_string(),
            note: None,
            is_anonymous: true,
        }
    }

    #[test]
    fn test_request_form_valid() {
        let new = request_form().validate_form().unwrap();
        assert_eq!(new.part_number, "HG-KR43B");
        assert_eq!(new.maker, "미쓰비시");
        assert!(new.is_anonymous);
    }

    #[test]
    fn test_request_form_other_maker_needs_text() {
        let mut form = request_form();
        form.maker = OTHER_MAKER.to_string();
        assert_eq!(
            validation_message(form.validate_form()),
            "메이커를 입력해주세요"
        );

        form.maker_custom = Some("Festo".to_string());
        assert_eq!(form.validate_form().unwrap().maker, "Festo");
    }

    #[test]
    fn test_request_form_required_fields() {
        let mut form = request_form();
        form.category = String::new();
        assert_eq!(validation_message(form.validate_form()), "품목을 선택해주세요");

        let mut form = request_form();
        form.quantity = 0;
        assert_eq!(
            validation_message(form.validate_form()),
            "수량은 1개 이상이어야 합니다"
        );
    }

    #[test]
    fn test_response_form_rules() {
        let form = QuoteResponseForm {
            unit_price: 0.0,
            total_price: None,
            delivery_days: 3,
            in_stock: true,
            note: None,
        };
        assert_eq!(validation_message(form.validate_form()), "단가를 입력해주세요");

        let form = QuoteResponseForm {
            unit_price: 1000.0,
            total_price: None,
            delivery_days: 400,
            in_stock: false,
            note: None,
        };
        assert_eq!(
            validation_message(form.validate_form()),
            "납기일은 365일 이내로 입력해주세요"
        );
    }
}
