//! PostgreSQL enumerations shared by the schema and the API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "class_type")]
pub enum ClassType {
    Lecture,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender_type")]
pub enum GenderType {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_mode_type")]
pub enum PaymentMode {
    Cash,
    #[sqlx(rename = "UPI")]
    #[serde(rename = "UPI")]
    Upi,
    #[sqlx(rename = "Bank Transfer")]
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Card,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role_type")]
pub enum UserRole {
    Admin,
    #[default]
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMode::BankTransfer).unwrap(),
            r#""Bank Transfer""#
        );
        assert_eq!(serde_json::to_string(&PaymentMode::Upi).unwrap(), r#""UPI""#);
        let mode: PaymentMode = serde_json::from_str(r#""Card""#).unwrap();
        assert_eq!(mode, PaymentMode::Card);
    }

    #[test]
    fn test_user_role_defaults_to_staff() {
        assert_eq!(UserRole::default(), UserRole::Staff);
        assert_eq!(UserRole::Admin.as_str(), "Admin");
    }
}
