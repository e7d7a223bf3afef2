//! Social accountability records

use serde::{Deserialize, Serialize};

use crate::social::error::SocialError;

/// A friend that bills can be split with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub name: String,
    pub email: String,
}

impl Friend {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), SocialError> {
        if self.name.trim().is_empty() {
            return Err(SocialError::Validation("name must not be empty".to_string()));
        }
        if !is_plausible_email(&self.email) {
            return Err(SocialError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

/// `local@domain` with both halves non-empty and no whitespace
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// How reliably a user settles up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountabilityMetrics {
    pub points: i64,
    pub days_late: i64,
    pub total_amount: f64,
}

impl AccountabilityMetrics {
    pub fn validate(&self) -> Result<(), SocialError> {
        if self.days_late < 0 {
            return Err(SocialError::Validation(
                "days_late must not be negative".to_string(),
            ));
        }
        if !self.total_amount.is_finite() {
            return Err(SocialError::Validation(
                "total_amount must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user: String,
    pub metrics: AccountabilityMetrics,
}

impl LeaderboardEntry {
    pub fn validate(&self) -> Result<(), SocialError> {
        if self.user.trim().is_empty() {
            return Err(SocialError::Validation("user must not be empty".to_string()));
        }
        self.metrics.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_validation() {
        assert!(Friend::new("Ana", "ana@example.com").validate().is_ok());
        assert!(Friend::new("", "ana@example.com").validate().is_err());
        assert!(Friend::new("Ana", "ana.example.com").validate().is_err());
        assert!(Friend::new("Ana", "@example.com").validate().is_err());
        assert!(Friend::new("Ana", "ana@ex ample.com").validate().is_err());
    }

    #[test]
    fn test_metrics_validation() {
        let ok = AccountabilityMetrics {
            points: -5,
            days_late: 0,
            total_amount: 12.0,
        };
        assert!(ok.validate().is_ok());

        let late = AccountabilityMetrics { days_late: -1, ..ok };
        assert!(late.validate().is_err());
    }
}
