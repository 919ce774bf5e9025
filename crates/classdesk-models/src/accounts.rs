//! Accounts and their role specializations.
//!
//! Every account shares the same base fields. What differs per role lives in
//! [`RoleProfile`], which is flattened into the account when serialized so the
//! wire form carries a `role` tag next to the role-specific fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use classdesk_core::AppError;
use classdesk_core::serde::{deserialize_optional_lenient_u8, deserialize_optional_trimmed};

use crate::ids::AccountId;

pub const INVALID_ROLE_MESSAGE: &str = "Invalid role specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Faculty => "Faculty",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Self::Student),
            "Faculty" => Ok(Self::Faculty),
            "Admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(INVALID_ROLE_MESSAGE)),
        }
    }
}

/// Year of study, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u8", into = "u8")]
#[schema(value_type = u8)]
pub struct StudentYear(u8);

impl StudentYear {
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StudentYear {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=4).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::validation("Year must be between 1 and 4"))
        }
    }
}

impl From<StudentYear> for u8 {
    fn from(year: StudentYear) -> Self {
        year.0
    }
}

impl fmt::Display for StudentYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: String,
    pub year: StudentYear,
    pub course: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyProfile {
    pub faculty_id: String,
    /// Department label.
    pub faculty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "role")]
pub enum RoleProfile {
    Student(StudentProfile),
    Faculty(FacultyProfile),
    Admin,
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Faculty(_) => Role::Faculty,
            Self::Admin => Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

impl Account {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn is_student(&self) -> bool {
        matches!(self.profile, RoleProfile::Student(_))
    }

    pub fn is_faculty(&self) -> bool {
        matches!(self.profile, RoleProfile::Faculty(_))
    }

    pub fn student_id(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Student(p) => Some(&p.student_id),
            _ => None,
        }
    }

    pub fn faculty_id(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Faculty(p) => Some(&p.faculty_id),
            _ => None,
        }
    }
}

/// A validated registration, password still in plaintext.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub username: String,
    pub password: String,
    pub profile: RoleProfile,
}

/// Registration body. Every field is optional at the wire level so that a
/// missing field produces a readable message instead of a serde error.
#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[schema(example = "Student")]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub middle_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub student_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_lenient_u8")]
    #[schema(value_type = Option<u8>)]
    pub year: Option<u8>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub course: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub faculty_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub faculty: Option<String>,
}

fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::validation(message))
}

impl RegisterRequest {
    /// Checks the role tag, required fields and field rules, in that order,
    /// and returns the first failure.
    pub fn into_new_account(self) -> Result<NewAccount, AppError> {
        let role: Role = self
            .role
            .as_deref()
            .ok_or_else(|| AppError::validation(INVALID_ROLE_MESSAGE))?
            .parse()?;

        let first_name = required(self.first_name.clone(), "First name is required")?;
        let last_name = required(self.last_name.clone(), "Last name is required")?;
        let username = required(self.username.clone(), "Username is required")?;
        let password = match self.password.clone() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(AppError::validation("Password is required")),
        };

        self.validate()?;

        let profile = match role {
            Role::Student => {
                let student_id = required(self.student_id, "Student ID is required")?;
                let year = self
                    .year
                    .ok_or_else(|| AppError::validation("Year is required"))?
                    .try_into()?;
                let course = required(self.course, "Course is required")?;
                RoleProfile::Student(StudentProfile {
                    student_id,
                    year,
                    course,
                })
            }
            Role::Faculty => {
                let faculty_id = required(self.faculty_id, "Faculty ID is required")?;
                let faculty = required(self.faculty, "Faculty is required")?;
                RoleProfile::Faculty(FacultyProfile {
                    faculty_id,
                    faculty,
                })
            }
            Role::Admin => RoleProfile::Admin,
        };

        Ok(NewAccount {
            first_name,
            last_name,
            middle_name: self.middle_name,
            username,
            password,
            profile,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountFilterParams {
    /// Only return accounts with this role.
    pub role: Option<Role>,
}
