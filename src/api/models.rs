//! Wire models for the programmer API.
//!
//! Requests and responses use camelCase field names:
//!
//! ```json
//! {
//!   "nickname": "weaverryan",
//!   "avatarNumber": 3,
//!   "powerLevel": 5,
//!   "tagLine": "Symfony"
//! }
//! ```
//!
//! The request structs are allow-lists: anything else in the body (including
//! `powerLevel`, and `nickname` on updates) is silently ignored. Error bodies
//! follow the problem+json convention, see [`ApiProblem`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::store::Programmer;

/// Client-writable fields when creating a programmer.
///
/// Everything is optional at the parse stage; required fields are enforced by
/// entity validation so that all violations are reported in one response.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgrammerRequest {
    pub nickname: Option<String>,
    pub avatar_number: Option<i64>,
    pub tag_line: Option<String>,
}

/// Client-writable fields when updating a programmer.
///
/// `nickname` is deliberately absent: it is fixed at creation time. A missing
/// field leaves the stored value unchanged, for PUT and PATCH alike.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgrammerRequest {
    pub avatar_number: Option<i64>,
    pub tag_line: Option<String>,
}

/// Serialized programmer as returned to clients
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammerRepresentation {
    pub nickname: String,
    pub avatar_number: i64,
    pub power_level: i64,
    pub tag_line: Option<String>,
}

impl From<&Programmer> for ProgrammerRepresentation {
    fn from(programmer: &Programmer) -> Self {
        Self {
            nickname: programmer.nickname.clone(),
            avatar_number: programmer.avatar_number,
            power_level: programmer.power_level,
            tag_line: programmer.tag_line.clone(),
        }
    }
}

/// List response wrapper: `{"programmers": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgrammerCollection {
    pub programmers: Vec<ProgrammerRepresentation>,
}

/// problem+json error document
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiProblem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub errors: BTreeMap<String, String>,
}

impl ApiProblem {
    pub const TYPE_VALIDATION_ERROR: &'static str = "validation_error";
    pub const TYPE_INVALID_BODY_FORMAT: &'static str = "invalid_body_format";

    pub fn validation_error(errors: BTreeMap<String, String>) -> Self {
        Self {
            problem_type: Self::TYPE_VALIDATION_ERROR.to_string(),
            title: "There was a validation error".to_string(),
            errors,
        }
    }

    pub fn invalid_body_format(detail: String) -> Self {
        Self {
            problem_type: Self::TYPE_INVALID_BODY_FORMAT.to_string(),
            title: detail,
            errors: BTreeMap::new(),
        }
    }
}
