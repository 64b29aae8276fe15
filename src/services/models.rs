//! Request and response bodies of the study backend

use serde::{Deserialize, Serialize};

use crate::state::{Mode, SessionId};

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionRequest {
    pub mode: Mode,
    pub duration: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndSessionRequest<'a> {
    pub session_id: &'a SessionId,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndSessionResponse {
    #[serde(default)]
    pub study_tip: Option<String>,
    #[serde(default)]
    pub points_earned: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub badge_image: String,
    pub earned: bool,
    #[serde(default)]
    pub points_required: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyGroup {
    pub id: i64,
    pub name: String,
    pub member_count: u32,
    pub is_member: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateGroupRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinGroupResponse {
    pub success: bool,
    #[serde(default)]
    pub member_count: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend attaches to rejected requests
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RejectionBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
