use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classroom projection used by list and detail views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassroomSummary {
    pub id: Uuid,
    pub name: String,
    /// Username of the owning teacher.
    pub teacher_username: String,
}

/// Response carrying every classroom visible to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassroomListResponse {
    pub classrooms: Vec<ClassroomSummary>,
}

/// Request to create a classroom owned by a teacher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateClassroomRequest {
    pub name: String,
    pub teacher_id: Uuid,
}

/// Response to a successful classroom creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateClassroomResponse {
    pub id: Uuid,
    pub name: String,
}

/// Request to enroll or unenroll a student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollRequest {
    pub classroom_id: Uuid,
    pub student_id: Uuid,
}

/// One enrolled student in a classroom roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub student_id: Uuid,
    pub name: String,
    pub username: String,
}

/// Response listing the students enrolled in one classroom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterResponse {
    pub classroom_id: Uuid,
    pub students: Vec<RosterEntry>,
}
