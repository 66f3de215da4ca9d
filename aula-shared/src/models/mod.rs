pub mod classroom;
pub mod errors;
pub mod timestamp;
pub mod user;

pub use classroom::{
    ClassroomSummary, ClassroomListResponse, CreateClassroomRequest, CreateClassroomResponse,
    EnrollRequest, RosterEntry, RosterResponse,
};
pub use errors::ErrorResponse;
pub use test::{
    CreateTestRequest, CreateTestResponse, SubmitResultRequest, TestDetail, TestListResponse,
    TestQuestion, TestResultView, TestResultsResponse, TestSummary, UpdateTestRequest,
};
pub use timestamp::Timestamp;
pub use user::{
    DeleteUserRequest, LoginRequest, LoginResponse, MeResponse, PublicUser, RegisterRequest,
    RegisterResponse, UpdateUserRequest, UserListResponse, UserRole,
};
