pub mod classrooms;
pub mod users;

pub use classrooms::{
    ClassroomRecord, ClassroomStore, ClassroomSummaryRow, PgClassroomStore, RosterRow,
};
pub use tests::{PgTestStore, TestDetailRow, TestRecord, TestResultRow, TestStore, TestSummaryRow};
pub use users::{NewUser, PgUserStore, UserParam, UserRecord, UserStore};
