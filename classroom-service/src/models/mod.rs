mod submission;

pub use submission::{SheetRecord, StudentAggregate, SubmissionEntry, group_by_student};
