pub mod hit;
pub mod preview;
pub mod submit;

pub use hit::{Bounds, hit_test, hit_test_rect};
pub use preview::{PreviewControl, PreviewNode, PreviewOption, preview, preview_all};
pub use submit::{Submission, SubmittedValue, apply_date_picks, collect_submission};
