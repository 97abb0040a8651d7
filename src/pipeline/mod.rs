//! Pipeline orchestration: runs the styling stages in a fixed order and
//! records a per-stage outcome for each.
//!
//! A stage failure never aborts the run; the failing stage passes its input
//! through and the failure lands in the [`report::StyleReport`].

pub(crate) mod report;
pub(crate) mod run;
