//! External asset plumbing for the pipeline: logo bytes, logo decoding,
//! and caption text layout.
//!
//! All IO lives here. Stages call through the fetcher seam so tests and
//! embedding callers can supply bytes without touching the network.

pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod text;
