//! Behavioural suites and shared fakes for the restart core.

pub(crate) mod support;
