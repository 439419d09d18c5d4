//! Scheduling-policy tests.
//!
//! Exercises the shared rotation scan through both policies: issue order,
//! cycle/retire accounting, and switch-penalty placement.
