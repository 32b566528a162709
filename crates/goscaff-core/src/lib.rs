//! Application core: domain model for goscaff/scarff.

pub mod domain;
