//! Exam invigilation duty assignment engine.
//!
//! Assigns faculty to exam-day shifts subject to per-member
//! unavailability, duty quotas, all-or-nothing groups, and per-slot
//! headcount targets. The crate is a pure engine over typed in-memory
//! data: no I/O, no persistence, no rendering.
//!
//! # Modules
//!
//! - **`models`**: domain types — `Faculty`, `FacultyGroup`,
//!   `UnavailabilityMap`, `ExamDay`, `Slot`, `DutyAssignment`
//! - **`catalog`**: assignable-unit construction (groups move as one)
//! - **`feasibility`**: capacity pre-checks that can reject a schedule
//!   before any search runs
//! - **`solver`**: backtracking search and greedy fallback, orchestrated
//!   by `assign_duties`
//! - **`validation`**: rule audit of any assignment table, however it
//!   was produced
//! - **`summary`**: per-faculty duty aggregates for reporting layers
//! - **`editing`**: slot eligibility for manual-editing UIs
//!
//! # Pipeline
//!
//! Feasibility runs first and can short-circuit with "impossible". The
//! exhaustive search returns the first complete assignment in a fully
//! deterministic order; when it proves none exists, the greedy pass
//! fills what it can and reports the rest. Validation is independent of
//! both and is also the tool for auditing externally edited tables.

pub mod catalog;
pub mod editing;
pub mod feasibility;
pub mod models;
pub mod solver;
pub mod summary;
pub mod validation;
