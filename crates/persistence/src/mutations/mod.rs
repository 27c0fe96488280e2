// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! All mutations use Diesel DSL, with the `last_insert_rowid()` helper from
//! the `sqlite` module where a new row's id is needed.
//!
//! ## Module Organization
//!
//! - `registry`: organization, team, facility, and season creation
//! - `blockers`: blocker insert, full-replace update, hard delete
//! - `events`: game and practice insert, update, delete
//! - `overrides`: append-only ledger writes
//! - `import`: atomic bulk import transactions

pub mod blockers;
pub mod events;
pub mod import;
pub mod overrides;
pub mod registry;

pub use import::{GameImport, ImportOutcome, PracticeImport};
