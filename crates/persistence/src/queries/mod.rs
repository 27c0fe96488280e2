// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `registry`: organization, team, facility, and season lookups
//! - `blockers`: blocker loads
//! - `events`: game and practice loads, including org-wide scoped loads
//! - `overrides`: override ledger reads

pub mod blockers;
pub mod events;
pub mod overrides;
pub mod registry;
