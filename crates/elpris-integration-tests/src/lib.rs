// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

//! Live integration tests against the upstream price API.
//!
//! All tests are `#[ignore]`d; run with:
//! `cargo test -p elpris-integration-tests -- --ignored`
