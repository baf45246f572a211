// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Seam between the file-mutating tools (`read`, `write`, `edit`) and a
//! session-scoped file-time tracker.
//!
//! `corvid-tools` cannot depend on the crate that owns the session store
//! (that would form a dependency cycle, since the session store sits above
//! the tool registry in the build order). Instead, tools that need to detect
//! external modification between a read and a write accept an
//! `Arc<dyn FreshnessGuard>` and the owning crate supplies the real
//! implementation backed by the session's recorded read mtimes.

use std::path::Path;

use async_trait::async_trait;

/// Tracks per-path read timestamps and flags external modification.
#[async_trait]
pub trait FreshnessGuard: Send + Sync {
    /// Record that `path` was just read, capturing its current mtime.
    async fn record_read(&self, path: &Path);

    /// Fail if `path`'s mtime has advanced more than 0.001s past the last
    /// recorded read. Silent (Ok) if there is no prior read record.
    async fn assert_fresh(&self, path: &Path) -> Result<(), String>;

    /// Record that `path` was just written, refreshing its tracked mtime.
    async fn record_write(&self, path: &Path);
}

/// A guard that performs no tracking — used by default and in tests.
pub struct NoopFreshnessGuard;

#[async_trait]
impl FreshnessGuard for NoopFreshnessGuard {
    async fn record_read(&self, _path: &Path) {}
    async fn assert_fresh(&self, _path: &Path) -> Result<(), String> {
        Ok(())
    }
    async fn record_write(&self, _path: &Path) {}
}
