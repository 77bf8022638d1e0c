//! Use-case services over snapshot sources.
//!
//! # Responsibility
//! - Orchestrate window, aggregation and formatting into caller-ready views.
//! - Keep storage details behind `SnapshotSource`.

pub mod report_service;
