// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Bindery integration tests.
//!
//! Provides mock providers, factories and stores for fast, deterministic,
//! CI-runnable tests without external catalog services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock metadata provider with canned candidates, delays and failures
//! - [`MemoryStore`] - In-memory enabled-list store
//! - [`mock_factory`] / [`FailingFactory`] - Factories for wiring mocks into a category

pub mod factory;
pub mod memory_store;
pub mod mock_provider;

pub use factory::{mock_factory, mock_manifest, FailingFactory, SharedFactory};
pub use memory_store::MemoryStore;
pub use mock_provider::{candidate, MockProvider};
