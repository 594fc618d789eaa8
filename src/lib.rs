//! Hubcap - GitHub capabilities for agent reasoning loops
//!
//! Hubcap exposes a fixed set of GitHub operations (repository metadata,
//! contents, branches, commits, pull requests, reviews) as discrete,
//! independently invocable capabilities. An external reasoning loop (an
//! LLM agent, a script, or the bundled CLI) selects capabilities by name,
//! feeds each one loosely-typed input, and reads back deterministic text.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates)
//! - [`capability`] - The uniform capability contract and registry
//! - [`github`] - Typed operations over the GitHub REST API
//! - [`render`] - Shared deterministic formatting rules
//! - [`config`] - Configuration resolved once at startup
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. A capability's `invoke` never raises: every failure is rendered as
//!    text so the calling loop stays alive and can self-correct.
//! 2. A multi-file commit moves the branch reference if and only if every
//!    step of the staging sequence succeeded; there is no partial
//!    application.
//! 3. Branch reference updates are always fast-forward; concurrent work is
//!    never silently discarded.
//! 4. No state is cached between invocations: every call re-derives what
//!    it needs from the remote service.

pub mod capability;
pub mod cli;
pub mod config;
pub mod github;
pub mod render;
pub mod ui;
