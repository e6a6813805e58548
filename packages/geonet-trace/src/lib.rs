/*
 * geonet-trace - Geometric Network Tracing Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (elements, geometry, weights) and ports
 * - features/    : Vertical slices (locate → flags → weights → trace → materialize)
 * - adapters/    : Provider implementations (in-memory network + flow solver)
 * - api/         : Service surface (TraceNetwork, IsolateValve, TraceNetworkPosAlong)
 *
 * Every request is a self-contained synchronous computation over a shared,
 * read-only network handle.
 */

#![allow(clippy::too_many_arguments)] // Solver passes take many inputs
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::type_complexity)] // Grouped element maps are explicit

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models, ports and geometry utilities
#[macro_use]
pub mod shared;

/// Error types
pub mod errors;

/// Service configuration (YAML schema v1)
pub mod config;

/// Feature modules (vertical slices)
pub mod features;

/// Provider adapters
pub mod adapters;

/// Service surface
pub mod api;

pub use api::GeometricNetworkService;
pub use errors::{GeonetError, Result};
