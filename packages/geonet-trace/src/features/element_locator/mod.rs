//! Element Locator
//!
//! Snaps a point to the nearest edge or junction element within a tolerance.
//!
//! Algorithm:
//! 1. Enumerate simple, then complex, feature classes of the element kind
//! 2. Search each class with a `tolerance` buffer around the point
//! 3. Keep the globally nearest feature (first found wins on ties)
//! 4. Snap the nearest point on that feature's geometry to its element
//!
//! Nothing within tolerance is `Ok(None)`, never an error: callers collect
//! unresolved inputs instead of aborting.

pub mod locator;

pub use locator::ElementLocator;
