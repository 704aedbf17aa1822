// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! This module contains the viewer state logic separated from the iced
//! application, so it can be driven and tested without a window.

pub mod drag;
pub mod layout;
pub mod viewport;

// Re-export commonly used types for convenience
pub use drag::{DragOutcome, DragState};
pub use layout::LayoutAxis;
pub use viewport::{ScaleBounds, Transform, ViewportState};
