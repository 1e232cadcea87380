//! First-class input events.
//!
//! Gestures are what the host display surface forwards to a session. They
//! carry intent only and can be logged, scripted and replayed.

use super::types::{CellSlot, Point, TokenId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A pointer or click gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    /// Pointer pressed on a freeform token.
    DragStart {
        /// Token under the pointer.
        token: TokenId,
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// Pointer moved.
    DragMove {
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// Pointer released.
    DragEnd,
    /// A grid token was picked from the tray or board.
    Select {
        /// Token picked.
        token: TokenId,
    },
    /// A grid cell was clicked.
    ClickCell {
        /// Row-major cell index.
        cell: usize,
    },
    /// The tray was clicked.
    ClickTray,
    /// A dragged grid token was dropped.
    Drop {
        /// Token dropped.
        token: TokenId,
        /// Target cell; absent means the tray.
        #[serde(default)]
        cell: Option<usize>,
    },
    /// Abandon any selection or drag.
    Cancel,
    /// Put every token back where the puzzle started.
    Reset,
}

impl Gesture {
    /// Pointer position carried by a drag gesture.
    pub fn pointer(&self) -> Option<Point> {
        match self {
            Gesture::DragStart { x, y, .. } | Gesture::DragMove { x, y } => {
                Some(Point::new(*x, *y))
            }
            _ => None,
        }
    }

    /// Target slot carried by a drop gesture.
    pub fn drop_slot(&self) -> Option<CellSlot> {
        match self {
            Gesture::Drop { cell, .. } => Some(CellSlot::from(*cell)),
            _ => None,
        }
    }

    /// Returns true for gestures only a freeform board understands.
    pub fn is_freeform(&self) -> bool {
        matches!(
            self,
            Gesture::DragStart { .. } | Gesture::DragMove { .. } | Gesture::DragEnd
        )
    }

    /// Returns true for gestures only a grid understands.
    pub fn is_grid(&self) -> bool {
        matches!(
            self,
            Gesture::Select { .. }
                | Gesture::ClickCell { .. }
                | Gesture::ClickTray
                | Gesture::Drop { .. }
        )
    }
}
