//! An optional sink for structural events.
//!
//! Trees don't report anything by default. Install a [`Diagnostics`] implementation with
//! `with_diagnostics`/`set_diagnostics` to watch rotations and recolourings as they happen, e.g.
//! [`LogDiagnostics`] to forward them to the [`log`] facade.

use std::fmt;

use log::debug;

use crate::node::Color;

/// Which way a rotation turned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// The right child moved up and the pivot moved down to the left.
    Left,
    /// The left child moved up and the pivot moved down to the right.
    Right,
}

/// Receives structural events from a tree. All methods do nothing by default.
pub trait Diagnostics<V> {
    /// Called after a rotation. `pivot` is the value of the node that moved down.
    fn rotated(&mut self, rotation: Rotation, pivot: &V) {
        let _ = (rotation, pivot);
    }

    /// Called after a Red-Black node changed colour.
    fn recolored(&mut self, value: &V, color: Color) {
        let _ = (value, color);
    }
}

/// Forwards every event to [`log::debug!`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl<V> Diagnostics<V> for LogDiagnostics
where
    V: fmt::Debug,
{
    fn rotated(&mut self, rotation: Rotation, pivot: &V) {
        debug!("rotated {:?} at {:?}", rotation, pivot);
    }

    fn recolored(&mut self, value: &V, color: Color) {
        debug!("recolored {:?} to {:?}", value, color);
    }
}

/// A sink owned by a tree. It has to be `Send` so that the tree can be.
pub(crate) type Sink<V> = Box<dyn Diagnostics<V> + Send>;
