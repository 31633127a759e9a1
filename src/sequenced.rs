/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! The positioned-item capability.
//!
//! Anything that can report where it belongs in a sequence implements
//! [`Sequenced`]. The sequencer never looks at an item beyond this accessor,
//! so payloads stay opaque and may be heterogeneous (`Box<dyn Sequenced>`).

use std::rc::Rc;
use std::sync::Arc;

/// A piece of data belonging to a totally ordered sequence.
///
/// The returned position must be stable for the lifetime of the value: the
/// sequencer reads it several times while an item is buffered.
///
/// # Examples
///
/// ```
/// use reorder_rs::Sequenced;
///
/// struct Packet {
///     seq: i64,
///     payload: Vec<u8>,
/// }
///
/// impl Sequenced for Packet {
///     fn position(&self) -> i64 {
///         self.seq
///     }
/// }
///
/// let packet = Packet { seq: 7, payload: vec![1, 2, 3] };
/// assert_eq!(packet.position(), 7);
/// assert_eq!(packet.payload.len(), 3);
/// ```
pub trait Sequenced {
    /// Position of this item in the sequence.
    fn position(&self) -> i64;
}

impl Sequenced for i64 {
    #[inline]
    fn position(&self) -> i64 {
        *self
    }
}

/// `(position, payload)` pairs, for callers that do not want a wrapper type.
impl<V> Sequenced for (i64, V) {
    #[inline]
    fn position(&self) -> i64 {
        self.0
    }
}

impl<S: Sequenced + ?Sized> Sequenced for &S {
    #[inline]
    fn position(&self) -> i64 {
        (**self).position()
    }
}

impl<S: Sequenced + ?Sized> Sequenced for Box<S> {
    #[inline]
    fn position(&self) -> i64 {
        (**self).position()
    }
}

impl<S: Sequenced + ?Sized> Sequenced for Arc<S> {
    #[inline]
    fn position(&self) -> i64 {
        (**self).position()
    }
}

impl<S: Sequenced + ?Sized> Sequenced for Rc<S> {
    #[inline]
    fn position(&self) -> i64 {
        (**self).position()
    }
}
