//! Bounding box types in pixel and ratio units.
//!
//! Boxes come in two equivalent forms, [CyCxHW] (center point and size) and
//! [TLBR] (top, left, bottom, right edges). Neither form validates its
//! values: a box with a negative size is carried through conversions as is.

mod common;

pub use cycxhw::*;
pub mod cycxhw;

pub use tlbr::*;
pub mod tlbr;

pub use rect::*;
pub mod rect;

pub use hw::*;
pub mod hw;
