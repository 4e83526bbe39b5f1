//! Object classes and labeled bounding boxes.

use bbox::{CyCxHW, HW, TLBR};
use num_traits::Float;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A bounding box with its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<R, C> {
    pub rect: R,
    pub class: C,
}

impl<T, C> Label<CyCxHW<T>, C>
where
    T: Float,
    C: Copy,
{
    /// Converts the box into normalized TLBR form.
    pub fn to_ratio_tlbr(&self, size: &HW<T>) -> Label<TLBR<T>, C> {
        Label {
            rect: TLBR::from(&self.rect).normalize(size),
            class: self.class,
        }
    }
}

/// The closed set of annotated object classes.
///
/// The discriminants are the class identifiers stored in the source
/// annotations and in the `image/object/class/label` feature.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(i64)]
pub enum ObjectClass {
    Vehicle = 1,
    Pedestrian = 2,
    Sign = 3,
    Cyclist = 4,
}

impl ObjectClass {
    /// Looks up the class by its numeric identifier.
    pub fn from_id(id: i64) -> Option<Self> {
        Self::iter().find(|class| class.id() == id)
    }

    pub fn id(self) -> i64 {
        self as i64
    }

    /// The class text written to the `image/object/class/text` feature.
    pub fn text(self) -> &'static str {
        self.into()
    }
}
