use super::{CyCxHW, Rect, HW};
use crate::common::*;

/// Bounding box in TLBR format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub t: T,
    pub l: T,
    pub b: T,
    pub r: T,
}

impl<T> TLBR<T> {
    pub fn from_tlbr(tlbr: [T; 4]) -> Self {
        let [t, l, b, r] = tlbr;
        Self { t, l, b, r }
    }
}

impl<T> TLBR<T>
where
    T: Float,
{
    /// Converts pixel coordinates to ratios of the image size.
    ///
    /// Vertical edges are divided by the image height and horizontal edges
    /// by the image width. The result is not clamped.
    pub fn normalize(&self, size: &HW<T>) -> Self {
        let h = size.h();
        let w = size.w();

        Self {
            t: self.t / h,
            l: self.l / w,
            b: self.b / h,
            r: self.r / w,
        }
    }

    /// Clamps every edge into `[min, max]`.
    pub fn clamp(&self, min: T, max: T) -> Self {
        let clamp = |value: T| value.max(min).min(max);

        Self {
            t: clamp(self.t),
            l: clamp(self.l),
            b: clamp(self.b),
            r: clamp(self.r),
        }
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn cy(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.t + self.h() / two
    }

    fn cx(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.l + self.w() / two
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }
}

impl<T> From<CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: CyCxHW<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: &CyCxHW<T>) -> Self {
        Self {
            t: from.t(),
            l: from.l(),
            b: from.b(),
            r: from.r(),
        }
    }
}
