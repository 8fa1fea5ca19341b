//! Type-level bounded integers
//!
//! Rolling counters and countdown timers carry their valid range in the type,
//! so a counter can only ever be wrapped and a timer only ever saturated.

use core::marker::PhantomData;
use core::ops::{Add, Sub};

use num::traits::One;
use typenum::consts::*;
use typenum::{IsLessOrEqual, True, Unsigned};

/// Indicates that a type-level number may be converted to a runtime-level
/// number of the type T
pub trait ReifyTo<T> {
    fn reify() -> T;
}

impl<T: Unsigned> ReifyTo<u8> for T {
    fn reify() -> u8 {
        <T as Unsigned>::to_u8()
    }
}

pub trait PrimitiveBounds {
    type Max;
}

macro_rules! impl_primitive_bounds {
    ($T:ty, $TMax:ty) => {
        impl PrimitiveBounds for $T {
            type Max = $TMax;
        }
    };
}

impl_primitive_bounds!(u8, U255);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoundedError {
    LTLower,
    GTUpper,
}

/// A value of `T` constrained to the inclusive range `[L, U]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounded<T, L, U> {
    val: T,
    _lower_inclusive: PhantomData<L>,
    _upper_inclusive: PhantomData<U>,
}

impl<T, L, U> Bounded<T, L, U>
where
    T: PrimitiveBounds + PartialOrd + Copy + Add<Output = T> + Sub<Output = T> + One,
    // L <= U
    L: ReifyTo<T> + IsLessOrEqual<U, Output = True>,
    // U <= T::Max
    U: ReifyTo<T> + IsLessOrEqual<<T as PrimitiveBounds>::Max, Output = True>,
{
    pub fn new(val: T) -> Result<Bounded<T, L, U>, BoundedError> {
        if val < L::reify() {
            Err(BoundedError::LTLower)
        } else if val > U::reify() {
            Err(BoundedError::GTUpper)
        } else {
            Ok(Self::from_raw(val))
        }
    }

    pub fn clamp(val: T) -> Bounded<T, L, U> {
        Self::from_raw(num::clamp(val, L::reify(), U::reify()))
    }

    pub fn lower() -> Bounded<T, L, U> {
        Self::from_raw(L::reify())
    }

    pub fn upper() -> Bounded<T, L, U> {
        Self::from_raw(U::reify())
    }

    pub fn val(&self) -> T {
        self.val
    }

    pub fn lower_bound(&self) -> T {
        L::reify()
    }

    pub fn upper_bound(&self) -> T {
        U::reify()
    }

    pub fn is_lower(&self) -> bool {
        self.val <= L::reify()
    }

    /// Next value, rolling over to the lower bound past the upper bound.
    pub fn wrapping_next(self) -> Bounded<T, L, U> {
        if self.val >= U::reify() {
            Self::lower()
        } else {
            Self::from_raw(self.val + T::one())
        }
    }

    /// Previous value, holding at the lower bound.
    pub fn saturating_prev(self) -> Bounded<T, L, U> {
        if self.val <= L::reify() {
            Self::lower()
        } else {
            Self::from_raw(self.val - T::one())
        }
    }

    fn from_raw(val: T) -> Bounded<T, L, U> {
        Bounded {
            val,
            _lower_inclusive: PhantomData,
            _upper_inclusive: PhantomData,
        }
    }
}

/// Four bit rolling message counter.
pub type MsgCounter = Bounded<u8, U0, U15>;

/// Lane indicator hold timer, in ticks.
pub type LaneTimer = Bounded<u8, U0, U100>;
