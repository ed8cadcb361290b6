//! Rounding directives and inexactness codes.
//!
//! A complex operation takes one rounding direction per component and reports
//! one ternary outcome per component. Both pairs are packed into a single small
//! integer so they can travel through the API as plain `Copy` values.
//!
//! Ternary outcomes are `std::cmp::Ordering`, matching what the scalar layer
//! returns: `Less` means the stored value is below the exact one (rounded
//! down), `Greater` means it is above (rounded up), `Equal` means exact.

use rug::float::Round;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rounding direction for a single component.
///
/// The discriminants are the packed nibble values used by [`RoundingPair`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    Nearest = 0,
    /// Round toward zero.
    Zero = 1,
    /// Round toward +Infinity.
    Up = 2,
    /// Round toward -Infinity.
    Down = 3,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 4] = [
        RoundingMode::Nearest,
        RoundingMode::Zero,
        RoundingMode::Up,
        RoundingMode::Down,
    ];

    /// Swap `Up` and `Down`; `Nearest` and `Zero` are symmetric under negation.
    ///
    /// Rounding `-t` with the inverted direction and negating the result gives
    /// the same value as rounding `t` directly.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            RoundingMode::Up => RoundingMode::Down,
            RoundingMode::Down => RoundingMode::Up,
            other => other,
        }
    }

    #[inline]
    pub fn is_nearest(self) -> bool {
        self == RoundingMode::Nearest
    }

    /// Direction that rounds a value of the given sign away from zero.
    #[inline]
    pub fn away_from_zero(negative: bool) -> Self {
        if negative {
            RoundingMode::Down
        } else {
            RoundingMode::Up
        }
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(RoundingMode::Nearest),
            1 => Some(RoundingMode::Zero),
            2 => Some(RoundingMode::Up),
            3 => Some(RoundingMode::Down),
            _ => None,
        }
    }
}

impl From<RoundingMode> for Round {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::Nearest => Round::Nearest,
            RoundingMode::Zero => Round::Zero,
            RoundingMode::Up => Round::Up,
            RoundingMode::Down => Round::Down,
        }
    }
}

/// Two rounding directions packed as `re | im << 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundingPair(u8);

macro_rules! rounding_pairs {
    ($($name:ident => ($re:ident, $im:ident)),* $(,)?) => {
        impl RoundingPair {
            $(
                pub const $name: RoundingPair =
                    RoundingPair::new(RoundingMode::$re, RoundingMode::$im);
            )*
        }
    };
}

rounding_pairs! {
    NN => (Nearest, Nearest), NZ => (Nearest, Zero), NU => (Nearest, Up), ND => (Nearest, Down),
    ZN => (Zero, Nearest), ZZ => (Zero, Zero), ZU => (Zero, Up), ZD => (Zero, Down),
    UN => (Up, Nearest), UZ => (Up, Zero), UU => (Up, Up), UD => (Up, Down),
    DN => (Down, Nearest), DZ => (Down, Zero), DU => (Down, Up), DD => (Down, Down),
}

impl RoundingPair {
    #[inline]
    pub const fn new(re: RoundingMode, im: RoundingMode) -> Self {
        Self(re as u8 | ((im as u8) << 4))
    }

    /// Same direction for both components.
    #[inline]
    pub const fn both(mode: RoundingMode) -> Self {
        Self::new(mode, mode)
    }

    #[inline]
    pub fn re(self) -> RoundingMode {
        Self::nibble(self.0 & 0x0F)
    }

    #[inline]
    pub fn im(self) -> RoundingMode {
        Self::nibble(self.0 >> 4)
    }

    /// Exchange the two directions (used when real and imaginary roles swap).
    #[inline]
    pub fn swapped(self) -> Self {
        Self::new(self.im(), self.re())
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self.0
    }

    /// Decode a packed pair; `None` if either nibble is not a known direction.
    pub fn from_bits(bits: u8) -> Option<Self> {
        let re = RoundingMode::from_bits(bits & 0x0F)?;
        let im = RoundingMode::from_bits(bits >> 4)?;
        Some(Self::new(re, im))
    }

    // Only reachable with nibbles written by `new`, which are always valid.
    fn nibble(bits: u8) -> RoundingMode {
        RoundingMode::from_bits(bits).unwrap_or(RoundingMode::Nearest)
    }
}

impl Default for RoundingPair {
    fn default() -> Self {
        RoundingPair::NN
    }
}

impl From<(RoundingMode, RoundingMode)> for RoundingPair {
    fn from((re, im): (RoundingMode, RoundingMode)) -> Self {
        RoundingPair::new(re, im)
    }
}

/// Two ternary rounding outcomes packed 2 bits each: exact=0, up=1, down=2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InexactCode(u8);

impl InexactCode {
    pub const EXACT: InexactCode = InexactCode(0);

    #[inline]
    pub fn new(re: Ordering, im: Ordering) -> Self {
        Self(Self::encode(re) | (Self::encode(im) << 2))
    }

    #[inline]
    pub fn re(self) -> Ordering {
        Self::decode(self.0 & 3)
    }

    #[inline]
    pub fn im(self) -> Ordering {
        Self::decode((self.0 >> 2) & 3)
    }

    /// Real ternary as -1, 0 or +1.
    #[inline]
    pub fn re_sign(self) -> i32 {
        self.re() as i32
    }

    /// Imaginary ternary as -1, 0 or +1.
    #[inline]
    pub fn im_sign(self) -> i32 {
        self.im() as i32
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        self.0 == 0
    }

    /// Exchange the real and imaginary outcomes.
    #[inline]
    pub fn swapped(self) -> Self {
        Self::new(self.im(), self.re())
    }

    #[inline]
    pub fn to_bits(self) -> u8 {
        self.0
    }

    /// Decode a packed code; `None` for the unused `3` pattern or high bits.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits > 0x0F || bits & 3 == 3 || (bits >> 2) & 3 == 3 {
            return None;
        }
        Some(Self(bits))
    }

    #[inline]
    fn encode(t: Ordering) -> u8 {
        match t {
            Ordering::Equal => 0,
            Ordering::Greater => 1,
            Ordering::Less => 2,
        }
    }

    #[inline]
    fn decode(bits: u8) -> Ordering {
        match bits {
            1 => Ordering::Greater,
            2 => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

impl From<(Ordering, Ordering)> for InexactCode {
    fn from((re, im): (Ordering, Ordering)) -> Self {
        InexactCode::new(re, im)
    }
}
