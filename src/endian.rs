#![forbid(unsafe_code)]

//! Host <-> fixed byte order conversion.
//!
//! On any given host one direction is the identity and the other is a byte
//! swap. Every conversion is its own inverse, so `from_little(to_little(x))`
//! gives back `x` bit for bit (floats included, NaN payloads too).

pub trait Endian: Copy {
    fn to_big(self) -> Self;
    fn from_big(self) -> Self;
    fn to_little(self) -> Self;
    fn from_little(self) -> Self;
}

macro_rules! impl_endian_int {
    ($($t:ty),*) => {$(
        impl Endian for $t {
            #[inline]
            fn to_big(self) -> Self {
                <$t>::to_be(self)
            }

            #[inline]
            fn from_big(self) -> Self {
                <$t>::from_be(self)
            }

            #[inline]
            fn to_little(self) -> Self {
                <$t>::to_le(self)
            }

            #[inline]
            fn from_little(self) -> Self {
                <$t>::from_le(self)
            }
        }
    )*};
}

impl_endian_int!(i16, u16, i32, u32);

impl Endian for f32 {
    #[inline]
    fn to_big(self) -> Self {
        f32::from_bits(self.to_bits().to_be())
    }

    #[inline]
    fn from_big(self) -> Self {
        f32::from_bits(u32::from_be(self.to_bits()))
    }

    #[inline]
    fn to_little(self) -> Self {
        f32::from_bits(self.to_bits().to_le())
    }

    #[inline]
    fn from_little(self) -> Self {
        f32::from_bits(u32::from_le(self.to_bits()))
    }
}

pub fn big_short(v: i16) -> i16 {
    v.from_big()
}

pub fn little_short(v: i16) -> i16 {
    v.from_little()
}

pub fn big_long(v: i32) -> i32 {
    v.from_big()
}

pub fn little_long(v: i32) -> i32 {
    v.from_little()
}

pub fn big_float(v: f32) -> f32 {
    v.from_big()
}

pub fn little_float(v: f32) -> f32 {
    v.from_little()
}
