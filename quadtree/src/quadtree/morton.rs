//! Z-order (Morton) codes for the breadth-first node layout.
//!
//! Within a level, a node's rank is the Morton code of its grid coordinate:
//! x occupies the even bits and z the odd bits. Appending a quadrant `q`
//! (`code * 4 + q`) therefore moves to the child whose x-bit is `q & 1` and
//! whose z-bit is `q >> 1`.

/// Spreads the low 16 bits of `v` into the even bits of the result.
#[inline(always)]
fn spread(mut v: u32) -> u32 {
    v &= 0x0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    v = (v | (v << 1)) & 0x5555_5555;
    v
}

/// Inverse of `spread`: gathers the even bits of `v` into the low 16 bits.
#[inline(always)]
fn compact(mut v: u32) -> u32 {
    v &= 0x5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333;
    v = (v | (v >> 2)) & 0x0F0F_0F0F;
    v = (v | (v >> 4)) & 0x00FF_00FF;
    v = (v | (v >> 8)) & 0x0000_FFFF;
    v
}

#[inline(always)]
pub(crate) fn encode(x: u32, z: u32) -> u32 {
    spread(x) | (spread(z) << 1)
}

#[inline(always)]
pub(crate) fn decode(code: u32) -> (u32, u32) {
    (compact(code), compact(code >> 1))
}
