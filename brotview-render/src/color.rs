use brotview_core::Membership;

/// Colour of points that stayed bounded: opaque black.
pub const INTERIOR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Colour of points that escaped: opaque white.
pub const ESCAPED_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Two-colour mapping; escape counts are not shown.
#[inline]
pub fn membership_color(membership: Membership) -> [u8; 4] {
    match membership {
        Membership::Interior => INTERIOR_COLOR,
        Membership::Escaped => ESCAPED_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_black_escaped_is_white() {
        assert_eq!(membership_color(Membership::Interior), [0, 0, 0, 255]);
        assert_eq!(membership_color(Membership::Escaped), [255, 255, 255, 255]);
    }
}
