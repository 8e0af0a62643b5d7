//! Reference cluster palette and RGBA layer derivation.
//!
//! The membership matrix is the engine's whole answer, but a front-end needs
//! something it can draw. The conventional rendering stacks one translucent
//! scatter layer per cluster: every layer colors all points with that
//! cluster's RGB and uses the point's membership degree as the alpha value,
//! so a point shared between two clusters shows as a blend of both colors.
//!
//! This module ships the palette and the layer derivation as a concrete
//! reference. It is a pure value transform over a finished
//! [`MembershipMatrix`]; it never touches the engine, and a front-end with
//! its own color scheme can ignore it entirely.

use alloc::vec::Vec;

use crate::membership::MembershipMatrix;

/// An RGBA color, components in [0.0, 1.0].
pub type Rgba = [f32; 4];

/// Sixteen visually distinct cluster colors, alpha 1.0.
///
/// Index order: blue, red, green, orange, dodger blue, deep pink, yellow,
/// magenta, purple, brown, turquoise, indian red, dark khaki, dark green,
/// powder blue, maroon.
pub const CLUSTER_COLORS: [Rgba; 16] = [
    [0.000, 0.000, 1.000, 1.0],
    [1.000, 0.000, 0.000, 1.0],
    [0.000, 1.000, 0.000, 1.0],
    [1.000, 0.647, 0.000, 1.0],
    [0.118, 0.565, 1.000, 1.0],
    [1.000, 0.078, 0.576, 1.0],
    [1.000, 1.000, 0.000, 1.0],
    [1.000, 0.000, 1.000, 1.0],
    [0.502, 0.000, 0.502, 1.0],
    [0.647, 0.165, 0.165, 1.0],
    [0.251, 0.878, 0.816, 1.0],
    [0.804, 0.361, 0.361, 1.0],
    [0.741, 0.718, 0.420, 1.0],
    [0.000, 0.392, 0.000, 1.0],
    [0.690, 0.878, 0.902, 1.0],
    [0.502, 0.000, 0.000, 1.0],
];

/// The palette color for a cluster index.
///
/// Indices beyond the palette wrap around instead of panicking, so any
/// cluster count renders (adjacent high clusters may share a color).
pub fn cluster_color(cluster: usize) -> Rgba {
    CLUSTER_COLORS[cluster % CLUSTER_COLORS.len()]
}

/// One RGBA scatter layer per cluster, alpha = membership degree.
///
/// `layers[j][i]` is the color of point `i` in cluster `j`'s layer: the
/// cluster's palette RGB with the point's membership as alpha. Drawing the
/// layers in order reproduces the alpha-blended fuzzy-cluster view.
pub fn membership_layers(memberships: &MembershipMatrix) -> Vec<Vec<Rgba>> {
    let mut layers = Vec::with_capacity(memberships.cluster_count());
    for j in 0..memberships.cluster_count() {
        let base = cluster_color(j);
        let mut layer = Vec::with_capacity(memberships.point_count());
        for i in 0..memberships.point_count() {
            layer.push([base[0], base[1], base[2], memberships.get(i, j) as f32]);
        }
        layers.push(layer);
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_palette_wraps_past_sixteen() {
        assert_eq!(cluster_color(0), CLUSTER_COLORS[0]);
        assert_eq!(cluster_color(15), CLUSTER_COLORS[15]);
        assert_eq!(cluster_color(16), CLUSTER_COLORS[0]);
        assert_eq!(cluster_color(35), CLUSTER_COLORS[3]);
    }

    #[test]
    fn test_layers_carry_membership_as_alpha() {
        let memberships = MembershipMatrix::from_rows(&[
            vec![0.75, 0.25],
            vec![0.25, 0.75],
            vec![0.4, 0.6],
        ])
        .unwrap();

        let layers = membership_layers(&memberships);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].len(), 3);

        // Layer 0 is blue with alphas from column 0.
        assert_eq!(layers[0][0], [0.0, 0.0, 1.0, 0.75]);
        assert_eq!(layers[0][1], [0.0, 0.0, 1.0, 0.25]);
        // Layer 1 is red with alphas from column 1.
        assert_eq!(layers[1][2], [1.0, 0.0, 0.0, 0.6]);
    }

    #[test]
    fn test_opaque_colors_in_palette() {
        for (i, color) in CLUSTER_COLORS.iter().enumerate() {
            assert_eq!(color[3], 1.0, "palette entry {} is not opaque", i);
        }
    }
}
