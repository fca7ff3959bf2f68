//! Light Tree Importance

use super::*;
use crate::geometry::*;
use crate::math::*;

/// Upper limit of any importance. Sums of up to 2^32 importances stay finite.
pub const MAX_IMPORTANCE: Float = hexf32!("0x1.0p96");

/// Returns the largest angle between the direction from `p` towards the
/// centroid of a bounding box and the direction from `p` towards any of the
/// box corners. This bounds the angle to any point inside the box.
///
/// * `bbox`              - The bounding box.
/// * `p`                 - The shading point.
/// * `point_to_centroid` - Unit direction from `p` to the box centroid.
pub fn max_subtended_half_angle(bbox: &Bounds3f, p: &Point3f, point_to_centroid: &Vector3f) -> Float {
    bbox.corners().iter().fold(0.0, |theta_u, corner| {
        let point_to_corner = *corner - *p;
        if point_to_corner.length_squared() == 0.0 {
            // `p` sits on a corner; every direction into the box is possible.
            return PI;
        }
        let cos_theta_u = point_to_centroid.dot(&point_to_corner.normalize());
        max(fast_acos(cos_theta_u), theta_u)
    })
}

/// Returns an upper bound estimate of the light a cluster of emitters can
/// deliver to a shading point. The estimate is 0 when no emitter in the
/// cluster can face the shading point.
///
/// * `p`      - The shading point.
/// * `n`      - The shading normal.
/// * `bounds` - Spatial and directional bounds of the cluster.
pub fn node_importance(p: &Point3f, n: &Normal3f, bounds: &LightBounds) -> Float {
    let bbox = bounds.bounds();
    let centroid = bbox.centroid();
    let to_centroid = centroid - *p;

    // Points close to or inside a large cluster use half the cluster radius
    // as their distance.
    let distance_squared = max(
        to_centroid.length_squared(),
        0.25 * (bounds.bounding_box_max - centroid).length_squared(),
    );
    if distance_squared == 0.0 {
        // A point emitter located at the shading point.
        return 0.0;
    }
    if to_centroid.length_squared() == 0.0 {
        // Shading point at the centroid of the cluster; no direction to bound.
        return min(bounds.energy / distance_squared, MAX_IMPORTANCE);
    }
    let point_to_centroid = to_centroid.normalize();

    let theta = fast_acos(bounds.bounding_cone_axis.dot(&-point_to_centroid));
    let theta_i = fast_acos(point_to_centroid.dot(n));
    let theta_u = max_subtended_half_angle(&bbox, p, &point_to_centroid);

    // Avoid using cosine until needed.
    let theta_prime = max(theta - bounds.theta_o - theta_u, 0.0);
    if theta_prime >= bounds.theta_e {
        return 0.0;
    }
    let cos_theta_prime = max(cos(theta_prime), 0.0);

    let cos_theta_i_prime = if theta_i - theta_u > 0.0 {
        cos(theta_i - theta_u).abs()
    } else {
        1.0
    };

    // Placeholder for a bound on the surface albedo.
    let f_a = 1.0;

    min(
        f_a * cos_theta_i_prime * bounds.energy / distance_squared * cos_theta_prime,
        MAX_IMPORTANCE,
    )
}

/// Returns the importance of a light tree node.
///
/// * `p`    - The shading point.
/// * `n`    - The shading normal.
/// * `node` - The node.
#[inline]
pub fn cluster_importance(p: &Point3f, n: &Normal3f, node: &LightTreeNode) -> Float {
    node_importance(p, n, &node.bounds)
}

/// Returns the importance of a single emitter.
///
/// * `p`       - The shading point.
/// * `n`       - The shading normal.
/// * `emitter` - The emitter.
#[inline]
pub fn emitter_importance(p: &Point3f, n: &Normal3f, emitter: &LightTreeEmitter) -> Float {
    node_importance(p, n, &emitter.bounds)
}

/// Returns the importance of a distant light, which is its energy alone
/// (capped at `MAX_IMPORTANCE`).
///
/// * `light` - The distant light.
#[inline]
pub fn distant_light_importance(light: &DistantLightEmitter) -> Float {
    min(light.energy, MAX_IMPORTANCE)
}
