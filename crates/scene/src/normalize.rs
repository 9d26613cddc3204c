use foundation::bounds::Aabb3;
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::Transform;
use crate::model::Model;

/// Where the normalized bounding-box center lands.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    Centered,
    /// Fixed hand-tuned offset for a specific hero composition.
    Offset([f64; 3]),
}

impl Placement {
    pub fn anchor(&self) -> Vec3 {
        match self {
            Placement::Centered => Vec3::ZERO,
            Placement::Offset([x, y, z]) => Vec3::new(*x, *y, *z),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeError {
    EmptyBounds,
    DegenerateBounds { max_extent: f64 },
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::EmptyBounds => write!(f, "model has no geometry"),
            NormalizeError::DegenerateBounds { max_extent } => {
                write!(f, "model bounds are degenerate (longest edge {max_extent})")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Uniform scale mapping the longest edge of `bounds` onto `target_size`.
pub fn fit_scale(bounds: &Aabb3, target_size: f64) -> Result<f64, NormalizeError> {
    if bounds.is_empty() {
        return Err(NormalizeError::EmptyBounds);
    }
    let max_extent = bounds.max_extent();
    if !max_extent.is_finite() || max_extent <= f64::EPSILON {
        return Err(NormalizeError::DegenerateBounds { max_extent });
    }
    Ok(target_size / max_extent)
}

/// Placement that moves the bounds center onto the placement anchor and
/// scales the longest edge to `target_size`.
pub fn normalized_transform(
    bounds: &Aabb3,
    target_size: f64,
    placement: Placement,
) -> Result<Transform, NormalizeError> {
    let scale = fit_scale(bounds, target_size)?;
    let mut t = Transform::translate(placement.anchor());
    t.pivot = bounds.center();
    t.set_uniform_scale(scale);
    Ok(t)
}

/// Normalizes `model` in place. Returns the applied scale.
pub fn normalize_model(
    model: &mut Model,
    target_size: f64,
    placement: Placement,
) -> Result<f64, NormalizeError> {
    let bounds = model.local_bounds();
    let t = normalized_transform(&bounds, target_size, placement)?;
    tracing::debug!(
        size = ?bounds.size(),
        center = ?bounds.center(),
        scale = t.scale.x,
        "normalized model"
    );
    model.transform = t;
    Ok(t.scale.x)
}

#[cfg(test)]
mod tests {
    use super::{NormalizeError, Placement, fit_scale, normalize_model, normalized_transform};
    use crate::components::StandardMaterial;
    use crate::mesh::Mesh;
    use crate::model::{Model, ModelSource};
    use approx::assert_abs_diff_eq;
    use foundation::bounds::Aabb3;
    use foundation::math::Vec3;

    fn boxed(min: Vec3, max: Vec3) -> Aabb3 {
        Aabb3::new(min, max)
    }

    #[test]
    fn longest_edge_maps_to_target() {
        let b = boxed(Vec3::new(-1.0, 0.0, 3.0), Vec3::new(2.0, 10.0, 4.0));
        let s = fit_scale(&b, 2.0).unwrap();
        assert_abs_diff_eq!(b.max_extent() * s, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn center_maps_to_origin_when_centered() {
        let b = boxed(Vec3::new(4.0, 4.0, 4.0), Vec3::new(6.0, 8.0, 5.0));
        let t = normalized_transform(&b, 2.0, Placement::Centered).unwrap();
        let c = t.apply(b.center());
        assert_abs_diff_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn center_maps_to_offset() {
        let b = boxed(Vec3::new(-3.0, 0.0, -1.0), Vec3::new(1.0, 12.0, 1.0));
        let t = normalized_transform(&b, 6.0, Placement::Offset([-1.4, -5.9, 4.0])).unwrap();
        let c = t.apply(b.center());
        assert_abs_diff_eq!(c.x, -1.4, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, -5.9, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.scale.x, 0.5, epsilon = 1e-12);
        assert_eq!(t.scale.x, t.scale.z);
    }

    #[test]
    fn empty_and_flat_point_bounds_are_rejected() {
        assert_eq!(fit_scale(&Aabb3::empty(), 2.0), Err(NormalizeError::EmptyBounds));
        let point = boxed(Vec3::ONE, Vec3::ONE);
        assert!(matches!(
            fit_scale(&point, 2.0),
            Err(NormalizeError::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn normalize_model_sets_transform() {
        let mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
            None,
            vec![0, 1, 2],
            StandardMaterial::default(),
        );
        let mut model = Model::new(vec![mesh], ModelSource::Fallback);
        let s = normalize_model(&mut model, 2.0, Placement::Centered).unwrap();
        assert_abs_diff_eq!(s, 0.5, epsilon = 1e-12);
        assert_eq!(model.transform.pivot, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn placement_parses_from_json_shapes() {
        let p: Placement = serde_json::from_str("\"centered\"").unwrap();
        assert_eq!(p, Placement::Centered);
        let p: Placement = serde_json::from_str("{\"offset\":[-1.4,-5.9,4.0]}").unwrap();
        assert_eq!(p, Placement::Offset([-1.4, -5.9, 4.0]));
    }
}
