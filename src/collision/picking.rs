use super::{CollisionFace, RayCache, RayCollider, RaySettings, SettingsError};
use crate::math::{Point, Real};
use crate::mesh::MeshInterface;
use crate::model::Model;
use crate::query::Ray;

/// How a triangle is culled when rendered.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// The triangle is double-sided.
    #[default]
    None,
    /// The triangle is hidden when its vertices appear clockwise from the view point, i.e.
    /// when the view point is behind it.
    Clockwise,
    /// The triangle is hidden when its vertices appear counter-clockwise from the view point.
    CounterClockwise,
}

/// Finds the closest triangle of `model` under the mouse, for editors and games.
///
/// Returns the closest triangle stabbed by `ray` at a distance in `(min_dist, max_dist]` that
/// is visible from `view_point` according to its cull mode. Hits closer than `min_dist`
/// typically belong to triangles in front of the camera near plane, which the user cannot
/// see.
///
/// The ray and the view point are expressed in the local frame of the model.
pub fn picking<M: MeshInterface + ?Sized>(
    ray: &Ray,
    model: &Model,
    mesh: &M,
    min_dist: Real,
    max_dist: Real,
    view_point: &Point<Real>,
    mut cull_mode: impl FnMut(u32) -> CullMode,
) -> Result<Option<CollisionFace>, SettingsError> {
    // Double-sided triangles need every hit, so culling happens here instead.
    let collider = RayCollider::new(
        RaySettings::default()
            .with_culling(false)
            .with_max_dist(max_dist),
    )?;
    let mut closest: Option<CollisionFace> = None;

    let _ = collider.collide_with_callback(
        &mut RayCache::default(),
        ray,
        model,
        mesh,
        |hit| {
            if closest.is_some_and(|closest| hit.distance >= closest.distance)
                || hit.distance <= min_dist
            {
                return;
            }

            let visible = match cull_mode(hit.face_id) {
                CullMode::None => true,
                mode => {
                    let backface = mesh.triangle(hit.face_id).is_backface(view_point);
                    match mode {
                        CullMode::Clockwise => !backface,
                        _ => backface,
                    }
                }
            };

            if visible {
                closest = Some(*hit);
            }
        },
    );

    Ok(closest)
}
