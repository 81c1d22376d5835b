//! Ship rendering: triangle mesh attachment and the screen→world mirror.
//!
//! The simulation never touches `Transform`; [`sync_body_transform_system`]
//! is the single place where screen-space kinematic state becomes a Bevy
//! world-space transform.

use super::state::{KinematicBody, Player};
use crate::simulation::{heading_to_world_rotation, to_world, ScreenBounds};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

// ── Ship geometry ─────────────────────────────────────────────────────────────

/// Local-space vertices of the ship triangle, nose along local +Y.
///
/// Mirrors the classic arcade silhouette: a 35 px tall isosceles triangle
/// with a 30 px base.
fn ship_vertices() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 20.0),    // nose
        Vec2::new(-15.0, -15.0), // left base corner
        Vec2::new(15.0, -15.0),  // right base corner
    ]
}

/// Fan-triangulate a convex polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 40.0) + 0.5, (v.y / 40.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n as u32 - 1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

/// Attach the filled ship triangle to the player entity on spawn.
///
/// Runs only once per player entity (via [`Added<Player>`]).
pub fn attach_ship_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mesh_handle = meshes.add(filled_polygon_mesh(&ship_vertices()));
        let mat_handle = materials.add(ColorMaterial::from_color(Color::srgb(0.1, 0.85, 0.2)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(mat_handle)));
    }
}

// ── Screen → world mirror ─────────────────────────────────────────────────────

/// Mirror the kinematic state into the entity's render transform.
///
/// Position converts from screen space to world space against the live
/// bounds; the heading becomes a clockwise world rotation; the uniform
/// scale follows the body's (clamped) scale.
pub fn sync_body_transform_system(
    bounds: Res<ScreenBounds>,
    mut query: Query<(&KinematicBody, &mut Transform)>,
) {
    for (body, mut transform) in query.iter_mut() {
        transform.translation = to_world(body.position, &bounds).extend(1.0);
        transform.rotation = heading_to_world_rotation(body.heading_deg);
        transform.scale = Vec3::splat(body.scale());
    }
}
