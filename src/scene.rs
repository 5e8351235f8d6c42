use std::f32::consts::{FRAC_PI_2, PI};

use crate::geometry::{Mesh, Transform};

/// Which texture a land mesh is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
	Heather,
	Timber,
}

#[derive(Clone, Debug)]
pub struct SceneObject {
	pub name: &'static str,
	pub mesh: Mesh,
	pub transform: Transform,
	pub material: Material,
	pub uv_repeat: [f32; 2],
}

#[derive(Clone, Debug)]
pub struct WaterSurface {
	pub mesh: Mesh,
	pub transform: Transform,
}

#[derive(Clone, Debug)]
pub struct SkyDome {
	pub mesh: Mesh,
	pub transform: Transform,
}

/// The static landscape: a fjord with a heather slope and three cabins on it.
#[derive(Clone, Debug)]
pub struct Scene {
	pub sky: SkyDome,
	pub water: WaterSurface,
	pub objects: Vec<SceneObject>,
}

pub const SKY_SCALE: f32 = 10_000.0;
const SLOPE_TILT: f32 = PI / 3.5;
const SLOPE_LENGTH: f32 = 25.0;

/// Height of the slope's centre, where the cabins stand.
pub fn ground_level() -> f32 {
	SLOPE_LENGTH / 2.0 * SLOPE_TILT.cos()
}

impl Default for Scene {
	fn default() -> Self {
		let ground = ground_level();

		let cabin = |name, size: [f32; 3], pos: [f32; 3], repeat| SceneObject {
			name,
			mesh: Mesh::cuboid(size[0], size[1], size[2]),
			transform: Transform::at(pos[0], pos[1], pos[2]),
			material: Material::Timber,
			uv_repeat: repeat,
		};

		Self {
			sky: SkyDome {
				mesh: Mesh::cuboid(1.0, 1.0, 1.0),
				transform: Transform::default().scaled(SKY_SCALE),
			},
			water: WaterSurface {
				mesh: Mesh::plane(2000.0, 1000.0),
				transform: Transform::at(0.0, 0.0, 500.0).rotated_x(-FRAC_PI_2),
			},
			objects: vec![
				SceneObject {
					name: "heather slope",
					mesh: Mesh::plane(2000.0, SLOPE_LENGTH),
					transform: Transform::at(0.0, ground, 0.0).rotated_x(-SLOPE_TILT),
					material: Material::Heather,
					uv_repeat: [1000.0, 12.5],
				},
				cabin("old cabin", [10.0, 3.0, 5.0], [0.0, ground, 0.0], [5.0, 1.0]),
				cabin("new cabin", [5.0, 3.5, 5.0], [7.5, ground + 0.25, 0.0], [2.5, 1.0]),
				cabin("sulking hut", [2.0, 3.0, 5.0], [11.0, ground, 0.0], [1.0, 1.0]),
			],
		}
	}
}

impl Scene {
	pub fn triangle_count(&self) -> usize {
		self.sky.mesh.triangle_count()
			+ self.water.mesh.triangle_count()
			+ self
				.objects
				.iter()
				.map(|o| o.mesh.triangle_count())
				.sum::<usize>()
	}
}

#[cfg(test)]
mod tests {
	use nalgebra_glm as glm;

	use super::*;

	impl Scene {
		fn object(&self, name: &str) -> Option<&SceneObject> {
			self.objects.iter().find(|o| o.name == name)
		}
	}

	/// World space up vector of a rotated plane.
	fn surface_normal(transform: &Transform) -> glm::Vec3 {
		transform.normal_matrix() * glm::vec3(0.0, 0.0, 1.0)
	}

	#[test]
	fn layout() {
		let scene = Scene::default();
		assert_eq!(scene.objects.len(), 4);
		assert_eq!(scene.water.transform.translation, glm::vec3(0.0, 0.0, 500.0));
		assert_eq!(scene.sky.transform.scale, SKY_SCALE);

		let ground = 12.5 * (PI / 3.5).cos();
		assert!((ground_level() - ground).abs() < 1e-6);

		let new_cabin = scene.object("new cabin").unwrap();
		assert_eq!(new_cabin.transform.translation, glm::vec3(7.5, ground + 0.25, 0.0));
		assert_eq!(new_cabin.uv_repeat, [2.5, 1.0]);

		let hut = scene.object("sulking hut").unwrap();
		assert_eq!(hut.transform.translation.x, 11.0);
		assert_eq!(hut.material, Material::Timber);
	}

	#[test]
	fn water_faces_up() {
		let scene = Scene::default();
		let n = surface_normal(&scene.water.transform);
		assert!((n.y - 1.0).abs() < 1e-6);
	}

	#[test]
	fn slope_faces_up_and_towards_water() {
		let scene = Scene::default();
		let slope = scene.object("heather slope").unwrap();
		let n = surface_normal(&slope.transform);
		assert!(n.y > 0.0);
		assert!(n.z > 0.0);
		assert!((glm::length(&n) - 1.0).abs() < 1e-6);
	}

	#[test]
	fn slope_bottom_meets_water() {
		let scene = Scene::default();
		let slope = scene.object("heather slope").unwrap();
		let bottom = slope.transform.model() * glm::vec4(0.0, -SLOPE_LENGTH / 2.0, 0.0, 1.0);
		assert!(bottom.y.abs() < 1e-4);
	}

	#[test]
	fn sky_encloses_far_water_edge() {
		let scene = Scene::default();
		let corner = scene.water.transform.model() * glm::vec4(1000.0, -500.0, 0.0, 1.0);
		assert!(corner.xyz().abs().max() < SKY_SCALE / 2.0);
	}

	#[test]
	fn triangle_count() {
		let scene = Scene::default();
		let uploaded = scene.sky.mesh.triangle_count()
			+ scene.water.mesh.triangle_count()
			+ scene.objects.iter().map(|o| o.mesh.triangle_count()).sum::<usize>();
		assert_eq!(scene.triangle_count(), uploaded);
		assert_eq!(scene.triangle_count(), 12 + 2 + 2 + 3 * 12);
	}
}
