//! Triangle meshes for the scene's primitives.

use nalgebra_glm as glm;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
	pub pos: [f32; 3],
	pub normal: [f32; 3],
	pub uv: [f32; 2],
}

impl Vertex {
	pub const STRIDE: i32 = std::mem::size_of::<Self>() as i32;
	pub const NORMAL_OFFSET: i32 = 3 * 4;
	pub const UV_OFFSET: i32 = 6 * 4;
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
	pub vertices: Vec<Vertex>,
	pub indices: Vec<u16>,
}

impl Mesh {
	/// `width` along X, `height` along Y, facing +Z, centred on the origin.
	pub fn plane(width: f32, height: f32) -> Self {
		let (hw, hh) = (width / 2.0, height / 2.0);
		let n = [0.0, 0.0, 1.0];

		Self {
			vertices: vec![
				Vertex { pos: [-hw, -hh, 0.0], normal: n, uv: [0.0, 0.0] },
				Vertex { pos: [hw, -hh, 0.0], normal: n, uv: [1.0, 0.0] },
				Vertex { pos: [hw, hh, 0.0], normal: n, uv: [1.0, 1.0] },
				Vertex { pos: [-hw, hh, 0.0], normal: n, uv: [0.0, 1.0] },
			],
			indices: vec![0, 1, 2, 0, 2, 3],
		}
	}

	/// Axis aligned box centred on the origin, one quad per face so every
	/// face gets its own normal and full `0..1` UVs.
	pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
		let h = glm::vec3(width, height, depth) / 2.0;

		// (normal, u axis, v axis)
		let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
			([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
			([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
			([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
			([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
			([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
			([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
		];

		let mut mesh = Self::default();
		for (normal, u, v) in faces {
			let n: glm::Vec3 = normal.into();
			let u: glm::Vec3 = u.into();
			let v: glm::Vec3 = v.into();
			let centre = n.component_mul(&h);
			let du = u.component_mul(&h);
			let dv = v.component_mul(&h);

			let base = mesh.vertices.len() as u16;
			for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
				let p = centre + du * su + dv * sv;
				mesh.vertices.push(Vertex {
					pos: [p.x, p.y, p.z],
					normal,
					uv: [(su + 1.0) / 2.0, (sv + 1.0) / 2.0],
				});
			}
			mesh.indices
				.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
		}

		mesh
	}

	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}
}

/// Placement of a mesh in the world: rotation about X, uniform scale, then
/// translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	pub translation: glm::Vec3,
	pub rotation_x: f32,
	pub scale: f32,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			translation: glm::Vec3::zeros(),
			rotation_x: 0.0,
			scale: 1.0,
		}
	}
}

impl Transform {
	pub fn at(x: f32, y: f32, z: f32) -> Self {
		Self {
			translation: glm::vec3(x, y, z),
			..Default::default()
		}
	}

	pub fn rotated_x(self, angle: f32) -> Self {
		Self { rotation_x: angle, ..self }
	}

	pub fn scaled(self, scale: f32) -> Self {
		Self { scale, ..self }
	}

	fn rotation(&self) -> glm::Mat4 {
		glm::rotation(self.rotation_x, &glm::vec3(1.0, 0.0, 0.0))
	}

	pub fn model(&self) -> glm::Mat4 {
		glm::translation(&self.translation)
			* self.rotation()
			* glm::scaling(&glm::vec3(self.scale, self.scale, self.scale))
	}

	/// Normals only follow the rotation, scale is uniform.
	pub fn normal_matrix(&self) -> glm::Mat3 {
		glm::mat4_to_mat3(&self.rotation())
	}
}
