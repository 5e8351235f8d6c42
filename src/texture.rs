//! Procedurally generated textures for the water and the land.
//!
//! Every generator tiles seamlessly so the GPU can sample them with `REPEAT`
//! wrapping.

use std::f32::consts::TAU;

use nalgebra_glm as glm;
use noise::{NoiseFn, Perlin};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
	pub width: u32,
	pub height: u32,
	pub rgba: Vec<u8>,
}

impl TextureImage {
	fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [f32; 3]) -> Self {
		let mut rgba = Vec::with_capacity((width * height * 4) as usize);
		for y in 0..height {
			for x in 0..width {
				let [r, g, b] = f(x, y);
				rgba.extend_from_slice(&[to_u8(r), to_u8(g), to_u8(b), 255]);
			}
		}

		Self { width, height, rgba }
	}
}

fn to_u8(v: f32) -> u8 {
	(v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// {{{ water normals
const WAVE_COUNT: usize = 24;
const WAVE_SEED: u64 = 11;

/// Tangent space normal map (blue up) built from a sum of sine waves whose
/// wave vectors are whole numbers of periods across the tile.
pub fn water_normals(size: u32) -> TextureImage {
	let mut rng = StdRng::seed_from_u64(WAVE_SEED);
	let waves: Vec<(f32, f32, f32, f32)> = (0..WAVE_COUNT)
		.map(|_| {
			let kx: i32 = rng.gen_range(-8..8);
			let ky: i32 = rng.gen_range(-8..8);
			let (kx, ky) = if kx == 0 && ky == 0 { (1, 1) } else { (kx, ky) };
			let len = ((kx * kx + ky * ky) as f32).sqrt();
			let amplitude = 1.0 / (len * len);
			let phase = rng.gen_range(0.0..TAU);
			(kx as f32, ky as f32, amplitude, phase)
		})
		.collect();

	let n = size as f32;
	let strength = 0.35 * n / TAU;

	TextureImage::from_fn(size, size, |x, y| {
		let (u, v) = (x as f32 / n, y as f32 / n);
		let (mut dx, mut dy) = (0.0, 0.0);
		for &(kx, ky, a, phase) in &waves {
			let c = (TAU * (kx * u + ky * v) + phase).cos() * a * TAU / n;
			dx += c * kx;
			dy += c * ky;
		}

		let normal = glm::normalize(&glm::vec3(-dx * strength, -dy * strength, 1.0));
		[normal.x * 0.5 + 0.5, normal.y * 0.5 + 0.5, normal.z * 0.5 + 0.5]
	})
}
// }}}

// {{{ land
const HEATHER_CELLS: f64 = 8.0;

/// Perlin noise over the unit square, wrapping at both edges. The square is
/// mapped onto a torus in 4D so opposite edges sample the same points.
fn tiled_noise(perlin: &Perlin, u: f64, v: f64, cells: f64) -> f64 {
	let r = cells / std::f64::consts::TAU;
	let (su, cu) = (u * std::f64::consts::TAU).sin_cos();
	let (sv, cv) = (v * std::f64::consts::TAU).sin_cos();
	perlin.get([cu * r, su * r, cv * r, sv * r])
}

/// Purple heather with patches of green.
pub fn heather(size: u32) -> TextureImage {
	let purple = glm::vec3(0.42, 0.24, 0.40);
	let green = glm::vec3(0.22, 0.32, 0.14);
	let perlin = Perlin::new(3);
	let mut rng = StdRng::seed_from_u64(5);

	TextureImage::from_fn(size, size, |x, y| {
		let (u, v) = (x as f64 / size as f64, y as f64 / size as f64);
		let patch = (tiled_noise(&perlin, u, v, HEATHER_CELLS) * 0.5 + 0.5) as f32;
		let speckle: f32 = rng.gen();

		let c = glm::lerp(&green, &purple, (patch * 1.4 - 0.2).clamp(0.0, 1.0))
			* (0.75 + 0.5 * speckle);
		[c.x, c.y, c.z]
	})
}

const PLANKS: u32 = 4;

/// Weathered vertical timber planks, dark seams between boards.
pub fn timber(size: u32) -> TextureImage {
	let wood = glm::vec3(0.36, 0.22, 0.12);
	let plank_width = (size / PLANKS).max(1);

	let mut rng = StdRng::seed_from_u64(17);
	let boards: Vec<(f32, f32)> = (0..PLANKS)
		.map(|_| (rng.gen_range(0.8..1.1), rng.gen_range(0.0..TAU)))
		.collect();

	TextureImage::from_fn(size, size, |x, y| {
		let in_plank = x % plank_width;
		if in_plank == 0 {
			return [0.08, 0.05, 0.03];
		}

		let (shade, phase) = boards[(x / plank_width % PLANKS) as usize];
		let grain = (y as f32 / size as f32 * TAU * 6.0
			+ phase
			+ (in_plank as f32 * 0.9).sin())
		.sin();
		let c = wood * shade * (0.9 + 0.1 * grain);
		[c.x, c.y, c.z]
	})
}
// }}}

#[cfg(test)]
mod tests {
	use super::*;

	impl TextureImage {
		fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
			let i = ((y * self.width + x) * 4) as usize;
			[self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
		}
	}

	fn decode(p: [u8; 4]) -> glm::Vec3 {
		glm::vec3(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0 * 2.0
			- glm::vec3(1.0, 1.0, 1.0)
	}

	#[test]
	fn dimensions() {
		for image in [water_normals(64), heather(32), timber(64)] {
			assert_eq!(image.rgba.len(), (image.width * image.height * 4) as usize);
			assert!(image.rgba.chunks(4).all(|p| p[3] == 255));
		}
	}

	#[test]
	fn deterministic() {
		assert_eq!(water_normals(32), water_normals(32));
		assert_eq!(heather(32), heather(32));
		assert_eq!(timber(32), timber(32));
	}

	#[test]
	fn water_normals_point_up() {
		let image = water_normals(64);
		for y in 0..image.height {
			for x in 0..image.width {
				let n = decode(image.pixel(x, y));
				assert!(n.z > 0.0);
				assert!((glm::length(&n) - 1.0).abs() < 0.02);
			}
		}
	}

	#[test]
	fn water_normals_are_not_flat() {
		let image = water_normals(64);
		let tilted = image
			.rgba
			.chunks(4)
			.filter(|p| p[0].abs_diff(128) > 8 || p[1].abs_diff(128) > 8)
			.count();
		assert!(tilted > 64 * 64 / 4);
	}

	#[test]
	fn noise_tiles() {
		let perlin = Perlin::new(3);
		for i in 0..20 {
			let v = i as f64 / 20.0;
			let a = tiled_noise(&perlin, 0.0, v, HEATHER_CELLS);
			let b = tiled_noise(&perlin, 1.0, v, HEATHER_CELLS);
			let c = tiled_noise(&perlin, v, 0.0, HEATHER_CELLS);
			let d = tiled_noise(&perlin, v, 1.0, HEATHER_CELLS);
			assert!((a - b).abs() < 1e-6);
			assert!((c - d).abs() < 1e-6);
		}
	}

	#[test]
	fn heather_varies() {
		let image = heather(32);
		let first = image.pixel(0, 0);
		assert!(image.rgba.chunks(4).any(|p| p != first));
	}

	#[test]
	fn timber_has_seams() {
		let image = timber(64);
		let seam = image.pixel(0, 10);
		let board = image.pixel(5, 10);
		assert!(seam[0] < board[0]);
		assert_eq!(image.pixel(16, 3), seam);
	}

	#[test]
	fn tiny_timber() {
		for size in [1, 2, 3, 6] {
			let image = timber(size);
			assert_eq!(image.rgba.len(), (size * size * 4) as usize);
		}
	}
}
