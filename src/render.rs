use eframe::{
	egui_glow,
	glow::{self, Buffer, Context, HasContext, Program, Texture, VertexArray},
};
use nalgebra_glm as glm;

use crate::{
	animator::EnvironmentCapture,
	app::FjordApp,
	camera::OrbitCamera,
	error::RenderError,
	geometry::{Mesh, Transform, Vertex},
	scene::{Material, Scene},
	texture::{self, TextureImage},
	uniform::{FrameUniforms, SkyUniforms},
};

/// Pointer input collected over the scene during one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewInput {
	pub drag: egui::Vec2,
	pub scroll: f32,
}

impl FjordApp {
	pub fn paint(&mut self, ui: &mut egui::Ui, uniforms: FrameUniforms, text_focused: bool) {
		let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());

		let mut input = ViewInput::default();
		if !text_focused {
			input.drag = response.drag_delta();
			if response.hovered() {
				input.scroll = ui.input(|i| i.smooth_scroll_delta.y);
			}
		}

		let scr_size = rect.size();
		let renderer = self.renderer.clone();

		let callback = egui::PaintCallback {
			rect,
			callback: std::sync::Arc::new(egui_glow::CallbackFn::new(
				move |_, painter| {
					let mut renderer = renderer.lock();
					let gl = painter.gl();

					renderer.camera.resize([scr_size.x, scr_size.y]);
					renderer.camera.apply(input);
					renderer.paint(gl, &uniforms);
				},
			)),
		};
		ui.painter().add(callback);
	}
}

impl OrbitCamera {
	fn apply(&mut self, input: ViewInput) {
		if input.drag != egui::Vec2::ZERO {
			self.rotate(glm::vec2(input.drag.x, input.drag.y));
		}
		if input.scroll != 0.0 {
			self.zoom(input.scroll);
		}
	}
}

struct GpuMesh {
	verts: VertexArray,
	vbo: Buffer,
	ebo: Buffer,
	index_count: i32,
}

struct GpuObject {
	mesh: GpuMesh,
	transform: Transform,
	albedo: Texture,
	uv_repeat: [f32; 2],
}

pub struct Renderer {
	sky_program: Program,
	land_program: Program,
	water_program: Program,
	capture_program: Program,

	sky: GpuMesh,
	sky_transform: Transform,
	water: GpuMesh,
	water_transform: Transform,
	objects: Vec<GpuObject>,

	water_normals: Texture,
	heather: Texture,
	timber: Texture,

	// environment map, rendered from the sky whenever the sun moves
	capture_fbo: glow::Framebuffer,
	capture_verts: VertexArray,
	environment: Texture,
	environment_captures: u64,

	pub camera: OrbitCamera,
}

const ENVIRONMENT_SIZE: [i32; 2] = [256, 128];

// {{{ shader compilation boilerplate
macro_rules! shader_sources {
	($vsh:literal, [$($fsh:literal),+ $(,)?]) => {
		&[
			(glow::VERTEX_SHADER, &[include_str!(concat!("shaders/", $vsh))][..]),
			(
				glow::FRAGMENT_SHADER,
				&[$(include_str!(concat!("shaders/", $fsh))),+][..],
			),
		]
	};
}

#[cfg(not(target_arch = "wasm32"))]
const SHADER_VERSION: &str = "#version 330";

#[cfg(target_arch = "wasm32")]
const SHADER_VERSION: &str = "#version 300 es";

fn stage_name(ty: u32) -> &'static str {
	match ty {
		glow::VERTEX_SHADER => "vertex",
		glow::FRAGMENT_SHADER => "fragment",
		_ => "unknown",
	}
}

unsafe fn compile_program(
	gl: &Context,
	srcs: &[(u32, &[&'static str])],
) -> Result<Program, RenderError> {
	let program = gl
		.create_program()
		.map_err(|e| RenderError::CreateObject("program", e))?;

	let mut shaders = Vec::with_capacity(srcs.len());
	let delete_all = |shaders: &[glow::Shader]| {
		for &shader in shaders {
			gl.detach_shader(program, shader);
			gl.delete_shader(shader);
		}
	};

	for (ty, parts) in srcs {
		let shader = match gl.create_shader(*ty) {
			Ok(shader) => shader,
			Err(e) => {
				delete_all(&shaders);
				gl.delete_program(program);
				return Err(RenderError::CreateObject("shader", e));
			}
		};
		let src = format!("{SHADER_VERSION}\nprecision highp float;\n{}", parts.join("\n"));
		gl.shader_source(shader, &src);
		gl.compile_shader(shader);
		if !gl.get_shader_compile_status(shader) {
			let log = gl.get_shader_info_log(shader);
			gl.delete_shader(shader);
			delete_all(&shaders);
			gl.delete_program(program);
			return Err(RenderError::ShaderCompile {
				stage: stage_name(*ty),
				log,
			});
		}
		gl.attach_shader(program, shader);
		shaders.push(shader);
	}

	gl.link_program(program);
	let linked = gl.get_program_link_status(program);
	let log = if linked {
		String::new()
	} else {
		gl.get_program_info_log(program)
	};
	delete_all(&shaders);

	if !linked {
		gl.delete_program(program);
		return Err(RenderError::ProgramLink { log });
	}

	Ok(program)
}
// }}}

// {{{ uploads
unsafe fn upload_mesh(gl: &Context, mesh: &Mesh) -> Result<GpuMesh, RenderError> {
	let verts = gl
		.create_vertex_array()
		.map_err(|e| RenderError::CreateObject("vertex array", e))?;
	let vbo = gl
		.create_buffer()
		.map_err(|e| RenderError::CreateObject("vertex buffer", e))?;
	let ebo = gl
		.create_buffer()
		.map_err(|e| RenderError::CreateObject("index buffer", e))?;

	gl.bind_vertex_array(Some(verts));

	gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
	gl.buffer_data_u8_slice(
		glow::ARRAY_BUFFER,
		bytemuck::cast_slice(&mesh.vertices),
		glow::STATIC_DRAW,
	);
	gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
	gl.buffer_data_u8_slice(
		glow::ELEMENT_ARRAY_BUFFER,
		bytemuck::cast_slice(&mesh.indices),
		glow::STATIC_DRAW,
	);

	for (location, size, offset) in [
		(0, 3, 0),
		(1, 3, Vertex::NORMAL_OFFSET),
		(2, 2, Vertex::UV_OFFSET),
	] {
		gl.enable_vertex_attrib_array(location);
		gl.vertex_attrib_pointer_f32(location, size, glow::FLOAT, false, Vertex::STRIDE, offset);
	}

	gl.bind_vertex_array(None);
	gl.bind_buffer(glow::ARRAY_BUFFER, None);

	Ok(GpuMesh {
		verts,
		vbo,
		ebo,
		index_count: mesh.indices.len() as i32,
	})
}

unsafe fn upload_texture(gl: &Context, image: &TextureImage) -> Result<Texture, RenderError> {
	let texture = gl
		.create_texture()
		.map_err(|e| RenderError::CreateObject("texture", e))?;

	gl.bind_texture(glow::TEXTURE_2D, Some(texture));
	gl.tex_image_2d(
		glow::TEXTURE_2D,
		0,
		glow::RGBA8 as i32,
		image.width as i32,
		image.height as i32,
		0,
		glow::RGBA,
		glow::UNSIGNED_BYTE,
		Some(image.rgba.as_slice()),
	);
	set_sampling(gl, glow::REPEAT, glow::REPEAT);
	gl.generate_mipmap(glow::TEXTURE_2D);
	gl.bind_texture(glow::TEXTURE_2D, None);

	Ok(texture)
}

unsafe fn set_sampling(gl: &Context, wrap_s: u32, wrap_t: u32) {
	gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap_s as i32);
	gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap_t as i32);
	gl.tex_parameter_i32(
		glow::TEXTURE_2D,
		glow::TEXTURE_MIN_FILTER,
		glow::LINEAR_MIPMAP_LINEAR as i32,
	);
	gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
}
// }}}

// {{{ uniform helpers
struct Uniforms<'a> {
	gl: &'a Context,
	program: Program,
}

impl Uniforms<'_> {
	unsafe fn location(&self, name: &str) -> Option<glow::UniformLocation> {
		self.gl.get_uniform_location(self.program, name)
	}

	unsafe fn f32(&self, name: &str, v: f32) {
		self.gl.uniform_1_f32(self.location(name).as_ref(), v);
	}

	unsafe fn vec2(&self, name: &str, v: [f32; 2]) {
		self.gl.uniform_2_f32(self.location(name).as_ref(), v[0], v[1]);
	}

	unsafe fn vec3(&self, name: &str, v: [f32; 3]) {
		self.gl.uniform_3_f32(self.location(name).as_ref(), v[0], v[1], v[2]);
	}

	// no transpose, nalgebra is already column-major
	unsafe fn mat3(&self, name: &str, m: &glm::Mat3) {
		self.gl
			.uniform_matrix_3_f32_slice(self.location(name).as_ref(), false, m.as_slice());
	}

	unsafe fn mat4(&self, name: &str, m: &glm::Mat4) {
		self.gl
			.uniform_matrix_4_f32_slice(self.location(name).as_ref(), false, m.as_slice());
	}

	unsafe fn texture(&self, name: &str, unit: u32, texture: Texture) {
		self.gl.active_texture(glow::TEXTURE0 + unit);
		self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
		self.gl.uniform_1_i32(self.location(name).as_ref(), unit as i32);
	}

	unsafe fn sky(&self, sky: &SkyUniforms) {
		self.vec3("sun_position", sky.sun_position);
		self.f32("turbidity", sky.turbidity);
		self.f32("rayleigh", sky.rayleigh);
		self.f32("mie_coefficient", sky.mie_coefficient);
		self.f32("mie_directional_g", sky.mie_directional_g);
	}

	unsafe fn transform(&self, transform: &Transform) {
		self.mat4("model", &transform.model());
		self.mat3("normal_matrix", &transform.normal_matrix());
	}
}
// }}}

impl Renderer {
	pub fn new(gl: &Context, scene: &Scene, camera: OrbitCamera) -> Result<Self, RenderError> {
		unsafe {
			log::info!("GL version: {}", gl.get_parameter_string(glow::VERSION));

			// {{{ create shader programs
			let sky_program = compile_program(
				gl,
				shader_sources!("mesh_vsh.glsl", ["sky.glsl", "sky_fsh.glsl"]),
			)?;
			let land_program = compile_program(
				gl,
				shader_sources!("mesh_vsh.glsl", ["environment.glsl", "land_fsh.glsl"]),
			)?;
			let water_program = compile_program(
				gl,
				shader_sources!("mesh_vsh.glsl", ["environment.glsl", "water_fsh.glsl"]),
			)?;
			let capture_program = compile_program(
				gl,
				shader_sources!(
					"fullscreen_vsh.glsl",
					["sky.glsl", "environment.glsl", "capture_fsh.glsl"]
				),
			)?;
			// }}}

			// {{{ textures
			let water_normals = upload_texture(gl, &texture::water_normals(256))?;
			let heather = upload_texture(gl, &texture::heather(64))?;
			let timber = upload_texture(gl, &texture::timber(128))?;
			// }}}

			// {{{ meshes
			let mut objects = Vec::with_capacity(scene.objects.len());
			for object in &scene.objects {
				log::debug!(
					"uploading {}: {} triangles",
					object.name,
					object.mesh.triangle_count()
				);
				objects.push(GpuObject {
					mesh: upload_mesh(gl, &object.mesh)?,
					transform: object.transform,
					albedo: match object.material {
						Material::Heather => heather,
						Material::Timber => timber,
					},
					uv_repeat: object.uv_repeat,
				});
			}
			let sky = upload_mesh(gl, &scene.sky.mesh)?;
			let water = upload_mesh(gl, &scene.water.mesh)?;
			log::info!(
				"uploaded {} objects, {} triangles",
				objects.len() + 2,
				scene.triangle_count()
			);
			// }}}

			// {{{ create capture FBO and environment texture
			let capture_fbo = gl
				.create_framebuffer()
				.map_err(|e| RenderError::CreateObject("framebuffer", e))?;
			let capture_verts = gl
				.create_vertex_array()
				.map_err(|e| RenderError::CreateObject("vertex array", e))?;
			let environment = gl
				.create_texture()
				.map_err(|e| RenderError::CreateObject("texture", e))?;

			gl.bind_texture(glow::TEXTURE_2D, Some(environment));
			gl.tex_image_2d(
				glow::TEXTURE_2D,
				0,
				glow::RGBA8 as i32,
				ENVIRONMENT_SIZE[0],
				ENVIRONMENT_SIZE[1],
				0,
				glow::RGBA,
				glow::UNSIGNED_BYTE,
				None,
			);
			set_sampling(gl, glow::REPEAT, glow::CLAMP_TO_EDGE);
			gl.generate_mipmap(glow::TEXTURE_2D);

			gl.bind_framebuffer(glow::FRAMEBUFFER, Some(capture_fbo));
			gl.framebuffer_texture_2d(
				glow::FRAMEBUFFER,
				glow::COLOR_ATTACHMENT0,
				glow::TEXTURE_2D,
				Some(environment),
				0,
			);
			let fbo_status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
			gl.bind_framebuffer(glow::FRAMEBUFFER, None);
			gl.bind_texture(glow::TEXTURE_2D, None);

			if fbo_status != glow::FRAMEBUFFER_COMPLETE {
				return Err(RenderError::IncompleteFramebuffer(fbo_status));
			}
			// }}}

			Ok(Self {
				sky_program,
				land_program,
				water_program,
				capture_program,

				sky,
				sky_transform: scene.sky.transform,
				water,
				water_transform: scene.water.transform,
				objects,

				water_normals,
				heather,
				timber,

				capture_fbo,
				capture_verts,
				environment,
				environment_captures: 0,

				camera,
			})
		}
	}

	pub fn destroy(&self, gl: &Context) {
		unsafe {
			for program in [
				self.sky_program,
				self.land_program,
				self.water_program,
				self.capture_program,
			] {
				gl.delete_program(program);
			}

			for mesh in [&self.sky, &self.water]
				.into_iter()
				.chain(self.objects.iter().map(|o| &o.mesh))
			{
				gl.delete_vertex_array(mesh.verts);
				gl.delete_buffer(mesh.vbo);
				gl.delete_buffer(mesh.ebo);
			}

			for texture in [self.water_normals, self.heather, self.timber, self.environment] {
				gl.delete_texture(texture);
			}

			gl.delete_framebuffer(self.capture_fbo);
			gl.delete_vertex_array(self.capture_verts);
		}
	}

	pub fn environment_captures(&self) -> u64 {
		self.environment_captures
	}

	// {{{ environment capture
	pub fn capture_environment(&mut self, gl: &Context, sky: &SkyUniforms) {
		unsafe {
			gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.capture_fbo));
			gl.viewport(0, 0, ENVIRONMENT_SIZE[0], ENVIRONMENT_SIZE[1]);
			gl.disable(glow::SCISSOR_TEST);
			gl.disable(glow::BLEND);
			gl.disable(glow::DEPTH_TEST);

			gl.use_program(Some(self.capture_program));
			Uniforms { gl, program: self.capture_program }.sky(sky);

			gl.bind_vertex_array(Some(self.capture_verts));
			gl.draw_arrays(glow::TRIANGLES, 0, 3);
			gl.bind_vertex_array(None);

			gl.bind_framebuffer(glow::FRAMEBUFFER, None);
			gl.use_program(None);

			gl.bind_texture(glow::TEXTURE_2D, Some(self.environment));
			gl.generate_mipmap(glow::TEXTURE_2D);
			gl.bind_texture(glow::TEXTURE_2D, None);
		}

		self.environment_captures += 1;
		log::debug!(
			"captured environment #{} for sun at {:?}",
			self.environment_captures,
			sky.sun_position
		);
	}
	// }}}

	// {{{ paint
	pub fn paint(&mut self, gl: &Context, uniforms: &FrameUniforms) {
		let view_proj = self.camera.view_proj();
		let eye: [f32; 3] = self.camera.pos().into();

		unsafe {
			gl.clear_depth_f32(1.0);
			gl.clear(glow::DEPTH_BUFFER_BIT);
			gl.enable(glow::DEPTH_TEST);
			gl.depth_func(glow::LEQUAL);
			gl.disable(glow::BLEND);

			// {{{ sky
			gl.depth_mask(false);
			gl.use_program(Some(self.sky_program));
			let u = Uniforms { gl, program: self.sky_program };
			u.mat4("view_proj", &view_proj);
			u.transform(&self.sky_transform);
			u.vec3("camera_pos", eye);
			u.sky(&uniforms.sky);
			draw(gl, &self.sky);
			gl.depth_mask(true);
			// }}}

			// {{{ land
			gl.use_program(Some(self.land_program));
			let u = Uniforms { gl, program: self.land_program };
			u.mat4("view_proj", &view_proj);
			u.vec3("sun_direction", uniforms.water.sun_direction);
			u.vec3("sun_color", uniforms.water.sun_color);
			u.texture("environment", 1, self.environment);
			for object in &self.objects {
				u.transform(&object.transform);
				u.vec2("uv_repeat", object.uv_repeat);
				u.texture("albedo_map", 0, object.albedo);
				draw(gl, &object.mesh);
			}
			// }}}

			// {{{ water
			gl.enable(glow::BLEND);
			gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
			gl.use_program(Some(self.water_program));
			let u = Uniforms { gl, program: self.water_program };
			let water = &uniforms.water;
			u.mat4("view_proj", &view_proj);
			u.transform(&self.water_transform);
			u.vec3("eye", eye);
			u.vec3("sun_direction", water.sun_direction);
			u.vec3("sun_color", water.sun_color);
			u.vec3("water_color", water.water_color);
			u.f32("distortion_scale", water.distortion_scale);
			u.f32("size", water.size);
			u.f32("alpha", water.alpha);
			u.f32("time", water.time);
			u.texture("normal_map", 0, self.water_normals);
			u.texture("environment", 1, self.environment);
			draw(gl, &self.water);
			// }}}

			// leave the state as egui expects it
			gl.disable(glow::DEPTH_TEST);
			gl.bind_vertex_array(None);
			gl.use_program(None);
			for unit in [1, 0] {
				gl.active_texture(glow::TEXTURE0 + unit);
				gl.bind_texture(glow::TEXTURE_2D, None);
			}
		}
	}
	// }}}
}

unsafe fn draw(gl: &Context, mesh: &GpuMesh) {
	gl.bind_vertex_array(Some(mesh.verts));
	gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_SHORT, 0);
}

/// Environment capture bound to a live GL context, handed to the animator.
pub struct GlEnvironment<'a> {
	pub renderer: &'a mut Renderer,
	pub gl: &'a Context,
}

impl EnvironmentCapture for GlEnvironment<'_> {
	fn capture_environment(&mut self, sky: &SkyUniforms) {
		self.renderer.capture_environment(self.gl, sky);
	}
}
