#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	#[error("creating {0} failed: {1}")]
	CreateObject(&'static str, String),
	#[error("compiling {stage} shader failed: {log}")]
	ShaderCompile { stage: &'static str, log: String },
	#[error("linking shader program failed: {log}")]
	ProgramLink { log: String },
	#[error("framebuffer incomplete: {0:#x}")]
	IncompleteFramebuffer(u32),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages() {
		let err = RenderError::ShaderCompile {
			stage: "fragment",
			log: "0:12: syntax error".to_string(),
		};
		assert_eq!(err.to_string(), "compiling fragment shader failed: 0:12: syntax error");
		assert_eq!(
			RenderError::IncompleteFramebuffer(0x8cd6).to_string(),
			"framebuffer incomplete: 0x8cd6"
		);
	}
}
