//! Composites the software text overlay over the 3D scene

use gl::types::{GLint, GLsizei, GLuint};
use simple_draw_text::render::SoftwareSurface;

use crate::error::DemoResult;
use crate::gl_util::{build_program, uniform_location};

// Fullscreen triangle generated from gl_VertexID
const VERTEX_SHADER: &str = r"
#version 330 core
out vec2 v_uv;

void main() {
    vec2 corner = vec2(float((gl_VertexID << 1) & 2), float(gl_VertexID & 2));
    v_uv = corner;
    gl_Position = vec4(corner * 2.0 - 1.0, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"
#version 330 core
in vec2 v_uv;
out vec4 frag_color;

uniform sampler2D u_overlay;

void main() {
    frag_color = texture(u_overlay, v_uv);
}
";

pub struct OverlayPass {
    program: GLuint,
    vao: GLuint,
    texture: GLuint,
    texture_size: (u32, u32),
}

impl OverlayPass {
    pub fn new() -> DemoResult<Self> {
        let program = build_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let sampler_location = uniform_location(program, "u_overlay");

        let (mut vao, mut texture) = (0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenTextures(1, &mut texture);
            gl::BindTexture(gl::TEXTURE_2D, texture);
            let nearest = GLint::try_from(gl::NEAREST).unwrap_or(0);
            let clamp = GLint::try_from(gl::CLAMP_TO_EDGE).unwrap_or(0);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, nearest);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, nearest);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, clamp);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, clamp);
            gl::BindTexture(gl::TEXTURE_2D, 0);

            gl::UseProgram(program);
            gl::Uniform1i(sampler_location, 0);
            gl::UseProgram(0);
        }

        Ok(Self {
            program,
            vao,
            texture,
            texture_size: (0, 0),
        })
    }

    /// Upload the surface and blend it over whatever is in the framebuffer
    pub fn draw(&mut self, surface: &SoftwareSurface) {
        let size = (surface.width(), surface.height());
        let width = GLsizei::try_from(size.0).unwrap_or(0);
        let height = GLsizei::try_from(size.1).unwrap_or(0);
        if width == 0 || height == 0 {
            return;
        }

        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, self.texture);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            if size == self.texture_size {
                gl::TexSubImage2D(
                    gl::TEXTURE_2D,
                    0,
                    0,
                    0,
                    width,
                    height,
                    gl::RGBA,
                    gl::UNSIGNED_BYTE,
                    surface.as_bytes().as_ptr().cast(),
                );
            } else {
                gl::TexImage2D(
                    gl::TEXTURE_2D,
                    0,
                    GLint::try_from(gl::RGBA8).unwrap_or(0),
                    width,
                    height,
                    0,
                    gl::RGBA,
                    gl::UNSIGNED_BYTE,
                    surface.as_bytes().as_ptr().cast(),
                );
                self.texture_size = size;
                log::debug!("Overlay texture reallocated at {}x{}", size.0, size.1);
            }

            gl::Disable(gl::DEPTH_TEST);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::UseProgram(self.program);
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            gl::BindVertexArray(0);
            gl::Disable(gl::BLEND);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }
    }
}

impl Drop for OverlayPass {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.texture);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }
    }
}
