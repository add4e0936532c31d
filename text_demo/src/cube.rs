//! Rotating cube with one flat color per face

use std::mem::{offset_of, size_of};
use std::ptr;

use bytemuck::{Pod, Zeroable};
use gl::types::{GLint, GLsizei, GLsizeiptr, GLuint};
use simple_draw_text::foundation::math::Mat4;

use crate::error::DemoResult;
use crate::gl_util::{build_program, uniform_location};

const VERTEX_SHADER: &str = r"
#version 330 core
layout (location = 0) in vec3 a_position;
layout (location = 1) in vec3 a_color;

out vec3 v_color;

uniform mat4 u_mvp;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
";

const FRAGMENT_SHADER: &str = r"
#version 330 core
in vec3 v_color;
out vec4 frag_color;

void main() {
    frag_color = vec4(v_color, 1.0);
}
";

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct CubeVertex {
    position: [f32; 3],
    color: [f32; 3],
}

/// Corner positions, four per face, wound around each face
const FACES: [[[f32; 3]; 4]; 6] = [
    [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]],
    [[1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0]],
    [[1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]],
    [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
    [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
];

const FACE_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
];

fn build_mesh() -> (Vec<CubeVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (corners, color) in FACES.iter().zip(FACE_COLORS) {
        let base = u32::try_from(vertices.len()).unwrap_or(0);
        vertices.extend(corners.iter().map(|&position| CubeVertex { position, color }));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

pub struct Cube {
    program: GLuint,
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    index_count: GLsizei,
    mvp_location: GLint,
}

impl Cube {
    pub fn new() -> DemoResult<Self> {
        let program = build_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let mvp_location = uniform_location(program, "u_mvp");
        let (vertices, indices) = build_mesh();
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&indices);

        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ebo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                GLsizeiptr::try_from(vertex_bytes.len()).unwrap_or(0),
                vertex_bytes.as_ptr().cast(),
                gl::STATIC_DRAW,
            );
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                GLsizeiptr::try_from(index_bytes.len()).unwrap_or(0),
                index_bytes.as_ptr().cast(),
                gl::STATIC_DRAW,
            );

            let stride = GLsizei::try_from(size_of::<CubeVertex>()).unwrap_or(0);
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, ptr::null());
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(CubeVertex, color) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            gl::BindVertexArray(0);
        }

        log::debug!("Cube uploaded: {} vertices, {} indices", vertices.len(), indices.len());

        Ok(Self {
            program,
            vao,
            vbo,
            ebo,
            index_count: GLsizei::try_from(indices.len()).unwrap_or(0),
            mvp_location,
        })
    }

    pub fn draw(&self, mvp: &Mat4) {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::UseProgram(self.program);
            gl::UniformMatrix4fv(self.mvp_location, 1, gl::FALSE, mvp.as_ptr());
            gl::BindVertexArray(self.vao);
            gl::DrawElements(gl::TRIANGLES, self.index_count, gl::UNSIGNED_INT, ptr::null());
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Cube {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ebo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }
    }
}
