//! Shader compilation helpers

use std::ffi::CString;
use std::ptr;

use gl::types::{GLenum, GLint, GLuint};

use crate::error::{DemoError, DemoResult};

fn stage_name(kind: GLenum) -> &'static str {
    match kind {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

pub fn compile_shader(source: &str, kind: GLenum) -> DemoResult<GLuint> {
    let c_source = CString::new(source).map_err(|e| DemoError::ShaderCompile {
        stage: stage_name(kind),
        log: e.to_string(),
    })?;

    unsafe {
        let shader = gl::CreateShader(kind);
        gl::ShaderSource(shader, 1, &c_source.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut success: GLint = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        if success == 0 {
            let mut len: GLint = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; usize::try_from(len).unwrap_or(0)];
            gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf.as_mut_ptr().cast());
            gl::DeleteShader(shader);
            return Err(DemoError::ShaderCompile {
                stage: stage_name(kind),
                log: String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string(),
            });
        }
        Ok(shader)
    }
}

/// Compile both stages and link them; the shader objects are released either way
pub fn build_program(vertex_source: &str, fragment_source: &str) -> DemoResult<GLuint> {
    let vertex = compile_shader(vertex_source, gl::VERTEX_SHADER)?;
    let fragment = match compile_shader(fragment_source, gl::FRAGMENT_SHADER) {
        Ok(fragment) => fragment,
        Err(e) => {
            unsafe { gl::DeleteShader(vertex) };
            return Err(e);
        }
    };

    unsafe {
        let program = gl::CreateProgram();
        gl::AttachShader(program, vertex);
        gl::AttachShader(program, fragment);
        gl::LinkProgram(program);
        gl::DeleteShader(vertex);
        gl::DeleteShader(fragment);

        let mut success: GLint = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        if success == 0 {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; usize::try_from(len).unwrap_or(0)];
            gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr().cast());
            gl::DeleteProgram(program);
            return Err(DemoError::ProgramLink(
                String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string(),
            ));
        }
        Ok(program)
    }
}

pub fn uniform_location(program: GLuint, name: &str) -> GLint {
    let Ok(c_name) = CString::new(name) else {
        return -1;
    };
    unsafe { gl::GetUniformLocation(program, c_name.as_ptr()) }
}
