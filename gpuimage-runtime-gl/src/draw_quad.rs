use crate::error::{FilterChainError, Result};
use glow::HasContext;

pub(crate) const POSITION_LOCATION: u32 = 0;
pub(crate) const TEXCOORD_LOCATION: u32 = 1;

/// Streams the per-draw vertex and texture coordinates of a filter.
pub(crate) struct DrawQuad {
    geometry: glow::Buffer,
    texture: glow::Buffer,
    // GLES2 has no vertex array objects.
    vao: Option<glow::VertexArray>,
}

impl DrawQuad {
    pub fn new(gl: &glow::Context, vertex_arrays: bool) -> Result<DrawQuad> {
        unsafe {
            let geometry = gl.create_buffer().map_err(FilterChainError::GlError)?;
            let texture = match gl.create_buffer() {
                Ok(texture) => texture,
                Err(error) => {
                    gl.delete_buffer(geometry);
                    return Err(FilterChainError::GlError(error));
                }
            };
            let vao = if vertex_arrays {
                match gl.create_vertex_array() {
                    Ok(vao) => Some(vao),
                    Err(error) => {
                        gl.delete_buffer(geometry);
                        gl.delete_buffer(texture);
                        return Err(FilterChainError::GlError(error));
                    }
                }
            } else {
                None
            };

            Ok(DrawQuad {
                geometry,
                texture,
                vao,
            })
        }
    }

    pub fn bind_vertices(&self, gl: &glow::Context, geometry: &[f32], texture: &[f32]) {
        unsafe {
            if let Some(vao) = self.vao {
                gl.bind_vertex_array(Some(vao));
            }
        }
        Self::upload(gl, self.geometry, POSITION_LOCATION, geometry);
        Self::upload(gl, self.texture, TEXCOORD_LOCATION, texture);
    }

    fn upload(gl: &glow::Context, buffer: glow::Buffer, location: u32, data: &[f32]) {
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STREAM_DRAW,
            );
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, 0, 0);
        }
    }

    pub fn unbind_vertices(&self, gl: &glow::Context) {
        unsafe {
            gl.disable_vertex_attrib_array(POSITION_LOCATION);
            gl.disable_vertex_attrib_array(TEXCOORD_LOCATION);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            if self.vao.is_some() {
                gl.bind_vertex_array(None);
            }
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.geometry);
            gl.delete_buffer(self.texture);
            if let Some(vao) = self.vao {
                gl.delete_vertex_array(vao);
            }
        }
    }
}
