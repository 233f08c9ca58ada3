//! Version-dependent parts of the OpenGL feature set.
use glow::HasContext;
use gpuimage_common::{ImageFormat, WrapMode};
use std::borrow::Cow;

/// The GLSL dialect filter shaders are compiled as.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlslVersion {
    /// GLSL ES 1.00, OpenGL ES 2.
    Es100,
    /// GLSL ES 3.00, OpenGL ES 3.
    Es300,
    /// GLSL 1.10, OpenGL 2.x and 3.0-3.1.
    V110,
    /// GLSL 1.50, OpenGL 3.2.
    V150,
    /// GLSL 3.30 core, OpenGL 3.3+.
    V330,
}

impl GlslVersion {
    /// The `#version` directive for this dialect.
    pub fn header(&self) -> &'static str {
        match self {
            GlslVersion::Es100 => "#version 100\n",
            GlslVersion::Es300 => "#version 300 es\n",
            GlslVersion::V110 => "#version 110\n",
            GlslVersion::V150 => "#version 150\n",
            GlslVersion::V330 => "#version 330 core\n",
        }
    }

    /// Definitions letting GLSL ES 1.00 style sources compile in this dialect.
    fn prelude(&self, stage: u32) -> &'static str {
        let fragment = stage == glow::FRAGMENT_SHADER;
        match self {
            GlslVersion::Es100 if fragment => "precision mediump float;\n",
            GlslVersion::Es100 => "",
            GlslVersion::V110 => "#define highp\n#define mediump\n#define lowp\n",
            GlslVersion::Es300 if fragment => {
                "precision mediump float;\n\
                 #define varying in\n\
                 #define texture2D texture\n\
                 out vec4 fragColor;\n"
            }
            GlslVersion::V150 | GlslVersion::V330 if fragment => {
                "#define varying in\n\
                 #define texture2D texture\n\
                 out vec4 fragColor;\n"
            }
            GlslVersion::Es300 | GlslVersion::V150 | GlslVersion::V330 => {
                "#define attribute in\n\
                 #define varying out\n\
                 #define texture2D texture\n"
            }
        }
    }

    fn has_frag_color(&self) -> bool {
        matches!(self, GlslVersion::Es100 | GlslVersion::V110)
    }
}

/// What the current context supports, read once when a [`GLContext`](crate::GLContext) is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GLFeatures {
    /// Whether the context is OpenGL ES.
    pub is_embedded: bool,
    /// Immutable texture storage (`glTexStorage2D`).
    pub texture_storage: bool,
    /// Vertex array objects.
    pub vertex_arrays: bool,
    /// The `CLAMP_TO_BORDER` wrap mode.
    pub clamp_to_border: bool,
    /// The dialect filter shaders are compiled as.
    pub glsl: GlslVersion,
}

impl GLFeatures {
    /// Query the features of a loaded context.
    pub fn detect(gl: &glow::Context) -> GLFeatures {
        let version = gl.version();
        let extensions = gl.supported_extensions();
        let features = GLFeatures::from_version(
            version.major,
            version.minor,
            version.is_embedded,
            |name| extensions.contains(name),
        );
        log::debug!(
            "OpenGL {}{}.{}: {features:?}",
            if version.is_embedded { "ES " } else { "" },
            version.major,
            version.minor
        );
        features
    }

    /// The features of the given version with the given extensions.
    pub fn from_version(
        major: u32,
        minor: u32,
        is_embedded: bool,
        has_extension: impl Fn(&str) -> bool,
    ) -> GLFeatures {
        let version = (major, minor);
        if is_embedded {
            GLFeatures {
                is_embedded,
                texture_storage: version >= (3, 0),
                vertex_arrays: version >= (3, 0),
                clamp_to_border: version >= (3, 2)
                    || has_extension("GL_EXT_texture_border_clamp")
                    || has_extension("GL_OES_texture_border_clamp"),
                glsl: if version >= (3, 0) {
                    GlslVersion::Es300
                } else {
                    GlslVersion::Es100
                },
            }
        } else {
            GLFeatures {
                is_embedded,
                texture_storage: version >= (4, 2) || has_extension("GL_ARB_texture_storage"),
                vertex_arrays: version >= (3, 0) || has_extension("GL_ARB_vertex_array_object"),
                clamp_to_border: true,
                glsl: if version >= (3, 3) {
                    GlslVersion::V330
                } else if version >= (3, 2) {
                    GlslVersion::V150
                } else {
                    GlslVersion::V110
                },
            }
        }
    }

    /// The internal format of a framebuffer texture.
    ///
    /// Without texture storage on OpenGL ES, textures are unsized `RGBA`.
    pub fn texture_format(&self, format: ImageFormat) -> u32 {
        if self.is_embedded && !self.texture_storage {
            glow::RGBA
        } else {
            format.or_default_format().into()
        }
    }

    /// The pixel format and type to pass with `internal_format` to `glTexImage2D`.
    pub fn pixel_transfer(&self, internal_format: u32) -> (u32, u32) {
        match internal_format {
            glow::RGBA16F | glow::RGBA32F => (glow::RGBA, glow::FLOAT),
            _ => (glow::RGBA, glow::UNSIGNED_BYTE),
        }
    }

    /// The wrap mode to use in place of `wrap_mode`.
    pub fn wrap_mode(&self, wrap_mode: WrapMode) -> WrapMode {
        match wrap_mode {
            WrapMode::ClampToBorder if !self.clamp_to_border => WrapMode::ClampToEdge,
            wrap_mode => wrap_mode,
        }
    }

    /// Prepare a shader source written in GLSL ES 1.00 style for this context.
    ///
    /// Sources that start with their own `#version` directive are returned unchanged.
    pub fn shader_source<'a>(&self, stage: u32, source: &'a str) -> Cow<'a, str> {
        if source.trim_start().starts_with("#version") {
            return Cow::Borrowed(source);
        }

        let body = if stage == glow::FRAGMENT_SHADER && !self.glsl.has_frag_color() {
            Cow::Owned(source.replace("gl_FragColor", "fragColor"))
        } else {
            Cow::Borrowed(source)
        };

        let mut prepared = String::with_capacity(body.len() + 128);
        prepared.push_str(self.glsl.header());
        prepared.push_str(self.glsl.prelude(stage));
        prepared.push_str(&body);
        Cow::Owned(prepared)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn no_extensions(_: &str) -> bool {
        false
    }

    #[test]
    pub fn gles2_uses_mutable_textures_without_vertex_arrays() {
        let features = GLFeatures::from_version(2, 0, true, no_extensions);
        assert!(!features.texture_storage);
        assert!(!features.vertex_arrays);
        assert!(!features.clamp_to_border);
        assert_eq!(features.glsl, GlslVersion::Es100);
        assert_eq!(features.texture_format(ImageFormat::R16G16B16A16Sfloat), glow::RGBA);
        assert_eq!(
            features.pixel_transfer(glow::RGBA),
            (glow::RGBA, glow::UNSIGNED_BYTE)
        );
    }

    #[test]
    pub fn gles3_has_storage_but_border_clamp_needs_3_2() {
        let features = GLFeatures::from_version(3, 0, true, no_extensions);
        assert!(features.texture_storage);
        assert!(features.vertex_arrays);
        assert!(!features.clamp_to_border);
        assert_eq!(features.glsl, GlslVersion::Es300);
        assert_eq!(features.texture_format(ImageFormat::Unknown), glow::RGBA8);

        assert!(GLFeatures::from_version(3, 2, true, no_extensions).clamp_to_border);
        assert!(
            GLFeatures::from_version(3, 0, true, |name| name == "GL_EXT_texture_border_clamp")
                .clamp_to_border
        );
    }

    #[test]
    pub fn desktop_texture_storage_needs_4_2_or_extension() {
        let core33 = GLFeatures::from_version(3, 3, false, no_extensions);
        assert!(!core33.texture_storage);
        assert!(core33.vertex_arrays);
        assert!(core33.clamp_to_border);
        assert_eq!(core33.glsl, GlslVersion::V330);
        assert_eq!(
            core33.pixel_transfer(glow::RGBA16F),
            (glow::RGBA, glow::FLOAT)
        );

        let with_ext = GLFeatures::from_version(3, 3, false, |name| name == "GL_ARB_texture_storage");
        assert!(with_ext.texture_storage);
        assert!(GLFeatures::from_version(4, 6, false, no_extensions).texture_storage);

        let legacy = GLFeatures::from_version(2, 1, false, no_extensions);
        assert!(!legacy.vertex_arrays);
        assert_eq!(legacy.glsl, GlslVersion::V110);
        assert_eq!(GLFeatures::from_version(3, 2, false, no_extensions).glsl, GlslVersion::V150);
    }

    #[test]
    pub fn border_clamp_falls_back_to_edge() {
        let gles2 = GLFeatures::from_version(2, 0, true, no_extensions);
        assert_eq!(gles2.wrap_mode(WrapMode::ClampToBorder), WrapMode::ClampToEdge);
        assert_eq!(gles2.wrap_mode(WrapMode::Repeat), WrapMode::Repeat);

        let desktop = GLFeatures::from_version(3, 3, false, no_extensions);
        assert_eq!(desktop.wrap_mode(WrapMode::ClampToBorder), WrapMode::ClampToBorder);
    }

    #[test]
    pub fn shader_sources_get_a_version_header() {
        let fragment = "varying highp vec2 uv;\nvoid main() { gl_FragColor = vec4(uv, 0.0, 1.0); }\n";

        let core = GLFeatures::from_version(3, 3, false, no_extensions);
        let prepared = core.shader_source(glow::FRAGMENT_SHADER, fragment);
        assert!(prepared.starts_with("#version 330 core\n"));
        assert!(prepared.contains("out vec4 fragColor;"));
        assert!(!prepared.contains("gl_FragColor"));

        let vertex = core.shader_source(glow::VERTEX_SHADER, "attribute vec4 position;\n");
        assert!(vertex.contains("#define attribute in"));

        let gles2 = GLFeatures::from_version(2, 0, true, no_extensions);
        let prepared = gles2.shader_source(glow::FRAGMENT_SHADER, fragment);
        assert!(prepared.starts_with("#version 100\nprecision mediump float;\n"));
        assert!(prepared.contains("gl_FragColor"));

        let gles3 = GLFeatures::from_version(3, 0, true, no_extensions);
        assert!(gles3
            .shader_source(glow::VERTEX_SHADER, "void main() {}")
            .starts_with("#version 300 es\n"));
    }

    #[test]
    pub fn versioned_sources_are_left_alone() {
        let source = "  #version 310 es\nvoid main() {}";
        let features = GLFeatures::from_version(3, 3, false, no_extensions);
        assert!(matches!(
            features.shader_source(glow::VERTEX_SHADER, source),
            Cow::Borrowed(s) if s == source
        ));
    }
}
