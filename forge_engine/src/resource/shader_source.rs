/// Combined shader source handling
///
/// One source text carries every stage of a program. Each stage's code is
/// wrapped in `#ifdef <MARKER>` blocks; a stage is compiled when its marker
/// appears anywhere in the source, with `#define <MARKER>` injected right
/// after the version directive.

use std::borrow::Cow;
use crate::graphics_device::ShaderStage;

/// Token that starts the version directive line
pub const VERSION_DIRECTIVE: &str = "#version ";

/// Number of supported shader stages
pub const SHADER_STAGE_COUNT: usize = 3;

/// A shader stage the compiler recognizes in combined sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    name: &'static str,
    marker: &'static str,
    stage: ShaderStage,
}

/// Supported stages, in compilation and attachment order
pub const SHADER_STAGES: [StageDescriptor; SHADER_STAGE_COUNT] = [
    StageDescriptor { name: "vertex shader", marker: "VERTEX_SHADER", stage: ShaderStage::Vertex },
    StageDescriptor { name: "geometry shader", marker: "GEOMETRY_SHADER", stage: ShaderStage::Geometry },
    StageDescriptor { name: "fragment shader", marker: "FRAGMENT_SHADER", stage: ShaderStage::Fragment },
];

impl StageDescriptor {
    /// Human readable stage name, used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Preprocessor symbol guarding this stage's code
    pub fn marker(&self) -> &'static str {
        self.marker
    }

    /// Driver stage kind
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Whether a shader body asks for this stage
    pub fn is_requested(&self, body: &str) -> bool {
        body.contains(self.marker)
    }

    /// `#define` line injected in front of the body when compiling this stage
    pub fn define_line(&self) -> String {
        format!("#define {}\n", self.marker)
    }
}

/// A combined source split around its version directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParts<'a> {
    /// Version directive line including its terminator, or empty
    pub version: &'a str,
    /// Source with the version directive line removed
    pub body: Cow<'a, str>,
}

/// Split the first version directive line out of a shader source
///
/// The version segment runs from the directive token through the end of its
/// line, `\n` included. A directive on the last line without a terminator runs
/// to the end of the source. Without a directive the body is the whole source.
pub fn split_version_directive(source: &str) -> SourceParts<'_> {
    let Some(start) = source.find(VERSION_DIRECTIVE) else {
        return SourceParts { version: "", body: Cow::Borrowed(source) };
    };

    let end = source[start..]
        .find('\n')
        .map(|offset| start + offset + 1)
        .unwrap_or(source.len());

    let mut body = String::with_capacity(source.len() - (end - start));
    body.push_str(&source[..start]);
    body.push_str(&source[end..]);

    SourceParts {
        version: &source[start..end],
        body: Cow::Owned(body),
    }
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
