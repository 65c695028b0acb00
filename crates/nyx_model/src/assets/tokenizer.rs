//! Line tokenizer shared by the OBJ and MTL parsers

use crate::error::{ModelError, ModelResult};

/// One non-blank, non-comment source line split into tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// 1-based line number
    pub line: usize,
    /// First token of the line
    pub keyword: &'a str,
    /// Remaining tokens
    pub args: Vec<&'a str>,
}

impl<'a> Directive<'a> {
    /// Argument at `index`, or a format error naming the directive
    pub fn arg(&self, index: usize) -> ModelResult<&'a str> {
        self.args.get(index).copied().ok_or_else(|| {
            ModelError::format(self.line, format!("{} missing argument {}", self.keyword, index + 1))
        })
    }

    /// Last argument, used for paths that may be preceded by options
    pub fn last_arg(&self) -> ModelResult<&'a str> {
        self.args
            .last()
            .copied()
            .ok_or_else(|| ModelError::format(self.line, format!("{} missing argument", self.keyword)))
    }

    /// Parse the argument at `index` as a float
    pub fn f32_arg(&self, index: usize) -> ModelResult<f32> {
        let token = self.arg(index)?;
        token.parse::<f32>().map_err(|_| {
            ModelError::format(self.line, format!("{} invalid float value '{}'", self.keyword, token))
        })
    }

    /// Parse three consecutive float arguments starting at `start`
    pub fn vec3_args(&self, start: usize) -> ModelResult<[f32; 3]> {
        Ok([self.f32_arg(start)?, self.f32_arg(start + 1)?, self.f32_arg(start + 2)?])
    }
}

/// Split `line` into a directive
///
/// Returns `None` for blank lines and `#` comments. A trailing comment ends
/// the token stream.
pub fn tokenize(line_num: usize, line: &str) -> Option<Directive<'_>> {
    let mut tokens = line.split_whitespace().take_while(|token| !token.starts_with('#'));
    let keyword = tokens.next()?;
    Some(Directive { line: line_num, keyword, args: tokens.collect() })
}
