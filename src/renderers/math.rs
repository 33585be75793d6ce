// exam-export-service/src/renderers/math.rs

use crate::error::{DocumentError, Result};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use tracing::debug;

/// Typesetting parameters for a single expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParams {
    pub font_size_pt: u32,
    pub dpi: u32,
}

/// Turns one LaTeX math expression into PNG bytes.
///
/// Callers render markers one at a time; an implementation may assume it is
/// never asked to typeset two expressions of the same document concurrently.
pub trait MathRenderer: Send + Sync {
    fn render_png(&self, expression: &str, params: &RenderParams) -> Result<Vec<u8>>;
}

/// Control sequences that read files or change how TeX tokenizes input.
const FORBIDDEN_COMMANDS: &[&str] = &[
    "\\input",
    "\\include",
    "\\openin",
    "\\openout",
    "\\read",
    "\\write",
    "\\catcode",
    "\\csname",
];

/// Renders through `latex` and `dvipng`.
pub struct LatexRenderer {
    latex_bin: String,
    dvipng_bin: String,
}

impl LatexRenderer {
    pub fn new(latex_bin: impl Into<String>, dvipng_bin: impl Into<String>) -> Self {
        Self {
            latex_bin: latex_bin.into(),
            dvipng_bin: dvipng_bin.into(),
        }
    }
}

impl MathRenderer for LatexRenderer {
    fn render_png(&self, expression: &str, params: &RenderParams) -> Result<Vec<u8>> {
        ensure_math_only(expression)?;

        // Dropping the workspace removes every intermediate file.
        let workspace: TempDir = tempfile::Builder::new().prefix("math-").tempdir()?;
        let dir = workspace.path();

        std::fs::write(dir.join("formula.tex"), standalone_source(expression, params))?;

        let mut latex = Command::new(&self.latex_bin);
        latex
            .current_dir(dir)
            // kpathsea paranoid mode: no absolute paths, no `..`, no dotfiles
            .env("openin_any", "p")
            .env("openout_any", "p")
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg("-no-shell-escape")
            .arg("formula.tex");

        debug!("Running LaTeX: {:?}", latex);
        check(&self.latex_bin, latex.output()?)?;

        let mut dvipng = Command::new(&self.dvipng_bin);
        dvipng
            .current_dir(dir)
            .arg("-q")
            .arg("-T")
            .arg("tight")
            .arg("-bg")
            .arg("Transparent")
            .arg("-D")
            .arg(params.dpi.to_string())
            .arg("-o")
            .arg("formula.png")
            .arg("formula.dvi");

        debug!("Running dvipng: {:?}", dvipng);
        check(&self.dvipng_bin, dvipng.output()?)?;

        read_png(&dir.join("formula.png"))
    }
}

/// Rejects expressions that could leave math mode or reach the filesystem.
/// An escaped `\\$` is allowed.
pub fn ensure_math_only(expression: &str) -> Result<()> {
    if let Some(command) = FORBIDDEN_COMMANDS
        .iter()
        .find(|command| expression.contains(*command))
    {
        return Err(DocumentError::MathError(format!(
            "control sequence {} is not allowed in math expressions",
            command
        )));
    }

    let mut escaped = false;
    for c in expression.chars() {
        match c {
            '\\' => escaped = !escaped,
            '$' if !escaped => {
                return Err(DocumentError::MathError(
                    "unescaped $ is not allowed in math expressions".to_string(),
                ))
            }
            _ => escaped = false,
        }
    }

    Ok(())
}

fn standalone_source(expression: &str, params: &RenderParams) -> String {
    let baseline = params.font_size_pt + params.font_size_pt / 5;

    let mut source = String::with_capacity(expression.len() + 256);
    source.push_str("\\documentclass[border=1pt]{standalone}\n");
    source.push_str("\\usepackage{lmodern}\n");
    source.push_str("\\usepackage{amsmath}\n");
    source.push_str("\\usepackage{amssymb}\n");
    source.push_str("\\begin{document}\n");
    source.push_str(&format!(
        "\\fontsize{{{}}}{{{}}}\\selectfont\n",
        params.font_size_pt, baseline
    ));
    source.push('$');
    source.push_str(expression);
    source.push_str("$\n\\end{document}\n");
    source
}

fn check(program: &str, output: Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    // latex reports errors on stdout, dvipng on stderr
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stdout
        .lines()
        .chain(stderr.lines())
        .filter(|line| line.starts_with('!') || line.to_lowercase().contains("error"))
        .take(3)
        .collect::<Vec<_>>()
        .join(" | ");

    Err(DocumentError::MathError(format!(
        "{} exited with {}: {}",
        program, output.status, detail
    )))
}

fn read_png(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(DocumentError::MathError("dvipng produced an empty image".to_string()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_source_wraps_expression() {
        let params = RenderParams {
            font_size_pt: 13,
            dpi: 110,
        };
        let source = standalone_source("x^2 + y^2", &params);
        assert!(source.starts_with("\\documentclass[border=1pt]{standalone}"));
        assert!(source.contains("\\fontsize{13}{15}\\selectfont"));
        assert!(source.contains("$x^2 + y^2$"));
        assert!(source.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_math_only_accepts_ordinary_expressions() {
        assert!(ensure_math_only("\\frac{a}{b} + \\sqrt{2}").is_ok());
        assert!(ensure_math_only("R\\$ 10 + \\\\ x").is_ok());
    }

    #[test]
    fn test_math_only_rejects_file_access_and_mode_escape() {
        for expression in [
            "\\input{/etc/passwd}",
            "x$ \\input{/srv/app/config.toml} $y",
            "\\include{secret}",
            "\\openin1=/etc/hosts \\read1 to\\x",
            "\\catcode`\\@=11",
            "\\csname input\\endcsname{/etc/passwd}",
            "a $ b",
            "\\\\$",
        ] {
            assert!(
                matches!(ensure_math_only(expression), Err(DocumentError::MathError(_))),
                "accepted {:?}",
                expression
            );
        }
    }

    #[test]
    fn test_unsafe_expression_fails_before_latex_runs() {
        // A missing binary would surface as an IO error instead.
        let renderer = LatexRenderer::new("definitely-not-latex-bin", "dvipng");
        let params = RenderParams {
            font_size_pt: 13,
            dpi: 110,
        };
        let err = renderer
            .render_png("\\input{/etc/passwd}", &params)
            .unwrap_err();
        assert!(matches!(err, DocumentError::MathError(_)));
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let renderer = LatexRenderer::new("definitely-not-latex-bin", "dvipng");
        let params = RenderParams {
            font_size_pt: 16,
            dpi: 150,
        };
        assert!(renderer.render_png("a+b", &params).is_err());
    }
}
