// exam-export-service/src/renderers/mod.rs

mod math;
mod pdf;

pub use math::{LatexRenderer, MathRenderer, RenderParams};
pub use pdf::{PdfRenderer, WeasyPrintRenderer};
