//! Pipeline step implementations.

mod extract;
mod recombine;
mod separate;

pub use extract::ExtractStep;
pub use recombine::RecombineStep;
pub use separate::SeparateStep;
