pub mod frameworks;
pub mod languages;

pub use frameworks::{detect_frameworks, FRAMEWORK_MANIFESTS};
pub use languages::language_color;
