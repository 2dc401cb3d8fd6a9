//! Brand voice and persona models for copydesk.
//!
//! A workspace holds at most one brand voice (`brand_voice.yaml`) and any
//! number of personas (`personas/<slug>.yaml`). Both are plain serde models
//! stored as YAML with atomic writes; both render the directive blocks the
//! prompt assembler injects into generation prompts.

mod brand;
mod persona;


pub use brand::BrandVoice;
pub use persona::Persona;

use crate::workspace::slugify;
