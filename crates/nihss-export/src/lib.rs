//! nihss-export
//!
//! Clinical note rendering (Tera), export filenames, and DOCX generation.

pub mod docx;
pub mod error;
pub mod filename;
pub mod render;
pub mod styles;
