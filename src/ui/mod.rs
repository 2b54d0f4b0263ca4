/// Presentation helpers
///
/// - canvas.rs: the confetti banner drawing adapter
/// - gallery.rs: photo scanning and thumbnail decoding

pub mod canvas;
pub mod gallery;
