use iced::widget::image::Handle;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Size of generated thumbnails (longest edge)
const THUMBNAIL_SIZE: u32 = 256;

/// Keeps a runaway folder pick from decoding someone's entire archive
const MAX_PHOTOS: usize = 60;

/// Supported photo file extensions
const PHOTO_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "bmp"];

/// One gallery photo, already downscaled for display
#[derive(Debug, Clone)]
pub struct Photo {
    pub thumbnail: Handle,
}

/// Scan `folder` for photos and decode thumbnails.
///
/// Runs on a background task so the UI stays responsive while images
/// decode. Unreadable files are skipped; an unreadable folder just yields an
/// empty gallery.
pub async fn scan_folder(folder: PathBuf) -> Vec<Photo> {
    log::info!("🔍 Scanning photo folder: {}", folder.display());

    let mut paths: Vec<PathBuf> = WalkDir::new(&folder)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_photo(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();
    paths.truncate(MAX_PHOTOS);

    let mut photos = Vec::with_capacity(paths.len());
    for path in paths {
        match load_thumbnail(&path) {
            Some(thumbnail) => photos.push(Photo { thumbnail }),
            None => log::warn!("could not decode {}, skipping", path.display()),
        }
    }

    log::info!("🖼️ Gallery ready with {} photos", photos.len());
    photos
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            PHOTO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decode a photo and downscale it to a display thumbnail
fn load_thumbnail(path: &Path) -> Option<Handle> {
    let img = image::open(path).ok()?;
    let thumb = img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).to_rgba8();
    let (width, height) = thumb.dimensions();
    Some(Handle::from_rgba(width, height, thumb.into_raw()))
}
