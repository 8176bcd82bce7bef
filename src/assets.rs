//! Image loading and ownership
//!
//! Images are addressed by plain indices handed out in load order and never
//! reused. The [`ImageStore`] is their single owner; `release_all` returns
//! every GPU image to the surface exactly once.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::consts::{ASSUMED_H, ASSUMED_W, ENEMY_SIZE};
use crate::error::AssetError;
use crate::renderer::{DisplaySurface, ImageId};

/// An uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
}

/// Source of decoded RGBA bitmaps
pub trait ImageLoader {
    fn load(&self, name: &str) -> Result<RgbaImage, AssetError>;
}

/// Files under an optional asset directory, falling back to built-in
/// procedural sprites for `ship`, `enemy` and `background`
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    dir: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl ImageLoader for AssetLoader {
    fn load(&self, name: &str) -> Result<RgbaImage, AssetError> {
        let path = self.path_for(name);
        if path.is_file() {
            log::debug!("Decoding {}", path.display());
            let decoded = image::open(&path).map_err(|source| AssetError::Decode {
                name: name.to_string(),
                source,
            })?;
            return Ok(decoded.to_rgba8());
        }

        builtin(name).ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// Built-in sprite for `name`, with or without a `.png` extension
pub fn builtin(name: &str) -> Option<RgbaImage> {
    let stem = Path::new(name).file_stem()?.to_str()?;
    match stem {
        "ship" => Some(ship_sprite()),
        "enemy" => Some(enemy_sprite()),
        "background" => Some(background_sprite()),
        _ => None,
    }
}

/// Right-pointing wedge with a cockpit stripe
fn ship_sprite() -> RgbaImage {
    const W: u32 = 48;
    const H: u32 = 32;
    RgbaImage::from_fn(W, H, |x, y| {
        let half = H as f32 / 2.0;
        let dy = (y as f32 + 0.5 - half).abs();
        // Wedge narrows toward the nose
        let reach = W as f32 * (1.0 - dy / half);
        if (x as f32) >= reach {
            Rgba([0, 0, 0, 0])
        } else if dy < 3.0 && x > W / 3 {
            Rgba([80, 200, 255, 255])
        } else {
            Rgba([170, 180, 200, 255])
        }
    })
}

/// Red disc with a dark core
fn enemy_sprite() -> RgbaImage {
    let size = ENEMY_SIZE as u32;
    let r = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let d = ((x as f32 + 0.5 - r).powi(2) + (y as f32 + 0.5 - r).powi(2)).sqrt();
        if d > r {
            Rgba([0, 0, 0, 0])
        } else if d < r * 0.35 {
            Rgba([90, 0, 20, 255])
        } else {
            Rgba([220, 40, 50, 255])
        }
    })
}

/// Sparse starfield, one screen wide so two copies always cover the view
fn background_sprite() -> RgbaImage {
    RgbaImage::from_fn(ASSUMED_W as u32, ASSUMED_H as u32, |x, y| {
        let h = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
        if h % 613 == 0 {
            let v = 120 + (h >> 8) as u8 % 136;
            Rgba([v, v, v, 255])
        } else {
            Rgba([4, 6, 18, 255])
        }
    })
}

/// Owner of every loaded image
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<Image>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and upload; returns the new image's index
    pub fn load(
        &mut self,
        surface: &mut dyn DisplaySurface,
        loader: &dyn ImageLoader,
        name: &str,
    ) -> Result<usize, AssetError> {
        let bitmap = loader.load(name)?;
        let (width, height) = bitmap.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty(name.to_string()));
        }

        let id = surface.create_image(width, height, bitmap.as_raw());
        self.images.push(Image { id, width, height });
        log::info!("Loaded image `{}` ({}x{})", name, width, height);
        Ok(self.images.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    /// Width of image `index`; 0 (and an error log) if there is no such image
    pub fn width(&self, index: usize) -> u32 {
        self.checked(index).map_or(0, |img| img.width)
    }

    pub fn height(&self, index: usize) -> u32 {
        self.checked(index).map_or(0, |img| img.height)
    }

    pub fn checked(&self, index: usize) -> Option<&Image> {
        let image = self.images.get(index);
        if image.is_none() {
            log::error!("Invalid image index {}", index);
        }
        image
    }

    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Destroy every image on the surface
    pub fn release_all(&mut self, surface: &mut dyn DisplaySurface) {
        for image in self.images.drain(..) {
            surface.destroy_image(image.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessSurface;

    #[test]
    fn test_builtin_names() {
        for name in ["ship", "ship.png", "enemy", "enemy.png", "background.png"] {
            assert!(builtin(name).is_some(), "{name}");
        }
        assert!(builtin("player.png").is_none());
    }

    #[test]
    fn test_builtin_sizes() {
        let enemy = builtin("enemy").unwrap();
        assert_eq!(enemy.dimensions(), (64, 64));
        let bg = builtin("background").unwrap();
        assert_eq!(bg.dimensions(), (800, 600));
        // Corner of the enemy disc is transparent
        assert_eq!(enemy.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_unknown_is_not_found() {
        let loader = AssetLoader::new(None);
        let err = loader.load("no-such-sprite.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(n) if n == "no-such-sprite.png"));
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = std::env::temp_dir().join(format!("scroller-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))
            .save(dir.join("ship.png"))
            .unwrap();

        let loader = AssetLoader::new(Some(dir.clone()));
        let ship = loader.load("ship.png").unwrap();
        assert_eq!(ship.dimensions(), (3, 2));
        // Not on disk: built-in
        assert_eq!(loader.load("enemy.png").unwrap().dimensions(), (64, 64));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = std::env::temp_dir().join(format!("scroller-corrupt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("enemy.png"), b"not a png").unwrap();

        let err = AssetLoader::new(Some(dir.clone())).load("enemy.png").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_store_indices_and_release() {
        let mut surface = HeadlessSurface::new(800, 600);
        let mut store = ImageStore::new();
        let loader = AssetLoader::new(None);

        let ship = store.load(&mut surface, &loader, "ship").unwrap();
        let enemy = store.load(&mut surface, &loader, "enemy").unwrap();
        assert_eq!((ship, enemy), (0, 1));
        assert_eq!(store.width(enemy), 64);
        assert_eq!(surface.live_images(), 2);

        store.release_all(&mut surface);
        assert!(store.is_empty());
        assert_eq!(surface.live_images(), 0);
        assert_eq!(surface.destroyed_images().len(), 2);
    }

    #[test]
    fn test_invalid_index_is_zero() {
        let store = ImageStore::new();
        assert_eq!(store.width(7), 0);
        assert_eq!(store.height(7), 0);
    }
}
