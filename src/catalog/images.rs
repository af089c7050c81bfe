const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const PLACEHOLDER: &str = "/placeholder-image.jpg";

/// Size variants the image CDN serves. `W500` for grid cards, `Original`
/// for full-bleed backdrops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    #[default]
    W500,
    Original,
}

impl ImageSize {
    fn token(self) -> &'static str {
        match self {
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Compose an absolute CDN URL for a relative image path. Empty paths
/// resolve to the bundled placeholder; no network call, no failure mode.
pub fn image_url(path: &str, size: ImageSize) -> String {
    if path.is_empty() {
        return PLACEHOLDER.to_string();
    }
    format!("{IMAGE_BASE}/{}{}", size.token(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_falls_back_to_placeholder() {
        assert_eq!(image_url("", ImageSize::W500), "/placeholder-image.jpg");
    }

    #[test]
    fn composes_cdn_url_with_size_token() {
        assert_eq!(
            image_url("/abc.jpg", ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(
            image_url("/abc.jpg", ImageSize::W500),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn default_size_is_w500() {
        assert_eq!(
            image_url("/abc.jpg", ImageSize::default()),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }
}
