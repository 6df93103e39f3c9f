// Pinterest board embed boundary.
// Validates board URLs and sizes the embed; the widget itself is external.

use url::Url;

/// Board width used when the container reports no width.
const FALLBACK_WIDTH: u32 = 900;

/// Normalize a Pinterest board URL, or `None` if it is not one.
///
/// Query and fragment are dropped and the path always ends in `/`.
pub fn sanitize_board_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !url.host_str()?.contains("pinterest.") {
        return None;
    }

    let mut path = url.path().to_string();
    if !path.ends_with('/') {
        path.push('/');
    }

    Some(format!("{}{}", url.origin().ascii_serialization(), path))
}

/// Sizing attributes for the board embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEmbed {
    pub url: String,
    pub board_width: u32,
    pub scale_height: u32,
    pub scale_width: u32,
}

impl BoardEmbed {
    /// Size the embed for a container `container_width` pixels wide (0 if unknown).
    pub fn for_width(url: &str, container_width: u32) -> Self {
        let width = if container_width == 0 {
            FALLBACK_WIDTH
        } else {
            container_width
        }
        .clamp(320, 1200);
        let height = (f64::from(width) * 0.75).round();
        let scale_height = ((height / 3.0).round() as u32).clamp(240, 420);

        Self {
            url: url.to_string(),
            board_width: width,
            scale_height,
            scale_width: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_adds_trailing_slash() {
        assert_eq!(
            sanitize_board_url("https://pinterest.com/someone/boardname").as_deref(),
            Some("https://pinterest.com/someone/boardname/")
        );
    }

    #[test]
    fn test_sanitize_drops_query_and_keeps_slash() {
        assert_eq!(
            sanitize_board_url("https://www.pinterest.co.uk/someone/board/?utm=x#top").as_deref(),
            Some("https://www.pinterest.co.uk/someone/board/")
        );
    }

    #[test]
    fn test_sanitize_rejects_other_hosts() {
        assert_eq!(
            sanitize_board_url("https://example.com/someone/board"),
            None
        );
        assert_eq!(sanitize_board_url("pinterest.com/someone/board"), None);
        assert_eq!(sanitize_board_url("not a url"), None);
    }

    #[test]
    fn test_embed_sizing() {
        let embed = BoardEmbed::for_width("https://pinterest.com/a/b/", 0);
        assert_eq!(embed.board_width, 900);
        // 900 * 0.75 = 675, / 3 = 225, clamped up to 240.
        assert_eq!(embed.scale_height, 240);
        assert_eq!(embed.scale_width, 120);

        let wide = BoardEmbed::for_width("https://pinterest.com/a/b/", 5000);
        assert_eq!(wide.board_width, 1200);
        assert_eq!(wide.scale_height, 300);

        let narrow = BoardEmbed::for_width("https://pinterest.com/a/b/", 100);
        assert_eq!(narrow.board_width, 320);
        assert_eq!(narrow.scale_height, 240);
    }
}
