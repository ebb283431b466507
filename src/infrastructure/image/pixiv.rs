//! Pixiv image CDN rules.

use reqwest::Url;

/// Host serving Pixiv originals.
pub const PIXIV_IMAGE_HOST: &str = "i.pximg.net";

/// Referer the Pixiv CDN requires before serving an image.
pub const PIXIV_REFERER: &str = "https://www.pixiv.net/";

/// Checks whether a URL points at the Pixiv image CDN.
#[must_use]
pub fn is_pixiv_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| u.host_str() == Some(PIXIV_IMAGE_HOST))
}

/// Returns the `Referer` header value to send with an image request.
#[must_use]
pub fn referer_for(url: &str) -> Option<&'static str> {
    is_pixiv_url(url).then_some(PIXIV_REFERER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixiv_urls() {
        assert!(is_pixiv_url(
            "https://i.pximg.net/img-original/img/2024/01/01/00/00/00/1_p0.png"
        ));
        assert_eq!(
            referer_for("https://i.pximg.net/c/600x1200/img-master/1.jpg"),
            Some(PIXIV_REFERER)
        );
    }

    #[test]
    fn test_other_hosts() {
        assert!(!is_pixiv_url("https://example.com/i.pximg.net/a.png"));
        assert!(!is_pixiv_url("https://i.pximg.net.evil.com/a.png"));
        assert!(!is_pixiv_url("not a url"));
        assert_eq!(referer_for("https://cdn.example.com/a.png"), None);
    }
}
