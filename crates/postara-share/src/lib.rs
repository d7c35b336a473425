//! # postara-share
//!
//! Pure share-intent URL construction. For each supported network, a pure
//! function maps a public media URL and caption text to that network's
//! native share/post composer URL. No server interaction happens here.
//!
//! Networks without a public web share intent (native app or OAuth
//! connection required) are flagged as [`ShareKind::Connect`] and never
//! produce a directly-openable URL.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

/// How a network accepts shared content
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    /// Public web share-intent URL
    Link,
    /// Requires account connection (OAuth/native app); no intent URL
    Connect,
}

/// Supported social networks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    X,
    Facebook,
    Linkedin,
    Reddit,
    Pinterest,
    Whatsapp,
    Telegram,
    Threads,
    Youtube,
    Instagram,
    Tiktok,
    Snapchat,
    Discord,
    Messenger,
}

/// Display order used by the share UI
pub const ALL_NETWORKS: [Network; 14] = [
    Network::X,
    Network::Facebook,
    Network::Instagram,
    Network::Tiktok,
    Network::Youtube,
    Network::Linkedin,
    Network::Reddit,
    Network::Pinterest,
    Network::Whatsapp,
    Network::Telegram,
    Network::Threads,
    Network::Snapchat,
    Network::Messenger,
    Network::Discord,
];

impl Network {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Network::X => "X (Twitter)",
            Network::Facebook => "Facebook",
            Network::Linkedin => "LinkedIn",
            Network::Reddit => "Reddit",
            Network::Pinterest => "Pinterest",
            Network::Whatsapp => "WhatsApp",
            Network::Telegram => "Telegram",
            Network::Threads => "Threads",
            Network::Youtube => "YouTube",
            Network::Instagram => "Instagram",
            Network::Tiktok => "TikTok",
            Network::Snapchat => "Snapchat",
            Network::Discord => "Discord",
            Network::Messenger => "Messenger",
        }
    }

    /// Whether this network exposes a public web share intent
    pub fn kind(&self) -> ShareKind {
        match self {
            Network::X
            | Network::Facebook
            | Network::Linkedin
            | Network::Reddit
            | Network::Pinterest
            | Network::Whatsapp
            | Network::Telegram
            | Network::Threads => ShareKind::Link,

            Network::Youtube
            | Network::Instagram
            | Network::Tiktok
            | Network::Snapchat
            | Network::Discord
            | Network::Messenger => ShareKind::Connect,
        }
    }

    /// Build the fully-encoded share-intent URL for this network.
    ///
    /// Returns `None` for connect-kind networks: they have no public web
    /// share intent and must go through account connection instead.
    pub fn share_url(&self, url: &str, text: &str, title: &str) -> Option<String> {
        let intent = match self {
            Network::X => format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encode(url),
                encode(text)
            ),
            Network::Facebook => format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                encode(url)
            ),
            Network::Linkedin => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                encode(url)
            ),
            Network::Reddit => format!(
                "https://www.reddit.com/submit?url={}&title={}",
                encode(url),
                encode(title)
            ),
            Network::Pinterest => format!(
                "https://www.pinterest.com/pin/create/button/?url={}&media={}&description={}",
                encode(url),
                encode(url),
                encode(text)
            ),
            Network::Whatsapp => format!(
                "https://api.whatsapp.com/send?text={}%20{}",
                encode(text),
                encode(url)
            ),
            Network::Telegram => format!(
                "https://t.me/share/url?url={}&text={}",
                encode(url),
                encode(text)
            ),
            Network::Threads => format!(
                "https://www.threads.net/intent/post?text={}",
                encode(&format!("{} {}", text, url))
            ),

            Network::Youtube
            | Network::Instagram
            | Network::Tiktok
            | Network::Snapchat
            | Network::Discord
            | Network::Messenger => return None,
        };

        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://res.cloudinary.com/demo/image/upload/cat.png";
    const TEXT: &str = "Posted with Postara";

    #[test]
    fn test_link_networks_produce_urls() {
        for network in ALL_NETWORKS {
            let intent = network.share_url(URL, TEXT, "Shared via Postara");
            match network.kind() {
                ShareKind::Link => assert!(intent.is_some(), "{:?}", network),
                ShareKind::Connect => assert!(intent.is_none(), "{:?}", network),
            }
        }
    }

    #[test]
    fn test_urls_are_percent_encoded() {
        let intent = Network::X.share_url(URL, "sun & waves", "t").unwrap();
        assert!(intent.contains("text=sun%20%26%20waves"));
        assert!(intent.contains("url=https%3A%2F%2Fres.cloudinary.com"));
    }

    #[test]
    fn test_threads_combines_text_and_url() {
        let intent = Network::Threads.share_url("https://a.example/x", "hi", "t").unwrap();
        assert_eq!(
            intent,
            "https://www.threads.net/intent/post?text=hi%20https%3A%2F%2Fa.example%2Fx"
        );
    }

    #[test]
    fn test_pinterest_carries_media_param() {
        let intent = Network::Pinterest.share_url(URL, TEXT, "t").unwrap();
        assert!(intent.contains("media=https%3A%2F%2Fres.cloudinary.com"));
    }

    #[test]
    fn test_display_order_covers_every_network() {
        assert_eq!(ALL_NETWORKS.len(), 14);
        let links = ALL_NETWORKS
            .iter()
            .filter(|n| n.kind() == ShareKind::Link)
            .count();
        assert_eq!(links, 8);
    }
}
