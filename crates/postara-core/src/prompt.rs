//! Prompt Construction
//!
//! Fixed instruction template embedding tone, platform, and requested count.
//! The model is asked for a strictly parseable JSON object; `parse` handles
//! the cases where it ignores that.

use crate::caption::CaptionRequest;
use crate::message::Message;

/// Build the message array for a caption request.
///
/// Text requests send a plain user message; image requests send multimodal
/// content parts (instruction text + image data URL).
pub fn build_messages(request: &CaptionRequest) -> Vec<Message> {
    let count = request.count_clamped();

    let system = format!(
        "You write short, human, platform-specific social media captions. \
         Platform: {}. Tone: {}. Each caption must be under 140 characters. \
         Return ONLY a JSON object with keys \"captions\" (array of {} strings) \
         and \"hashtags\" (array of topical tags), no extra text.",
        request.platform, request.tone, count
    );

    let hashtag_hint = match request.hashtags.as_deref() {
        Some(tags) if !tags.trim().is_empty() => {
            format!(" Include or adapt these hashtags if they fit: {}.", tags.trim())
        }
        _ => String::new(),
    };

    let user = match &request.image {
        Some(image) => Message::user_with_image(
            format!(
                "Write {} distinct captions for this image.{}",
                count, hashtag_hint
            ),
            image.data_url.clone(),
        ),
        None => Message::user(format!(
            "Write {} distinct captions for: {}{}",
            count,
            request.text.as_deref().unwrap_or_default().trim(),
            hashtag_hint
        )),
    };

    vec![Message::system(system), user]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::ImageRef;
    use crate::message::MessageContent;

    #[test]
    fn test_text_prompt_embeds_parameters() {
        let request: CaptionRequest = serde_json::from_str(
            r##"{"text":"sunset","platform":"Instagram","tone":"Funny","hashtags":"#sun"}"##,
        )
        .unwrap();

        let messages = build_messages(&request);
        assert_eq!(messages.len(), 2);

        let system = messages[0].text();
        assert!(system.contains("Instagram"));
        assert!(system.contains("Funny"));

        let user = messages[1].text();
        assert!(user.contains("sunset"));
        assert!(user.contains("#sun"));
    }

    #[test]
    fn test_image_prompt_uses_parts() {
        let request = CaptionRequest {
            text: None,
            image: Some(ImageRef {
                data_url: "data:image/png;base64,AAAA".into(),
                mime_type: "image/png".into(),
            }),
            platform: "tiktok".into(),
            tone: "bold".into(),
            count: 3,
            hashtags: None,
        };

        let messages = build_messages(&request);
        assert!(matches!(messages[1].content, MessageContent::Parts(_)));
    }
}
