//! Speech Input - 把语音转写文本拆成故事参数
//!
//! 规则很朴素：按 `.`、`!`、`?` 切句，第一句是主角，第二句是场景，
//! 其余合并为补充细节。

use super::prompt::StoryParams;

pub const DEFAULT_GENRE: &str = "general";
pub const DEFAULT_TONE: &str = "neutral";
pub const UNSPECIFIED_SETTING: &str = "Unspecified";

/// 切句，去掉空句
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 从转写文本构造故事参数
///
/// 转写文本没有任何句子时返回 None。
pub fn story_params_from_transcript(
    transcript: &str,
    genre: Option<&str>,
    tone: Option<&str>,
) -> Option<StoryParams> {
    let sentences = split_sentences(transcript);
    let (main_character, rest) = sentences.split_first()?;
    let setting = rest.first().copied().unwrap_or(UNSPECIFIED_SETTING);
    let details = rest.get(1..).filter(|d| !d.is_empty()).map(|d| d.join(". "));

    let pick = |value: Option<&str>, default: &str| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    Some(StoryParams {
        main_character: main_character.to_string(),
        setting: setting.to_string(),
        genre: pick(genre, DEFAULT_GENRE),
        tone: pick(tone, DEFAULT_TONE),
        additional_details: details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_transcript() {
        let params = story_params_from_transcript(
            "A young witch named Mira. A drowned city! She is looking for her brother? He vanished.",
            Some("fantasy"),
            None,
        )
        .unwrap();

        assert_eq!(params.main_character, "A young witch named Mira");
        assert_eq!(params.setting, "A drowned city");
        assert_eq!(
            params.additional_details.as_deref(),
            Some("She is looking for her brother. He vanished")
        );
        assert_eq!(params.genre, "fantasy");
        assert_eq!(params.tone, DEFAULT_TONE);
    }

    #[test]
    fn test_single_sentence() {
        let params = story_params_from_transcript("An old sailor", None, Some("  ")).unwrap();
        assert_eq!(params.main_character, "An old sailor");
        assert_eq!(params.setting, UNSPECIFIED_SETTING);
        assert_eq!(params.additional_details, None);
        assert_eq!(params.genre, DEFAULT_GENRE);
        assert_eq!(params.tone, DEFAULT_TONE);
    }

    #[test]
    fn test_empty_transcript() {
        assert!(story_params_from_transcript(" ... !? ", None, None).is_none());
    }
}
