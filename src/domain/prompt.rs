//! Prompt Builder
//!
//! 纯函数：把类型化的字段代入固定模板，生成发送给文本模型的提示词。
//! 可选字段缺失时代入固定的兜底文本，不做任何校验。

use super::branch::PreservedElement;
use super::story::{ChapterNumber, FIRST_CHAPTER_SENTINEL};

/// 可选字段缺失时的兜底文本
pub const NONE_PROVIDED: &str = "None provided";

/// 故事参数（调用方提供）
#[derive(Debug, Clone, PartialEq)]
pub struct StoryParams {
    pub main_character: String,
    pub setting: String,
    pub genre: String,
    pub tone: String,
    pub additional_details: Option<String>,
}

/// 章节提示词上下文
#[derive(Debug, Clone)]
pub struct ChapterPromptContext<'a> {
    pub params: &'a StoryParams,
    pub chapter_number: ChapterNumber,
    /// None 表示第一章
    pub previous_chapters_summary: Option<&'a str>,
}

/// 分支生成参数
#[derive(Debug, Clone)]
pub struct BranchParams<'a> {
    pub original_content: &'a str,
    pub story_context: Option<&'a str>,
    pub preserved_elements: &'a [PreservedElement],
}

/// 分支校验参数
#[derive(Debug, Clone)]
pub struct ValidationParams<'a> {
    pub original_content: &'a str,
    pub branch_content: &'a str,
    pub preserved_elements: &'a [PreservedElement],
}

fn or_none_provided(value: Option<&str>) -> &str {
    or_blank(value, NONE_PROVIDED)
}

/// 渲染保留元素列表
pub fn render_preserved_elements(elements: &[PreservedElement]) -> String {
    if elements.is_empty() {
        return NONE_PROVIDED.to_string();
    }
    elements
        .iter()
        .map(|e| format!("- {}: {} (importance: {:.2})", e.kind.as_str(), e.name, e.importance))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 章节生成提示词
pub fn chapter_prompt(ctx: &ChapterPromptContext<'_>) -> String {
    let p = ctx.params;
    let previous = or_blank(ctx.previous_chapters_summary, FIRST_CHAPTER_SENTINEL);
    format!(
        r#"Create chapter {chapter} of an engaging story based on the following parameters:

Main Character: {main_character}
Setting: {setting}
Genre: {genre}
Tone: {tone}
Additional Details: {details}

Story so far:
{previous}

Write a well-structured, creative chapter that incorporates all these elements and
continues naturally from the story so far. Keep the specified tone and stay appropriate
for the genre. Focus on character development, vivid descriptions, and a clear
narrative arc. The chapter should be between 300-500 words.

Return only the chapter text."#,
        chapter = ctx.chapter_number,
        main_character = p.main_character.trim(),
        setting = p.setting.trim(),
        genre = p.genre.trim(),
        tone = p.tone.trim(),
        details = or_none_provided(p.additional_details.as_deref()),
        previous = previous,
    )
}

fn or_blank<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// 章节摘要提示词
pub fn summary_prompt(content: &str) -> String {
    format!(
        r#"Summarize the following story chapter in 2-3 sentences. Mention the key events
and any characters that matter for later chapters.

Chapter:
{content}

Summary:"#,
        content = content.trim(),
    )
}

/// 替代分支生成提示词
pub fn branch_prompt(params: &BranchParams<'_>) -> String {
    format!(
        r#"You are helping a writer explore alternative versions of a story chapter.

Original chapter:
{original}

Story context:
{context}

Elements that must be preserved in every alternative:
{elements}

Write three alternative versions of this chapter. Each alternative must keep the
preserved elements consistent while changing the course of events.

Respond with a JSON array of three objects with the fields "content", "summary",
"key_differences" (array of strings) and "preserved_elements" (array of names).

If you cannot produce JSON, use this plain-text layout for each alternative:
Alternative 1:
Content: ...
Summary: ...
Key Differences:
- ...
Preserved Elements:
- ..."#,
        original = params.original_content.trim(),
        context = or_none_provided(params.story_context),
        elements = render_preserved_elements(params.preserved_elements),
    )
}

/// 分支连续性校验提示词
pub fn validation_prompt(params: &ValidationParams<'_>) -> String {
    format!(
        r#"Check whether an alternative chapter stays consistent with the original chapter.

Original chapter:
{original}

Alternative chapter:
{branch}

Elements that must be preserved:
{elements}

Respond with a JSON object with the fields "is_valid" (boolean), "continuity_issues"
(array of strings), "compatibility_score" (number between 0 and 1) and
"explanation" (string).

If you cannot produce JSON, use this plain-text layout:
Is Valid: yes/no
Continuity Issues:
- ...
Compatibility Score: 0.0-1.0
Explanation: ..."#,
        original = params.original_content.trim(),
        branch = params.branch_content.trim(),
        elements = render_preserved_elements(params.preserved_elements),
    )
}

/// 情节分析提示词
pub fn plot_analysis_prompt(story: &str) -> String {
    format!(
        r#"Analyze the plot of the following story.

Story:
{story}

Respond with a JSON object with the fields "plot_summary" (string), "strengths"
(array of strings), "areas_for_improvement" (array of strings),
"narrative_structure" (object mapping parts such as "exposition" or "climax" to
descriptions) and "alternatives" (object mapping plot points to alternative
directions).

If you cannot produce JSON, use these section headings:
PLOT SUMMARY:
STRENGTHS:
AREAS FOR IMPROVEMENT:
NARRATIVE STRUCTURE:
ALTERNATIVES:"#,
        story = story.trim(),
    )
}
