//! Story Command Handlers - 连续性编排
//!
//! 生成下一章：读历史 → 构造提示词 → 调用模型 → 解析章节 →
//! 第二次调用生成摘要（失败时使用兜底文本）→ 追加到存储。
//! 整个过程持有该故事的互斥锁，同一故事的并发请求按顺序执行。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::commands::GenerateChapter;
use crate::application::error::ApplicationError;
use crate::application::ports::{StoryStorePort, TextGeneratorPort};
use crate::domain::parser::{parse_chapter, parse_summary};
use crate::domain::prompt::{chapter_prompt, summary_prompt, ChapterPromptContext};
use crate::domain::story::{previous_chapters_summary, ChapterNumber, NewChapter, StoryId};

/// 摘要调用失败或无法解析时的兜底摘要
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable for this chapter.";

/// 生成章节响应
#[derive(Debug, Clone)]
pub struct GenerateChapterResponse {
    pub story_id: StoryId,
    pub chapter_number: ChapterNumber,
    pub content: String,
    pub total_chapters: usize,
}

type StoryLocks = DashMap<StoryId, Arc<Mutex<()>>>;

/// 离开作用域时移除无人持有的锁条目，锁表大小只随进行中的请求增长
struct LockRelease<'a> {
    locks: &'a StoryLocks,
    story_id: &'a StoryId,
}

impl Drop for LockRelease<'_> {
    fn drop(&mut self) {
        self.locks
            .remove_if(self.story_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// GenerateChapter Handler
pub struct GenerateChapterHandler {
    generator: Arc<dyn TextGeneratorPort>,
    store: Arc<dyn StoryStorePort>,
    locks: StoryLocks,
}

impl GenerateChapterHandler {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, store: Arc<dyn StoryStorePort>) -> Self {
        Self {
            generator,
            store,
            locks: DashMap::new(),
        }
    }

    fn story_lock(&self, story_id: &StoryId) -> Arc<Mutex<()>> {
        self.locks
            .entry(story_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn handle(&self, command: GenerateChapter) -> Result<GenerateChapterResponse, ApplicationError> {
        let story_id = match command.story_id {
            Some(id) => StoryId::parse(id)?,
            None => StoryId::generate(),
        };

        // 析构顺序：先释放互斥锁，再丢弃 Arc，最后清理条目
        let _release = LockRelease {
            locks: &self.locks,
            story_id: &story_id,
        };
        let lock = self.story_lock(&story_id);
        let _guard = lock.lock().await;

        let history = self.store.history(&story_id).await?;
        let chapter_number = ChapterNumber::after(history.len());
        let previous = previous_chapters_summary(&history);

        let prompt = chapter_prompt(&ChapterPromptContext {
            params: &command.params,
            chapter_number,
            previous_chapters_summary: Some(&previous),
        });

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::error!(
                story_id = %story_id,
                chapter_number = %chapter_number,
                error = %e,
                "Chapter generation failed"
            );
            e
        })?;

        let parsed = parse_chapter(&raw);
        if parsed.is_degraded() {
            tracing::debug!(story_id = %story_id, "Chapter parsed from plain text");
        }
        let chapter_text = parsed.into_inner();

        let summary = self.summarize(&story_id, &chapter_text.content).await;
        let chapter = self
            .store
            .append(&story_id, NewChapter::new(chapter_text.content, summary)?)
            .await?;
        let total_chapters = self.store.count(&story_id).await?;

        tracing::info!(
            story_id = %story_id,
            chapter_number = %chapter.number(),
            total_chapters = total_chapters,
            "Chapter generated"
        );

        Ok(GenerateChapterResponse {
            story_id: story_id.clone(),
            chapter_number: chapter.number(),
            content: chapter.content().to_string(),
            total_chapters,
        })
    }

    /// 第二次模型调用：生成摘要。失败时降级为兜底文本，不中断章节生成
    async fn summarize(&self, story_id: &StoryId, content: &str) -> String {
        let raw = match self.generator.generate(&summary_prompt(content)).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(story_id = %story_id, error = %e, "Summary generation failed, using fallback");
                return SUMMARY_UNAVAILABLE.to_string();
            }
        };

        parse_summary(&raw)
            .into_inner()
            .unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;
    use crate::domain::prompt::StoryParams;
    use crate::domain::story::FIRST_CHAPTER_SENTINEL;
    use crate::infrastructure::adapters::FakeTextGenerator;
    use crate::infrastructure::memory::InMemoryStoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn params() -> StoryParams {
        StoryParams {
            main_character: "Mira".to_string(),
            setting: "A drowned city".to_string(),
            genre: "fantasy".to_string(),
            tone: "hopeful".to_string(),
            additional_details: None,
        }
    }

    fn command(story_id: Option<&str>) -> GenerateChapter {
        GenerateChapter {
            story_id: story_id.map(str::to_string),
            params: params(),
        }
    }

    /// 章节提示词返回编号正文，摘要提示词返回编号摘要
    fn story_generator() -> FakeTextGenerator {
        let chapters = AtomicUsize::new(0);
        let summaries = AtomicUsize::new(0);
        FakeTextGenerator::new(move |prompt| {
            if prompt.starts_with("Summarize") {
                let n = summaries.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(format!("Summary: Mira's step {}.", n))
            } else {
                let n = chapters.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(format!("Chapter body {}.", n))
            }
        })
    }

    fn handler(generator: FakeTextGenerator) -> (GenerateChapterHandler, Arc<FakeTextGenerator>, Arc<InMemoryStoryStore>) {
        let generator = Arc::new(generator);
        let store = Arc::new(InMemoryStoryStore::new());
        (
            GenerateChapterHandler::new(generator.clone(), store.clone()),
            generator,
            store,
        )
    }

    #[tokio::test]
    async fn test_successive_chapters_are_numbered_contiguously() {
        let (handler, _, store) = handler(story_generator());

        let first = handler.handle(command(Some("s1"))).await.unwrap();
        assert_eq!(first.chapter_number.value(), 1);
        assert_eq!(first.total_chapters, 1);
        assert_eq!(first.content, "Chapter body 1.");

        let second = handler.handle(command(Some("s1"))).await.unwrap();
        assert_eq!(second.chapter_number.value(), 2);
        assert_eq!(second.total_chapters, 2);

        let history = store.history(&StoryId::parse("s1").unwrap()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].summary(), "Mira's step 1.");
        assert_eq!(history[1].summary(), "Mira's step 2.");
    }

    #[tokio::test]
    async fn test_first_prompt_uses_sentinel_and_later_prompts_use_history() {
        let (handler, generator, _) = handler(story_generator());

        handler.handle(command(Some("s1"))).await.unwrap();
        handler.handle(command(Some("s1"))).await.unwrap();

        let chapter_prompts: Vec<String> = generator
            .prompts()
            .await
            .into_iter()
            .filter(|p| p.starts_with("Create chapter"))
            .collect();
        assert!(chapter_prompts[0].contains(FIRST_CHAPTER_SENTINEL));
        assert!(!chapter_prompts[1].contains(FIRST_CHAPTER_SENTINEL));
        assert!(chapter_prompts[1].contains("Chapter 1: Mira's step 1."));
        assert!(chapter_prompts[1].starts_with("Create chapter 2"));
    }

    #[tokio::test]
    async fn test_missing_story_id_generates_one() {
        let (handler, _, _) = handler(story_generator());
        let response = handler.handle(command(None)).await.unwrap();
        assert!(!response.story_id.as_str().is_empty());
        assert_eq!(response.chapter_number, ChapterNumber::FIRST);
    }

    #[tokio::test]
    async fn test_summary_failure_uses_fallback() {
        let generator = FakeTextGenerator::new(|prompt| {
            if prompt.starts_with("Summarize") {
                Err(GenerationError::Timeout)
            } else {
                Ok("The tide rose.".to_string())
            }
        });
        let (handler, _, store) = handler(generator);

        let response = handler.handle(command(Some("s1"))).await.unwrap();
        assert_eq!(response.total_chapters, 1);

        let history = store.history(&StoryId::parse("s1").unwrap()).await.unwrap();
        assert_eq!(history[0].summary(), SUMMARY_UNAVAILABLE);
        assert_eq!(history[0].content(), "The tide rose.");
    }

    #[tokio::test]
    async fn test_chapter_failure_stores_nothing() {
        let (handler, _, store) = handler(FakeTextGenerator::failing("quota exceeded"));

        let err = handler.handle(command(Some("s1"))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::GenerationFailed(_)));
        assert_eq!(store.count(&StoryId::parse("s1").unwrap()).await.unwrap(), 0);
        assert!(handler.locks.is_empty());
    }

    #[tokio::test]
    async fn test_blank_story_id_is_rejected() {
        let (handler, _, _) = handler(story_generator());
        let err = handler.handle(command(Some("   "))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_concurrent_requests_for_one_story_are_serialized() {
        let generator = story_generator().with_delay(Duration::from_millis(5));
        let (handler, generator, store) = handler(generator);
        let handler = Arc::new(handler);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = handler.clone();
                tokio::spawn(async move { handler.handle(command(Some("race"))).await.unwrap() })
            })
            .collect();

        let mut numbers = Vec::new();
        for task in tasks {
            numbers.push(task.await.unwrap().chapter_number.value());
        }
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=8).collect::<Vec<u32>>());

        // 每个章节提示词都看到了完整的前序历史
        let prompts = generator.prompts().await;
        for n in 2..=8 {
            let prompt = prompts
                .iter()
                .find(|p| p.starts_with(&format!("Create chapter {} ", n)))
                .unwrap();
            assert!(prompt.contains(&format!("Chapter {}:", n - 1)));
        }
        assert_eq!(store.count(&StoryId::parse("race").unwrap()).await.unwrap(), 8);
        assert!(handler.locks.is_empty());
    }
}
