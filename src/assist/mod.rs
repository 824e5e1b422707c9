pub mod api;

use api::{
    absence_reason,
    extract_text,
    ExtractedText,
    GenerateBackend,
    GenerationConfig,
    GeminiBackend,
};

use crate::core::OboeruError;

pub const GRAMMAR_FALLBACK: &str = "Мэдээлэл авахад алдаа гарлаа. Дахин оролдоно уу.";
pub const MNEMONIC_FALLBACK: &str = "Түүх олдсонгүй.";

const GRAMMAR_SECTIONS: [&str; 7] = [
    "## Бүтэц",
    "## Утга",
    "## Хэрэглээ",
    "## Жишээ өгүүлбэр",
    "## Анхаарах зүйл",
    "## Түгээмэл алдаа",
    "## Дүгнэлт",
];

const MNEMONIC_SECTIONS: [&str; 2] = ["## Түүх", "## Санамж"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistKind {
    GrammarExplanation,
    MnemonicStory,
}

impl AssistKind {
    pub fn fallback(&self) -> &'static str {
        match self {
            AssistKind::GrammarExplanation => GRAMMAR_FALLBACK,
            AssistKind::MnemonicStory => MNEMONIC_FALLBACK,
        }
    }

    pub fn required_sections(&self) -> &'static [&'static str] {
        match self {
            AssistKind::GrammarExplanation => &GRAMMAR_SECTIONS,
            AssistKind::MnemonicStory => &MNEMONIC_SECTIONS,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AssistKind::GrammarExplanation => "Grammar explanation",
            AssistKind::MnemonicStory => "Mnemonic story",
        }
    }

    // Explanations should be repeatable reference text, stories benefit
    // from a looser sampling.
    fn generation_config(&self) -> GenerationConfig {
        match self {
            AssistKind::GrammarExplanation => {
                GenerationConfig { temperature: 0.4, top_p: 0.9, max_output_tokens: 1024 }
            }
            AssistKind::MnemonicStory => {
                GenerationConfig { temperature: 0.9, top_p: 0.95, max_output_tokens: 512 }
            }
        }
    }

    fn section_outline(&self) -> String {
        self.required_sections().join("\n")
    }

    fn prompt(&self, subject: &str) -> String {
        match self {
            AssistKind::GrammarExplanation => format!(
                "Япон хэлний N4 түвшний \"{}\" гэх дүрмийн бүтцийг Монгол хэлээр маш ойлгомжтой \
                 тайлбарлаж өгнө үү. Жишээ өгүүлбэрүүд болон ямар тохиолдолд хэрэглэдэг болохыг \
                 оруулна уу. JSON биш, Markdown форматаар хариулна уу.\n\n\
                 Хариултаа яг дараах гарчигтай хэсгүүдэд хуваан бичнэ үү:\n\n{}",
                subject,
                self.section_outline()
            ),
            AssistKind::MnemonicStory => format!(
                "\"{}\" гэх ханзыг цээжлэхэд туслах хөгжилтэй эсвэл сонирхолтой богино түүх \
                 (mnemonic story) Монгол хэлээр зохиож өгнө үү.\n\n\
                 Хариултаа яг дараах гарчигтай хэсгүүдэд хуваан бичнэ үү:\n\n{}",
                subject,
                self.section_outline()
            ),
        }
    }

    fn repair_prompt(&self, original: &str) -> String {
        format!(
            "Доорх хариултын агуулгыг хэвээр үлдээж, яг дараах гарчигтай хэсгүүдэд хуваан \
             дахин форматлаж өгнө үү:\n\n{}\n\nХариулт:\n{}",
            self.section_outline(),
            original
        )
    }
}

/// A response is well formed when every required section marker appears in
/// the text. Order and surrounding content are not checked.
pub fn has_required_sections(text: &str, sections: &[&str]) -> bool {
    sections.iter().all(|section| text.contains(section))
}

async fn run_generation<B: GenerateBackend>(
    backend: &B,
    kind: AssistKind,
    subject: &str,
) -> Result<String, OboeruError> {
    let config = kind.generation_config();

    let response = backend.generate(&kind.prompt(subject), config).await?;
    let text = match extract_text(&response) {
        ExtractedText::Direct(text) | ExtractedText::Fragments(text) => text,
        ExtractedText::Absent => {
            eprintln!("{} response had no text ({})", kind.label(), absence_reason(&response));
            return Err(OboeruError::EmptyAssistResponse);
        }
    };

    if has_required_sections(&text, kind.required_sections()) {
        return Ok(text);
    }

    // One repair round, and its output is final. A model that cannot follow
    // the outline still produces a readable answer this way.
    let repair = backend.generate(&kind.repair_prompt(&text), config).await?;
    match extract_text(&repair) {
        ExtractedText::Direct(text) | ExtractedText::Fragments(text) => Ok(text),
        ExtractedText::Absent => {
            eprintln!("{} repair had no text ({})", kind.label(), absence_reason(&repair));
            Err(OboeruError::EmptyAssistResponse)
        }
    }
}

async fn resolve<B: GenerateBackend>(backend: &B, kind: AssistKind, subject: &str) -> String {
    match run_generation(backend, kind, subject).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{} request failed: {}", kind.label(), e);
            kind.fallback().to_string()
        }
    }
}

/// Client the UI talks to. Requests always produce displayable text, so
/// callers never need an error path.
pub struct AssistClient {
    backend: Option<GeminiBackend>,
}

impl AssistClient {
    /// Reads `GEMINI_API_KEY` from the environment. Without a key the
    /// client still works, every request just resolves to its fallback.
    pub fn from_env() -> Self {
        let backend = match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => match GeminiBackend::new(key) {
                Ok(backend) => Some(backend),
                Err(e) => {
                    eprintln!("Failed to build the text service client: {}", e);
                    None
                }
            },
            _ => {
                println!("GEMINI_API_KEY is not set. AI assist is disabled.");
                None
            }
        };

        Self { backend }
    }

    pub fn available(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn grammar_explanation(&self, pattern: &str) -> String {
        self.request(AssistKind::GrammarExplanation, pattern).await
    }

    pub async fn mnemonic_story(&self, glyph: &str) -> String {
        self.request(AssistKind::MnemonicStory, glyph).await
    }

    async fn request(&self, kind: AssistKind, subject: &str) -> String {
        match &self.backend {
            Some(backend) => resolve(backend, kind, subject).await,
            None => kind.fallback().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::VecDeque,
        future::Future,
    };

    use super::{
        api::{Candidate, GenerateResponse},
        *,
    };

    struct ScriptedBackend {
        responses: RefCell<VecDeque<Result<GenerateResponse, OboeruError>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<GenerateResponse, OboeruError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into_iter().collect()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn prompt_count(&self) -> usize {
            self.prompts.borrow().len()
        }
    }

    impl GenerateBackend for ScriptedBackend {
        fn generate(
            &self,
            prompt: &str,
            _config: GenerationConfig,
        ) -> impl Future<Output = Result<GenerateResponse, OboeruError>> {
            self.prompts.borrow_mut().push(prompt.to_string());
            let next = self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("Scripted backend ran out of responses");
            async move { next }
        }
    }

    fn direct(text: &str) -> Result<GenerateResponse, OboeruError> {
        Ok(GenerateResponse {
            text: Some(text.to_string()),
            candidates: Vec::new(),
            prompt_feedback: None,
        })
    }

    fn contentless(finish_reason: &str) -> Result<GenerateResponse, OboeruError> {
        Ok(GenerateResponse {
            text: None,
            candidates: vec![Candidate {
                content: None,
                finish_reason: Some(finish_reason.to_string()),
            }],
            prompt_feedback: None,
        })
    }

    fn structured_grammar_text() -> String {
        GRAMMAR_SECTIONS.iter().map(|section| format!("{}\nАгуулга.\n", section)).collect()
    }

    #[tokio::test]
    async fn test_structured_response_needs_no_repair() {
        let text = structured_grammar_text();
        let backend = ScriptedBackend::new(vec![direct(&text)]);

        let result =
            run_generation(&backend, AssistKind::GrammarExplanation, "〜そうです").await.unwrap();

        assert_eq!(result, text);
        assert_eq!(backend.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_gets_exactly_one_repair() {
        let unstructured = "Зүгээр л нэг бичвэр.";
        let repaired = "## Түүх\nТүүх энд.\n## Санамж\nСанамж энд.";
        let backend = ScriptedBackend::new(vec![direct(unstructured), direct(repaired)]);

        let result = run_generation(&backend, AssistKind::MnemonicStory, "会").await.unwrap();

        assert_eq!(result, repaired);
        assert_eq!(backend.prompt_count(), 2);

        // The repair prompt embeds the malformed answer verbatim.
        let prompts = backend.prompts.borrow();
        assert!(prompts[1].contains(unstructured));
    }

    #[tokio::test]
    async fn test_repair_result_used_even_if_still_malformed() {
        let backend = ScriptedBackend::new(vec![
            direct("Гарчиггүй хариулт."),
            direct("Дахиад л гарчиггүй."),
        ]);

        let result = run_generation(&backend, AssistKind::MnemonicStory, "同").await.unwrap();

        // No third request: the repair output is final.
        assert_eq!(result, "Дахиад л гарчиггүй.");
        assert_eq!(backend.prompt_count(), 2);
    }

    #[tokio::test]
    async fn test_contentless_response_fails_without_repair() {
        let backend = ScriptedBackend::new(vec![contentless("SAFETY")]);

        let result = run_generation(&backend, AssistKind::GrammarExplanation, "〜たら").await;

        if let Err(OboeruError::EmptyAssistResponse) = result {
            assert_eq!(backend.prompt_count(), 1);
        } else {
            panic!("Expected EmptyAssistResponse, got {:?}", result);
        }
    }

    #[tokio::test]
    async fn test_failed_request_resolves_to_fallback() {
        let backend = ScriptedBackend::new(vec![Err(OboeruError::Custom(
            "Text service returned HTTP 503".to_string(),
        ))]);

        let text = resolve(&backend, AssistKind::GrammarExplanation, "〜ば").await;

        assert_eq!(text, GRAMMAR_FALLBACK);
    }

    #[tokio::test]
    async fn test_failed_repair_resolves_to_fallback() {
        let backend = ScriptedBackend::new(vec![
            direct("Гарчиггүй хариулт."),
            Err(OboeruError::Custom("Text service returned HTTP 500".to_string())),
        ]);

        let text = resolve(&backend, AssistKind::MnemonicStory, "事").await;

        assert_eq!(text, MNEMONIC_FALLBACK);
        assert_eq!(backend.prompt_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_client_returns_fallbacks() {
        let client = AssistClient { backend: None };

        assert!(!client.available());
        assert_eq!(client.grammar_explanation("〜のに").await, GRAMMAR_FALLBACK);
        assert_eq!(client.mnemonic_story("力").await, MNEMONIC_FALLBACK);
    }

    #[test]
    fn test_section_validation_requires_every_marker() {
        let complete = "## Түүх\nНэг түүх.\n## Санамж\nНэг санамж.";
        let partial = "## Түүх\nНэг түүх.";

        assert!(has_required_sections(complete, &MNEMONIC_SECTIONS));
        assert!(!has_required_sections(partial, &MNEMONIC_SECTIONS));
        assert!(has_required_sections("", &[]));
    }

    #[test]
    fn test_prompts_name_subject_and_sections() {
        let prompt = AssistKind::GrammarExplanation.prompt("〜ておきます");

        assert!(prompt.contains("〜ておきます"));
        for section in GRAMMAR_SECTIONS {
            assert!(prompt.contains(section));
        }
    }
}
