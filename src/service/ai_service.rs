use std::time::Duration;
use crate::{
    domain::*,
    error::Result,
};

const GENERATION_CONFIDENCE: f64 = 0.95;
const SUMMARY_CHARS: usize = 100;

/// Ordered; the first rule with a hit decides.
const PRIORITY_RULES: &[(Priority, f64, &[&str])] = &[
    (Priority::Urgent, 0.95, &["urgent", "emergency", "緊急"]),
    (Priority::Ceo, 0.90, &["ceo", "executive", "社長"]),
    (Priority::Deadline, 0.85, &["deadline", "due", "締め切り"]),
    (Priority::Important, 0.80, &["important", "重要"]),
    (Priority::Event, 0.75, &["event", "meeting", "イベント"]),
];

const FALLBACK_CONFIDENCE: f64 = 0.70;

/// Stand-in for the hosted language model: deterministic templates behind an
/// artificial latency.
pub struct AiService {
    delay: Duration,
}

impl AiService {
    pub fn new(simulated_delay_ms: u64) -> Self {
        Self { delay: Duration::from_millis(simulated_delay_ms) }
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedContent> {
        self.simulate_latency().await;

        let generated_content = render(request.kind, &request.content, request.target_language);
        let suggested_priority = prioritize("", &request.content).priority;

        Ok(GeneratedContent {
            generated_content,
            confidence: GENERATION_CONFIDENCE,
            suggested_priority,
        })
    }

    pub async fn prioritize(&self, request: &PrioritizeRequest) -> Result<PriorityAssessment> {
        Ok(prioritize(&request.title, &request.content))
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

pub fn prioritize(title: &str, content: &str) -> PriorityAssessment {
    let text = format!("{} {}", title, content).to_lowercase();

    let (priority, confidence) = PRIORITY_RULES
        .iter()
        .find(|(_, _, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(priority, confidence, _)| (*priority, *confidence))
        .unwrap_or((Priority::General, FALLBACK_CONFIDENCE));

    PriorityAssessment {
        priority,
        confidence,
        reasoning: format!("Detected keywords suggesting {} priority", priority.as_str()),
    }
}

fn render(kind: GenerationKind, content: &str, language: Language) -> String {
    match (kind, language) {
        (GenerationKind::Translate, Language::En) => format!("[Translated] {}", content),
        (GenerationKind::Translate, Language::Ja) => format!("【翻訳】{}", content),
        (GenerationKind::Summarize, lang) => {
            let head: String = content.chars().take(SUMMARY_CHARS).collect();
            match lang {
                Language::En => format!("[Summary] {}...", head),
                Language::Ja => format!("【要約】{}...", head),
            }
        }
        (GenerationKind::Announcement, Language::En) => format!(
            "[AI Generated Announcement]\n\n{}\n\nFor more details, please contact the relevant department.",
            content
        ),
        (GenerationKind::Announcement, Language::Ja) => format!(
            "【AI生成お知らせ】\n\n{}\n\n詳細については、担当部署にお問い合わせください。",
            content
        ),
    }
}
