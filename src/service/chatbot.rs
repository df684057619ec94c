//! Keyword responder behind the chat widget.
//!
//! Input is matched against an ordered table of topics; the first topic with
//! a keyword contained in the lowercased message wins. Announcement and event
//! answers are rendered from live data, the rest are canned text.

use std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use crate::{
    domain::*,
    error::Result,
    policy::{self, Viewer},
    repository::{AnnouncementRepository, EventRepository},
};

const LISTED_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Announcements,
    Events,
    Help,
    Documents,
    Password,
    Greeting,
    Thanks,
    Fallback,
}

/// Evaluated top to bottom.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Announcements, &["announcement", "news", "お知らせ"]),
    (Topic::Events, &["event", "イベント", "calendar"]),
    (Topic::Help, &["help", "ヘルプ", "support"]),
    (
        Topic::Documents,
        &["document", "policy", "policies", "file", "ドキュメント", "書類", "ポリシー"],
    ),
    (Topic::Password, &["password", "パスワード"]),
    (Topic::Greeting, &["hello", "good morning", "こんにちは", "おはよう"]),
    (Topic::Thanks, &["thank", "ありがとう"]),
];

pub fn classify(message: &str) -> Topic {
    let lower = message.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Fallback)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotReply {
    pub response: String,
    pub suggested_actions: Vec<String>,
}

pub struct ChatbotService {
    announcement_repo: Arc<dyn AnnouncementRepository>,
    event_repo: Arc<dyn EventRepository>,
}

impl ChatbotService {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        event_repo: Arc<dyn EventRepository>,
    ) -> Self {
        Self { announcement_repo, event_repo }
    }

    pub async fn reply(
        &self,
        viewer: &Viewer,
        message: &str,
        language: Language,
        department: Department,
    ) -> Result<ChatbotReply> {
        let topic = classify(message);
        tracing::debug!("Chatbot topic {:?} for {}", topic, viewer.id);

        let scoped = viewer.in_department(department);

        let response = match topic {
            Topic::Announcements => {
                let filter = AnnouncementFilter {
                    department: Some(department),
                    status: Some(AnnouncementStatus::Approved),
                    ..Default::default()
                };
                let titles: Vec<String> = self
                    .announcement_repo
                    .list()
                    .await?
                    .into_iter()
                    .filter(|a| filter.matches(a) && policy::can_view_announcement(&scoped, a))
                    .take(LISTED_ITEMS)
                    .map(|a| localized(language, &a.title, a.title_ja.as_deref()).to_string())
                    .collect();

                render_list(
                    language,
                    ("Here are the latest announcements:", "最新のお知らせは以下の通りです："),
                    ("There are no announcements right now.", "現在お知らせはありません。"),
                    &titles,
                )
            }
            Topic::Events => {
                let now = Utc::now();
                let filter = EventFilter {
                    department: Some(department),
                    upcoming: true,
                    limit: None,
                };
                let titles: Vec<String> = self
                    .event_repo
                    .list()
                    .await?
                    .into_iter()
                    .filter(|e| filter.matches(e, now) && policy::can_view(&scoped, e.department))
                    .take(LISTED_ITEMS)
                    .map(|e| localized(language, &e.title, e.title_ja.as_deref()).to_string())
                    .collect();

                render_list(
                    language,
                    ("Upcoming events:", "今後のイベント："),
                    ("There are no upcoming events.", "予定されているイベントはありません。"),
                    &titles,
                )
            }
            other => canned(other, language).to_string(),
        };

        Ok(ChatbotReply {
            response,
            suggested_actions: suggested_actions(language),
        })
    }
}

fn render_list(
    language: Language,
    heading: (&str, &str),
    empty: (&str, &str),
    items: &[String],
) -> String {
    if items.is_empty() {
        return localized(language, empty.0, Some(empty.1)).to_string();
    }

    let bullets = items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}", localized(language, heading.0, Some(heading.1)), bullets)
}

fn canned(topic: Topic, language: Language) -> &'static str {
    let (en, ja) = match topic {
        Topic::Help => (
            "I can help you with:\n\n• Finding announcements\n• Event information\n• Department info\n• Company policies",
            "お手伝いできることは以下の通りです：\n\n• お知らせの検索\n• イベント情報\n• 部署情報\n• 会社ポリシー",
        ),
        Topic::Documents => (
            "Company policies and shared files are in the Documents section. You can search by name or browse by folder.",
            "会社のポリシーや共有ファイルはドキュメントセクションにあります。名前で検索するか、フォルダから参照できます。",
        ),
        Topic::Password => (
            "To reset your password, open a help ticket with IT Support or use the Microsoft account self-service portal.",
            "パスワードをリセットするには、ITサポートにヘルプチケットを作成するか、Microsoftアカウントのセルフサービスポータルをご利用ください。",
        ),
        Topic::Greeting => (
            "Hello! I'm your Company Assistant. How can I help you today?",
            "こんにちは！会社アシスタントです。本日はどのようなご用件でしょうか？",
        ),
        Topic::Thanks => (
            "You're welcome! Let me know if there is anything else I can help with.",
            "どういたしまして！他にもお手伝いできることがあればお知らせください。",
        ),
        _ => (
            "Thank you for your question. Please ask about announcements, events, or type \"help\" for more options.",
            "ご質問ありがとうございます。お知らせ、イベント、またはヘルプについてお尋ねください。",
        ),
    };

    match language {
        Language::En => en,
        Language::Ja => ja,
    }
}

fn suggested_actions(language: Language) -> Vec<String> {
    let actions: [&str; 3] = match language {
        Language::En => ["View announcements", "Check events", "Get help"],
        Language::Ja => ["お知らせを見る", "イベントを確認", "ヘルプ"],
    };
    actions.iter().map(|a| a.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_question() {
        assert_eq!(classify("What are the latest announcements?"), Topic::Announcements);
        assert_eq!(classify("最新のお知らせを教えて"), Topic::Announcements);
        assert_eq!(classify("Any NEWS today?"), Topic::Announcements);
    }

    #[test]
    fn test_rule_order_decides_overlaps() {
        assert_eq!(classify("help with events"), Topic::Events);
        assert_eq!(classify("thank you for the announcement"), Topic::Announcements);
        assert_eq!(classify("I need support with my password"), Topic::Help);
        assert_eq!(classify("hello, where is the travel policy?"), Topic::Documents);
    }

    #[test]
    fn test_each_topic_reachable() {
        assert_eq!(classify("Show me the calendar"), Topic::Events);
        assert_eq!(classify("ヘルプ"), Topic::Help);
        assert_eq!(classify("Where is the expense file"), Topic::Documents);
        assert_eq!(classify("パスワードを忘れました"), Topic::Password);
        assert_eq!(classify("Good morning!"), Topic::Greeting);
        assert_eq!(classify("ありがとう"), Topic::Thanks);
        assert_eq!(classify("What's for lunch?"), Topic::Fallback);
        assert_eq!(classify(""), Topic::Fallback);
    }

    #[test]
    fn test_canned_replies_are_localized() {
        assert!(canned(Topic::Help, Language::En).starts_with("I can help you with:"));
        assert!(canned(Topic::Help, Language::Ja).starts_with("お手伝いできること"));
        assert!(canned(Topic::Fallback, Language::En).contains("type \"help\""));
    }

    #[test]
    fn test_render_list() {
        let items = vec!["Town hall".to_string(), "Offsite".to_string()];
        assert_eq!(
            render_list(Language::En, ("Upcoming events:", "今後のイベント："), ("none", "なし"), &items),
            "Upcoming events:\n\n• Town hall\n• Offsite"
        );
        assert_eq!(
            render_list(Language::Ja, ("Upcoming events:", "今後のイベント："), ("none", "なし"), &[]),
            "なし"
        );
    }

    #[test]
    fn test_suggested_actions() {
        assert_eq!(suggested_actions(Language::En), vec!["View announcements", "Check events", "Get help"]);
        assert_eq!(suggested_actions(Language::Ja).len(), 3);
    }
}
