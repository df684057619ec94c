mod common;

use atrium::{
    db,
    domain::{
        Announcement, AnnouncementStatus, Department, HelpTicket, NewNotification,
        NotificationType, Priority, TicketPriority, TicketResponse, TicketStatus,
    },
    repository::{
        AnnouncementRepository, NotificationRepository, SqliteAnnouncementRepository,
        SqliteNotificationRepository, SqliteTicketRepository, TicketRepository,
    },
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

async fn pool() -> anyhow::Result<SqlitePool> {
    Ok(db::connect(&common::test_settings().database).await?)
}

fn announcement(title: &str, status: AnnouncementStatus, age_hours: i64) -> Announcement {
    let created_at = Utc::now() - Duration::hours(age_hours);
    Announcement {
        id: Uuid::new_v4(),
        title: title.to_string(),
        title_ja: Some(format!("{}（日本語）", title)),
        content: "Body".to_string(),
        content_ja: None,
        priority: Priority::Important,
        department: Department::Engineering,
        status,
        author: "Test Author".to_string(),
        author_id: Uuid::new_v4(),
        image_url: None,
        is_ai_generated: false,
        ai_overridden: false,
        reviewed_by: None,
        reviewed_at: None,
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn test_announcement_crud() -> anyhow::Result<()> {
    let repo = SqliteAnnouncementRepository::new(pool().await?);

    let created = repo.create(announcement("Older", AnnouncementStatus::Pending, 5)).await?;
    repo.create(announcement("Newer", AnnouncementStatus::Approved, 1)).await?;

    assert_eq!(created.status, AnnouncementStatus::Pending);
    assert_eq!(created.department, Department::Engineering);
    assert_eq!(created.title_ja.as_deref(), Some("Older（日本語）"));

    // Newest first
    let all = repo.list().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Newer");

    let pending = repo.list_by_status(AnnouncementStatus::Pending).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, created.id);

    let reviewer = Uuid::new_v4();
    let reviewed_at = Utc::now();
    let updated = repo
        .update(
            created.id,
            Announcement {
                status: AnnouncementStatus::Approved,
                reviewed_by: Some(reviewer),
                reviewed_at: Some(reviewed_at),
                ..created.clone()
            },
        )
        .await?;
    assert_eq!(updated.status, AnnouncementStatus::Approved);
    assert_eq!(updated.reviewed_by, Some(reviewer));
    assert!(updated.reviewed_at.is_some());

    repo.delete(created.id).await?;
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_ticket_responses_keep_order() -> anyhow::Result<()> {
    let repo = SqliteTicketRepository::new(pool().await?);
    let requester = Uuid::new_v4();
    let now = Utc::now();

    let ticket = repo
        .create(HelpTicket {
            id: Uuid::new_v4(),
            title: "Printer jam".to_string(),
            description: "Third floor printer".to_string(),
            category: "Facilities".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Low,
            created_by: requester,
            created_by_name: "Requester".to_string(),
            created_at: now,
            updated_at: now,
            responses: Vec::new(),
        })
        .await?;
    assert!(ticket.responses.is_empty());

    for (i, content) in ["First", "Second", "Third"].iter().enumerate() {
        repo.add_response(
            ticket.id,
            TicketResponse {
                seq: 0,
                id: Uuid::new_v4(),
                author_id: requester,
                author_name: "Requester".to_string(),
                content: content.to_string(),
                is_staff: i == 1,
                created_at: now,
            },
        )
        .await?;
    }

    let loaded = repo.find_by_id(ticket.id).await?.ok_or_else(|| anyhow::anyhow!("missing"))?;
    let contents: Vec<&str> = loaded.responses.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["First", "Second", "Third"]);
    assert!(loaded.responses[1].is_staff);
    assert!(loaded.responses.windows(2).all(|w| w[0].seq < w[1].seq));

    let closed = repo.update_status(ticket.id, TicketStatus::Closed).await?;
    assert_eq!(closed.status, TicketStatus::Closed);
    assert_eq!(closed.responses.len(), 3);

    assert_eq!(repo.list_by_creator(requester).await?.len(), 1);
    assert!(repo.list_by_creator(Uuid::new_v4()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_notification_read_state() -> anyhow::Result<()> {
    let repo = SqliteNotificationRepository::new(pool().await?);
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    let template = NewNotification {
        title: "Heads up".to_string(),
        title_ja: None,
        message: "Something happened".to_string(),
        message_ja: None,
        notification_type: NotificationType::System,
        link: None,
    };

    let inserted = repo
        .create_many(vec![
            template.for_user(user),
            template.for_user(user),
            template.for_user(other),
        ])
        .await?;
    assert_eq!(inserted, 3);
    assert_eq!(repo.unread_count(user).await?, 2);

    let first = repo.list_for_user(user, false).await?[0].clone();
    repo.mark_read(first.id).await?;
    assert_eq!(repo.unread_count(user).await?, 1);
    assert_eq!(repo.list_for_user(user, true).await?.len(), 1);

    assert_eq!(repo.mark_all_read(user).await?, 1);
    assert_eq!(repo.unread_count(user).await?, 0);
    assert_eq!(repo.unread_count(other).await?, 1);

    repo.delete(first.id).await?;
    assert!(repo.find_by_id(first.id).await?.is_none());

    Ok(())
}
