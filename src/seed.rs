//! Demo directory and content loaded into a fresh store.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    domain::*,
    error::Result,
    service::ServiceContext,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSummary {
    pub users: usize,
    pub announcements: usize,
    pub events: usize,
    pub notifications: usize,
    pub documents: usize,
    pub tickets: usize,
    pub teams: usize,
}

struct DemoUser {
    name: &'static str,
    email: &'static str,
    role: Role,
    department: Department,
    job_title: &'static str,
    location: &'static str,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "John Smith",
        email: "john.smith@company.com",
        role: Role::Admin,
        department: Department::Engineering,
        job_title: "Senior Engineer",
        location: "Tokyo, Japan",
    },
    DemoUser {
        name: "Akiko Tanaka",
        email: "akiko.tanaka@company.com",
        role: Role::Ceo,
        department: Department::Operations,
        job_title: "Chief Executive Officer",
        location: "Tokyo, Japan",
    },
    DemoUser {
        name: "Maria Garcia",
        email: "maria.garcia@company.com",
        role: Role::Employee,
        department: Department::Marketing,
        job_title: "Marketing Manager",
        location: "Osaka, Japan",
    },
    DemoUser {
        name: "Kenji Sato",
        email: "kenji.sato@company.com",
        role: Role::Employee,
        department: Department::Engineering,
        job_title: "Software Engineer",
        location: "Tokyo, Japan",
    },
    DemoUser {
        name: "Emily Chen",
        email: "emily.chen@company.com",
        role: Role::Employee,
        department: Department::Hr,
        job_title: "HR Business Partner",
        location: "Singapore",
    },
    DemoUser {
        name: "David Brown",
        email: "david.brown@company.com",
        role: Role::Employee,
        department: Department::Sales,
        job_title: "Account Executive",
        location: "New York, USA",
    },
    DemoUser {
        name: "Yuki Yamamoto",
        email: "yuki.yamamoto@company.com",
        role: Role::Employee,
        department: Department::Finance,
        job_title: "Financial Analyst",
        location: "Tokyo, Japan",
    },
];

/// Load the demo fixtures. A store that already has users is left alone.
pub async fn seed_demo_data(ctx: &ServiceContext) -> Result<SeedSummary> {
    if !ctx.user_repo.list().await?.is_empty() {
        tracing::info!("Store already populated, skipping demo data");
        return Ok(SeedSummary::default());
    }

    let now = Utc::now();
    let mut summary = SeedSummary::default();

    let mut users = Vec::with_capacity(DEMO_USERS.len());
    for demo in DEMO_USERS {
        let user = ctx.user_repo.create(demo_user(demo, now)).await?;
        users.push(user);
    }
    summary.users = users.len();

    let admin = &users[0];
    let ceo = &users[1];
    let marketing = &users[2];
    let engineer = &users[3];

    let announcements = vec![
        announcement(
            ceo,
            ("Q4 Performance Update", Some("第4四半期業績のお知らせ")),
            ("Thank you all for an outstanding quarter. Revenue grew 18% year over year.", Some("素晴らしい四半期をありがとうございました。売上は前年比18%増加しました。")),
            Priority::Ceo,
            Department::All,
            AnnouncementStatus::Approved,
            now - Duration::days(1),
        ),
        announcement(
            admin,
            ("Scheduled System Maintenance", Some("システムメンテナンスのお知らせ")),
            ("The VPN will be unavailable Saturday 22:00-02:00 JST for upgrades.", Some("土曜日22:00〜02:00（日本時間）はアップグレードのためVPNが利用できません。")),
            Priority::Urgent,
            Department::All,
            AnnouncementStatus::Approved,
            now - Duration::days(2),
        ),
        announcement(
            engineer,
            ("New Code Review Guidelines", Some("新しいコードレビューガイドライン")),
            ("Every pull request now needs two approvals before merging to main.", None),
            Priority::Important,
            Department::Engineering,
            AnnouncementStatus::Approved,
            now - Duration::days(3),
        ),
        announcement(
            marketing,
            ("Brand Refresh Launch", Some("ブランドリニューアル")),
            ("Our new visual identity goes live next month. Templates are in Documents.", None),
            Priority::General,
            Department::Marketing,
            AnnouncementStatus::Approved,
            now - Duration::days(4),
        ),
        announcement(
            &users[6],
            ("Expense Report Deadline", Some("経費精算の締め切り")),
            ("Submit all expense reports for this month by the 25th.", Some("今月の経費精算は25日までに提出してください。")),
            Priority::Deadline,
            Department::All,
            AnnouncementStatus::Pending,
            now - Duration::hours(6),
        ),
        announcement(
            marketing,
            ("Office Party Ideas", None),
            ("Share your ideas for the year-end party in the marketing channel.", None),
            Priority::General,
            Department::Marketing,
            AnnouncementStatus::Rejected,
            now - Duration::days(6),
        ),
    ];

    for mut a in announcements {
        if a.status.is_terminal() {
            a.reviewed_by = Some(admin.id);
            a.reviewed_at = Some(a.created_at + Duration::hours(1));
        }
        ctx.announcement_repo.create(a).await?;
        summary.announcements += 1;
    }

    let events = vec![
        event(
            admin,
            ("All-Hands Meeting", Some("全社ミーティング")),
            "Quarterly company-wide meeting with leadership Q&A.",
            now + Duration::hours(20),
            Duration::hours(2),
            "Main Hall",
            Department::All,
            Some(RecurrencePattern::Monthly),
        ),
        event(
            admin,
            ("Engineering Tech Talk", Some("エンジニアリング技術勉強会")),
            "Deep dive into our new observability stack.",
            now + Duration::days(3),
            Duration::hours(1),
            "Room 4A",
            Department::Engineering,
            Some(RecurrencePattern::Biweekly),
        ),
        event(
            ceo,
            ("Sales Kickoff", Some("セールスキックオフ")),
            "Annual sales kickoff with goals for next year.",
            now + Duration::days(10),
            Duration::hours(6),
            "Tokyo Conference Center",
            Department::Sales,
            None,
        ),
        event(
            admin,
            ("Wellness Workshop", Some("ウェルネスワークショップ")),
            "Stress management and healthy work habits.",
            now - Duration::days(5),
            Duration::hours(2),
            "Online",
            Department::All,
            None,
        ),
    ];

    for e in events {
        ctx.event_repo.create(e).await?;
        summary.events += 1;
    }

    let welcome = NewNotification {
        title: "Welcome to the portal".to_string(),
        title_ja: Some("ポータルへようこそ".to_string()),
        message: "Check the latest announcements and upcoming events.".to_string(),
        message_ja: Some("最新のお知らせと今後のイベントをご確認ください。".to_string()),
        notification_type: NotificationType::System,
        link: Some("/announcements".to_string()),
    };
    let batch: Vec<Notification> = users.iter().map(|u| welcome.for_user(u.id)).collect();
    summary.notifications = ctx.notification_repo.create_many(batch).await? as usize;

    summary.documents = seed_documents(ctx, now).await?;

    let ticket = HelpTicket {
        id: Uuid::new_v4(),
        title: "Cannot connect to VPN".to_string(),
        description: "The VPN client times out when connecting from home.".to_string(),
        category: DEFAULT_TICKET_CATEGORY.to_string(),
        status: TicketStatus::Open,
        priority: TicketPriority::High,
        created_by: marketing.id,
        created_by_name: marketing.name.clone(),
        created_at: now - Duration::hours(3),
        updated_at: now - Duration::hours(3),
        responses: Vec::new(),
    };
    ctx.ticket_repo.create(ticket).await?;
    summary.tickets = 1;

    summary.teams = seed_teams(ctx, &users, now).await?;

    tracing::info!(
        "Seeded {} users, {} announcements, {} events, {} documents",
        summary.users,
        summary.announcements,
        summary.events,
        summary.documents
    );

    Ok(summary)
}

fn demo_user(demo: &DemoUser, now: DateTime<Utc>) -> User {
    User {
        id: Uuid::new_v4(),
        name: demo.name.to_string(),
        email: demo.email.to_string(),
        role: demo.role,
        department: demo.department,
        job_title: Some(demo.job_title.to_string()),
        location: Some(demo.location.to_string()),
        phone: None,
        bio: None,
        avatar_url: None,
        preferences: UserPreferences::default(),
        created_at: now,
        updated_at: now,
    }
}

fn announcement(
    author: &User,
    title: (&str, Option<&str>),
    content: (&str, Option<&str>),
    priority: Priority,
    department: Department,
    status: AnnouncementStatus,
    created_at: DateTime<Utc>,
) -> Announcement {
    Announcement {
        id: Uuid::new_v4(),
        title: title.0.to_string(),
        title_ja: title.1.map(str::to_string),
        content: content.0.to_string(),
        content_ja: content.1.map(str::to_string),
        priority,
        department,
        status,
        author: author.name.clone(),
        author_id: author.id,
        image_url: None,
        is_ai_generated: false,
        ai_overridden: false,
        reviewed_by: None,
        reviewed_at: None,
        created_at,
        updated_at: created_at,
    }
}

#[allow(clippy::too_many_arguments)]
fn event(
    creator: &User,
    title: (&str, Option<&str>),
    description: &str,
    start_at: DateTime<Utc>,
    length: Duration,
    location: &str,
    department: Department,
    recurrence: Option<RecurrencePattern>,
) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        title: title.0.to_string(),
        title_ja: title.1.map(str::to_string),
        description: description.to_string(),
        description_ja: None,
        start_at,
        end_at: start_at + length,
        location: location.to_string(),
        department,
        priority: Priority::Event,
        is_recurring: recurrence.is_some(),
        recurrence,
        reminder_sent: false,
        created_by: creator.id,
        created_at: now,
        updated_at: now,
    }
}

async fn seed_documents(ctx: &ServiceContext, now: DateTime<Utc>) -> Result<usize> {
    let folder = |name: &str, department: Department| Document {
        id: Uuid::new_v4(),
        parent_id: None,
        name: name.to_string(),
        kind: DocumentKind::Folder,
        size_bytes: None,
        url: None,
        department,
        created_at: now,
        updated_at: now,
    };

    let policies = ctx.document_repo.create(folder("Company Policies", Department::All)).await?;
    let engineering = ctx.document_repo.create(folder("Engineering", Department::Engineering)).await?;
    let hr = ctx.document_repo.create(folder("HR", Department::Hr)).await?;

    let files = [
        (&policies, "Employee Handbook.pdf", 2_450_000, Department::All),
        (&policies, "Travel Policy.pdf", 380_000, Department::All),
        (&policies, "Security Guidelines.docx", 120_000, Department::All),
        (&engineering, "Architecture Overview.pptx", 5_200_000, Department::Engineering),
        (&engineering, "On-call Runbook.md", 45_000, Department::Engineering),
        (&hr, "Benefits Summary.xlsx", 98_000, Department::Hr),
    ];

    for (parent, name, size, department) in files {
        ctx.document_repo
            .create(Document {
                id: Uuid::new_v4(),
                parent_id: Some(parent.id),
                name: name.to_string(),
                kind: DocumentKind::from_file_name(name),
                size_bytes: Some(size),
                url: Some(format!("/files/{}", name.replace(' ', "-").to_lowercase())),
                department,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    Ok(3 + files.len())
}

async fn seed_teams(ctx: &ServiceContext, users: &[User], now: DateTime<Utc>) -> Result<usize> {
    let team_id = Uuid::new_v4();
    let channel = |name: &str, is_private: bool| Channel {
        id: Uuid::new_v4(),
        team_id,
        name: name.to_string(),
        is_private,
    };

    let general = channel("General", false);
    let announcements = channel("Announcements", false);
    let engineering = channel("Engineering", false);

    let team = Team {
        id: team_id,
        name: "Company".to_string(),
        description: Some("Company-wide team".to_string()),
        member_count: users.len() as i64,
        channels: vec![general.clone(), announcements.clone(), engineering.clone()],
    };
    ctx.teams_repo.create_team(team).await?;

    let messages = [
        (&general, &users[1], "Great work on the quarter, everyone!", 30),
        (&announcements, &users[0], "VPN maintenance this Saturday night.", 20),
        (&engineering, &users[3], "Tech talk slides are up in Documents.", 10),
    ];

    for (channel, sender, content, minutes_ago) in messages {
        ctx.teams_repo
            .create_message(TeamsMessage {
                id: Uuid::new_v4(),
                channel_id: channel.id,
                channel_name: channel.name.clone(),
                content: content.to_string(),
                from: sender.name.clone(),
                timestamp: now - Duration::minutes(minutes_ago),
            })
            .await?;
    }

    Ok(1)
}
