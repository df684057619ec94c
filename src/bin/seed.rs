use atrium::{
    config::{DatabaseConfig, Settings},
    db,
    domain::{
        Announcement, AnnouncementStatus, Department, Priority, Role, User, UserPreferences,
    },
    error::AppError,
    integrations::IntegrationManager,
    seed,
    service::ServiceContext,
};
use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::{
        company::en::Profession,
        internet::en::SafeEmail,
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
    },
    Fake,
};
use rand::seq::SliceRandom;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Fill a portal database with demo and generated data")]
struct Args {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://atrium.db")]
    database_url: String,

    /// Generated employees on top of the demo directory
    #[arg(long, default_value_t = 20)]
    employees: usize,

    /// Generated announcements, a mix of approved and pending
    #[arg(long, default_value_t = 30)]
    announcements: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    println!("🌱 Seeding {}", args.database_url);

    let mut settings = Settings::default();
    settings.database = DatabaseConfig {
        url: args.database_url.clone(),
        max_connections: 5,
        seed_demo_data: true,
    };

    println!("📋 Running migrations...");
    let db_pool = db::connect(&settings.database).await?;

    let ctx = ServiceContext::new(db_pool, Arc::new(IntegrationManager::new()), &settings);

    let summary = seed::seed_demo_data(&ctx).await?;
    println!(
        "  ✅ Demo data: {} users, {} announcements, {} events, {} documents",
        summary.users, summary.announcements, summary.events, summary.documents
    );

    let mut rng = rand::thread_rng();
    let now = Utc::now();

    println!("👥 Creating {} employees...", args.employees);
    let mut created = Vec::new();
    for _ in 0..args.employees {
        let department = *Department::CONCRETE.choose(&mut rng).unwrap_or(&Department::Engineering);
        let user = User {
            id: Uuid::new_v4(),
            name: Name().fake(),
            email: SafeEmail().fake(),
            role: Role::Employee,
            department,
            job_title: Some(Profession().fake()),
            location: None,
            phone: None,
            bio: None,
            avatar_url: None,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        };

        match ctx.user_repo.create(user).await {
            Ok(user) => created.push(user),
            // Generated addresses occasionally repeat.
            Err(AppError::Conflict(_)) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    println!("  ✅ Created {} employees", created.len());

    if created.is_empty() {
        println!("\n✨ Database seeding complete!");
        return Ok(());
    }

    println!("📢 Creating {} announcements...", args.announcements);
    let priorities = [Priority::General, Priority::Important, Priority::Event, Priority::Deadline];
    for i in 0..args.announcements {
        let Some(author) = created.choose(&mut rng) else { break };
        let department = if i % 3 == 0 {
            Department::All
        } else {
            author.department
        };
        let status = if i % 4 == 0 {
            AnnouncementStatus::Pending
        } else {
            AnnouncementStatus::Approved
        };
        let created_at = now - Duration::hours((i as i64 + 1) * 7);

        ctx.announcement_repo
            .create(Announcement {
                id: Uuid::new_v4(),
                title: Sentence(3..7).fake(),
                title_ja: None,
                content: Paragraph(2..4).fake(),
                content_ja: None,
                priority: priorities[i % priorities.len()],
                department,
                status,
                author: author.name.clone(),
                author_id: author.id,
                image_url: None,
                is_ai_generated: i % 5 == 0,
                ai_overridden: false,
                reviewed_by: None,
                reviewed_at: None,
                created_at,
                updated_at: created_at,
            })
            .await?;
    }
    println!("  ✅ Created {} announcements", args.announcements);

    println!("\n✨ Database seeding complete!");
    println!("\n📝 Demo accounts (mock sign-in, no password):");
    println!("  Admin: john.smith@company.com");
    println!("  CEO:   akiko.tanaka@company.com");
    println!("  Staff: maria.garcia@company.com, kenji.sato@company.com");

    Ok(())
}
