mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{login, send, test_app, ADMIN, CEO, ENGINEER, MARKETING};

#[tokio::test]
async fn test_health_is_public() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    Ok(())
}

#[tokio::test]
async fn test_portal_requires_session() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let (status, body) = send(&app, "GET", "/announcements", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, "GET", "/auth/me", Some("session=bogus"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_login_and_logout() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(&app, "GET", "/auth/me", Some(&cookie), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], ENGINEER);
    assert_eq!(body["user"]["department"], "engineering");

    let (status, body) = send(&app, "POST", "/auth/logout", Some(&cookie), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, "GET", "/auth/me", Some(&cookie), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_login_unknown_email() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "nobody@company.com" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_submitted_announcement_starts_pending() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(
        &app,
        "POST",
        "/announcements",
        Some(&cookie),
        Some(json!({
            "title": "Test",
            "content": "Body",
            "department": "engineering",
            "status": "approved",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["announcement"]["status"], "pending");
    assert_eq!(body["announcement"]["department"], "engineering");
    assert_eq!(body["announcement"]["priority"], "general");

    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let request = axum::http::Request::post("/announcements")
        .header("content-type", "application/json")
        .header("cookie", &cookie)
        .body(axum::body::Body::from("{\"title\": "))?;
    let response = tower::ServiceExt::oneshot(app.clone(), request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_empty_title_fails_validation() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(
        &app,
        "POST",
        "/announcements",
        Some(&cookie),
        Some(json!({ "title": "", "content": "Body" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    Ok(())
}

#[tokio::test]
async fn test_approve_is_idempotent() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let author = login(&app, ENGINEER).await?;
    let admin = login(&app, ADMIN).await?;

    let (_, body) = send(
        &app,
        "POST",
        "/announcements",
        Some(&author),
        Some(json!({ "title": "Team lunch", "content": "Friday at noon" })),
    )
    .await?;
    let id = body["announcement"]["id"].as_str().unwrap_or_default().to_string();
    let uri = format!("/announcements/{}/approve", id);

    let (status, first) = send(&app, "POST", &uri, Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["announcement"]["status"], "approved");

    let (status, second) = send(&app, "POST", &uri, Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["announcement"]["status"], "approved");
    assert_eq!(second["announcement"]["reviewedAt"], first["announcement"]["reviewedAt"]);

    let reject = format!("/announcements/{}/reject", id);
    let (status, _) = send(&app, "POST", &reject, Some(&admin), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // The author hears about the decision once.
    let (_, inbox) = send(&app, "GET", "/notifications", Some(&author), None).await?;
    let decisions = inbox["notifications"]
        .as_array()
        .map(|n| n.iter().filter(|n| n["type"] == "announcement").count())
        .unwrap_or_default();
    assert_eq!(decisions, 1);

    Ok(())
}

#[tokio::test]
async fn test_employee_cannot_moderate() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let author = login(&app, ENGINEER).await?;
    let peer = login(&app, MARKETING).await?;

    let (_, body) = send(
        &app,
        "POST",
        "/announcements",
        Some(&author),
        Some(json!({ "title": "Self approved?", "content": "No" })),
    )
    .await?;
    let id = body["announcement"]["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/announcements/{}/approve", id),
        Some(&author),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Pending work is hidden from other employees.
    let (status, _) = send(&app, "GET", &format!("/announcements/{}", id), Some(&peer), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_employee_feed_is_scoped() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(&app, "GET", "/announcements", Some(&cookie), None).await?;
    assert_eq!(status, StatusCode::OK);

    let announcements = body["announcements"].as_array().cloned().unwrap_or_default();
    assert!(!announcements.is_empty());
    for a in &announcements {
        let own = a["author"] == "Kenji Sato";
        assert!(own || a["status"] == "approved");
        assert!(own || a["department"] == "all" || a["department"] == "engineering");
    }

    let (_, ceo_view) = send(&app, "GET", "/announcements", Some(&login(&app, CEO).await?), None).await?;
    let ceo_count = ceo_view["announcements"].as_array().map(Vec::len).unwrap_or_default();
    assert!(ceo_count > announcements.len());

    Ok(())
}

#[tokio::test]
async fn test_admin_routes_reject_employees() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let employee = login(&app, MARKETING).await?;
    let admin = login(&app, ADMIN).await?;

    let (status, body) = send(&app, "GET", "/admin/stats", Some(&employee), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, stats) = send(&app, "GET", "/admin/stats", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["pendingCount"], 1);
    assert_eq!(stats["users"], 7);

    let (status, queue) = send(&app, "GET", "/admin/announcements", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let queue = queue["announcements"].as_array().cloned().unwrap_or_default();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["title"], "Expense Report Deadline");

    Ok(())
}

#[tokio::test]
async fn test_send_reminders_once() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let admin = login(&app, ADMIN).await?;

    let (status, body) = send(&app, "POST", "/admin/events/send-reminders", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    let reminded = body["remindedEvents"].as_array().cloned().unwrap_or_default();
    assert_eq!(reminded.len(), 1);
    assert_eq!(reminded[0]["title"], "All-Hands Meeting");

    let (_, again) = send(&app, "POST", "/admin/events/send-reminders", Some(&admin), None).await?;
    assert_eq!(again["remindedEvents"].as_array().map(Vec::len), Some(0));

    let employee = login(&app, MARKETING).await?;
    let (_, inbox) = send(&app, "GET", "/notifications?unread=true", Some(&employee), None).await?;
    let reminders = inbox["notifications"]
        .as_array()
        .map(|n| n.iter().filter(|n| n["type"] == "reminder").count())
        .unwrap_or_default();
    assert_eq!(reminders, 1);

    Ok(())
}

#[tokio::test]
async fn test_chatbot_lists_department_announcements() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(
        &app,
        "POST",
        "/chatbot",
        Some(&cookie),
        Some(json!({ "message": "Show me the latest announcements" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let response = body["response"].as_str().unwrap_or_default();
    assert!(response.starts_with("Here are the latest announcements:"));
    assert!(response.contains("• Q4 Performance Update"));
    assert!(!response.contains("Brand Refresh Launch"));
    assert!(body["suggestedActions"].is_array());

    let (_, ja) = send(
        &app,
        "POST",
        "/chatbot",
        Some(&cookie),
        Some(json!({ "message": "お知らせ", "language": "ja" })),
    )
    .await?;
    assert!(ja["response"].as_str().unwrap_or_default().contains("第4四半期業績のお知らせ"));

    Ok(())
}

#[tokio::test]
async fn test_ticket_conversation() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let requester = login(&app, ENGINEER).await?;
    let staff = login(&app, ADMIN).await?;

    let (status, body) = send(
        &app,
        "POST",
        "/tickets",
        Some(&requester),
        Some(json!({ "title": "Laptop battery", "description": "Drains in an hour" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ticket"]["status"], "open");
    assert_eq!(body["ticket"]["category"], "IT Support");
    let id = body["ticket"]["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/tickets/{}/responses", id),
        Some(&staff),
        Some(json!({ "content": "Bring it to the IT desk" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["status"], "in-progress");
    assert_eq!(body["ticket"]["responses"][0]["isStaff"], true);
    let first_seq = body["ticket"]["responses"][0]["seq"].as_i64().unwrap_or_default();
    assert!(first_seq > 0);

    let (_, body) = send(
        &app,
        "POST",
        &format!("/tickets/{}/responses", id),
        Some(&requester),
        Some(json!({ "content": "Thanks, on my way" })),
    )
    .await?;
    let second_seq = body["ticket"]["responses"][1]["seq"].as_i64().unwrap_or_default();
    assert!(second_seq > first_seq);

    // Re-sending the current status is harmless for the requester.
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/tickets/{}/status", id),
        Some(&requester),
        Some(json!({ "status": "in-progress" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["status"], "in-progress");

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/tickets/{}/status", id),
        Some(&requester),
        Some(json!({ "status": "resolved" })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Requesters only see their own tickets.
    let (_, mine) = send(&app, "GET", "/tickets", Some(&requester), None).await?;
    assert_eq!(mine["tickets"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/tickets/{}/status", id),
        Some(&requester),
        Some(json!({ "status": "closed" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ticket"]["status"], "closed");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/tickets/{}/responses", id),
        Some(&requester),
        Some(json!({ "content": "One more thing" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn test_documents_hide_other_departments() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let marketing = login(&app, MARKETING).await?;
    let admin = login(&app, ADMIN).await?;

    let (status, body) = send(&app, "GET", "/documents", Some(&marketing), None).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = body["documents"]
        .as_array()
        .map(|d| d.iter().filter_map(|d| d["name"].as_str().map(String::from)).collect())
        .unwrap_or_default();
    assert!(names.contains(&"Company Policies".to_string()));
    assert!(!names.contains(&"Engineering".to_string()));

    let (status, _) = send(
        &app,
        "POST",
        "/documents",
        Some(&marketing),
        Some(json!({ "name": "Plan.pdf" })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/documents",
        Some(&admin),
        Some(json!({ "name": "Plan.pdf", "department": "marketing" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["document"]["kind"], "pdf");

    let (_, search) = send(&app, "GET", "/documents?q=plan", Some(&marketing), None).await?;
    assert_eq!(search["documents"].as_array().map(Vec::len), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_graph_placeholder() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(&app, "GET", "/graph/teams", Some(&cookie), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["source"], "mock");
    assert!(body["messages"].is_array());

    let (status, body) = send(
        &app,
        "POST",
        "/graph/teams",
        Some(&cookie),
        Some(json!({ "channelId": "00000000-0000-0000-0000-000000000000", "message": "hi" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_ai_placeholders() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, MARKETING).await?;

    let (status, body) = send(
        &app,
        "POST",
        "/ai/prioritize",
        Some(&cookie),
        Some(json!({ "title": "URGENT: server outage", "content": "" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority"], "urgent");

    let (status, body) = send(
        &app,
        "POST",
        "/ai/generate",
        Some(&cookie),
        Some(json!({ "content": "Quarterly results", "type": "translate", "targetLanguage": "ja" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["generatedContent"].as_str().unwrap_or_default().contains("Quarterly results"));

    Ok(())
}

async fn submit(app: &axum::Router, cookie: &str, payload: serde_json::Value) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/announcements", Some(cookie), Some(payload)).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["announcement"]["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn test_author_cannot_edit_after_review() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let author = login(&app, ENGINEER).await?;
    let admin = login(&app, ADMIN).await?;
    let peer = login(&app, MARKETING).await?;

    let id = submit(
        &app,
        &author,
        json!({ "title": "Build freeze", "content": "Reviewed text", "department": "engineering" }),
    )
    .await?;
    let uri = format!("/announcements/{}", id);

    // Pending submissions stay editable by their author.
    let (status, body) = send(&app, "PATCH", &uri, Some(&author), Some(json!({ "content": "Reviewed text v2" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["announcement"]["content"], "Reviewed text v2");

    send(&app, "POST", &format!("{}/approve", uri), Some(&admin), None).await?;

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&author),
        Some(json!({ "content": "UNREVIEWED TEXT", "department": "all" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", &uri, Some(&peer), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", &uri, Some(&author), None).await?;
    assert_eq!(body["announcement"]["content"], "Reviewed text v2");
    assert_eq!(body["announcement"]["department"], "engineering");

    // Moderators can still correct a reviewed announcement.
    let (status, body) = send(&app, "PATCH", &uri, Some(&admin), Some(json!({ "title": "Build freeze (Fri)" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["announcement"]["status"], "approved");

    Ok(())
}

#[tokio::test]
async fn test_editing_ai_text_marks_override() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let author = login(&app, ENGINEER).await?;

    let id = submit(
        &app,
        &author,
        json!({ "title": "Drafted", "content": "Generated body", "isAiGenerated": true }),
    )
    .await?;
    let uri = format!("/announcements/{}", id);

    let (_, body) = send(&app, "PATCH", &uri, Some(&author), Some(json!({ "priority": "important" }))).await?;
    assert_eq!(body["announcement"]["aiOverridden"], false);

    let (status, body) = send(&app, "PATCH", &uri, Some(&author), Some(json!({ "content": "Human edit" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["announcement"]["isAiGenerated"], true);
    assert_eq!(body["announcement"]["aiOverridden"], true);

    Ok(())
}

#[tokio::test]
async fn test_status_in_patch_goes_through_moderation() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let author = login(&app, ENGINEER).await?;
    let admin = login(&app, ADMIN).await?;

    let id = submit(&app, &author, json!({ "title": "Original", "content": "Body" })).await?;
    let uri = format!("/announcements/{}", id);

    // A forbidden status change leaves every other field untouched.
    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(&author),
        Some(json!({ "title": "Sneaky", "status": "approved" })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, "GET", &uri, Some(&author), None).await?;
    assert_eq!(body["announcement"]["title"], "Original");
    assert_eq!(body["announcement"]["status"], "pending");

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&admin),
        Some(json!({ "title": "Polished", "status": "approved" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["announcement"]["title"], "Polished");
    assert_eq!(body["announcement"]["status"], "approved");
    assert!(body["announcement"]["reviewedBy"].is_string());

    // An illegal transition is refused before the title is saved.
    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(&admin),
        Some(json!({ "title": "Rewritten", "status": "pending" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, "GET", &uri, Some(&admin), None).await?;
    assert_eq!(body["announcement"]["title"], "Polished");
    assert_eq!(body["announcement"]["status"], "approved");

    Ok(())
}

#[tokio::test]
async fn test_send_notification_now_and_later() -> anyhow::Result<()> {
    let (app, ctx) = test_app().await?;
    let admin = login(&app, ADMIN).await?;
    let hr = login(&app, "emily.chen@company.com").await?;
    let sales = login(&app, "david.brown@company.com").await?;

    let (status, body) = send(
        &app,
        "POST",
        "/notifications/send",
        Some(&admin),
        Some(json!({
            "type": "teams",
            "department": "hr",
            "title": "Benefits enrollment",
            "message": "Enrollment closes Friday",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["notification"]["status"], "sent");
    // HR plus the two privileged accounts.
    assert_eq!(body["notification"]["recipients"].as_array().map(Vec::len), Some(3));

    let titles = |inbox: &serde_json::Value| -> Vec<String> {
        inbox["notifications"]
            .as_array()
            .map(|n| n.iter().filter_map(|n| n["title"].as_str().map(String::from)).collect())
            .unwrap_or_default()
    };

    let (_, inbox) = send(&app, "GET", "/notifications", Some(&hr), None).await?;
    assert!(titles(&inbox).contains(&"Benefits enrollment".to_string()));
    let (_, inbox) = send(&app, "GET", "/notifications", Some(&sales), None).await?;
    assert!(!titles(&inbox).contains(&"Benefits enrollment".to_string()));

    let sales_id = ctx
        .user_repo
        .find_by_email("david.brown@company.com")
        .await?
        .map(|u| u.id.to_string())
        .unwrap_or_default();
    let later = (chrono::Utc::now() + chrono::Duration::days(2)).to_rfc3339();

    let (status, body) = send(
        &app,
        "POST",
        "/notifications/send",
        Some(&admin),
        Some(json!({
            "type": "email",
            "recipients": [sales_id],
            "title": "Quarter close",
            "message": "Numbers due",
            "scheduledFor": later,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["status"], "scheduled");
    assert!(body["notification"]["sentAt"].is_null());

    let (_, inbox) = send(&app, "GET", "/notifications", Some(&sales), None).await?;
    assert!(!titles(&inbox).contains(&"Quarter close".to_string()));

    let (status, body) = send(
        &app,
        "POST",
        "/notifications/send",
        Some(&admin),
        Some(json!({
            "type": "push",
            "recipients": [uuid::Uuid::new_v4()],
            "title": "Hello",
            "message": "Anyone there?",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("Unknown recipient"));

    let (status, _) = send(
        &app,
        "POST",
        "/notifications/send",
        Some(&sales),
        Some(json!({ "type": "push", "department": "all", "title": "Hi", "message": "All" })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn test_notifications_belong_to_their_owner() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let owner = login(&app, ENGINEER).await?;
    let other = login(&app, MARKETING).await?;

    let (_, inbox) = send(&app, "GET", "/notifications", Some(&owner), None).await?;
    let id = inbox["notifications"][0]["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, "POST", &format!("/notifications/{}/read", id), Some(&other), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/notifications/{}", id), Some(&other), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, inbox) = send(&app, "GET", "/notifications", Some(&owner), None).await?;
    assert_eq!(inbox["unreadCount"], 1);

    let (status, _) = send(&app, "POST", &format!("/notifications/{}/read", id), Some(&owner), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, inbox) = send(&app, "GET", "/notifications", Some(&owner), None).await?;
    assert_eq!(inbox["unreadCount"], 0);

    let (status, body) = send(&app, "DELETE", &format!("/notifications/{}", id), Some(&owner), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    Ok(())
}

#[tokio::test]
async fn test_event_end_before_start_is_rejected() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let admin = login(&app, ADMIN).await?;
    let start = chrono::Utc::now() + chrono::Duration::days(1);

    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(&admin),
        Some(json!({
            "title": "Backwards",
            "startDate": start.to_rfc3339(),
            "endDate": (start - chrono::Duration::hours(1)).to_rfc3339(),
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(&admin),
        Some(json!({
            "title": "Forwards",
            "startDate": start.to_rfc3339(),
            "endDate": (start + chrono::Duration::hours(1)).to_rfc3339(),
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event"]["department"], "all");

    Ok(())
}

#[tokio::test]
async fn test_search_respects_visibility() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let marketing = login(&app, MARKETING).await?;
    let admin = login(&app, ADMIN).await?;

    let (status, body) = send(&app, "GET", "/search?q=MAINTENANCE", Some(&marketing), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["announcements"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(&app, "GET", "/search?q=engineering", Some(&marketing), None).await?;
    assert_eq!(body["events"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["documents"].as_array().map(Vec::len), Some(0));

    let (_, body) = send(&app, "GET", "/search?q=engineering", Some(&admin), None).await?;
    assert!(body["events"].as_array().map(Vec::len).unwrap_or_default() >= 1);
    assert!(body["documents"].as_array().map(Vec::len).unwrap_or_default() >= 1);

    let (_, body) = send(&app, "GET", "/search?q=%20", Some(&admin), None).await?;
    assert_eq!(body["announcements"].as_array().map(Vec::len), Some(0));

    Ok(())
}

#[tokio::test]
async fn test_department_summaries() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, MARKETING).await?;

    let (status, body) = send(&app, "GET", "/departments", Some(&cookie), None).await?;
    assert_eq!(status, StatusCode::OK);

    let departments = body["departments"].as_array().cloned().unwrap_or_default();
    assert_eq!(departments.len(), 6);

    let engineering = departments
        .iter()
        .find(|d| d["department"] == "engineering")
        .cloned()
        .unwrap_or_default();
    assert_eq!(engineering["announcementCount"], 3);
    assert_eq!(engineering["upcomingEventCount"], 2);
    assert_eq!(engineering["memberCount"], 2);

    Ok(())
}

#[tokio::test]
async fn test_profile_update() -> anyhow::Result<()> {
    let (app, _) = test_app().await?;
    let cookie = login(&app, ENGINEER).await?;

    let (status, body) = send(
        &app,
        "PATCH",
        "/profile",
        Some(&cookie),
        Some(json!({ "jobTitle": "Staff Engineer", "location": "Osaka" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["jobTitle"], "Staff Engineer");
    assert_eq!(body["user"]["location"], "Osaka");
    assert_eq!(body["user"]["name"], "Kenji Sato");

    let (status, _) = send(&app, "PATCH", "/profile", Some(&cookie), Some(json!({ "name": "" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PATCH",
        "/profile/preferences",
        Some(&cookie),
        Some(json!({ "language": "ja", "theme": "dark" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["preferences"]["language"], "ja");
    assert_eq!(body["user"]["preferences"]["theme"], "dark");
    assert_eq!(body["user"]["preferences"]["emailNotifications"], true);

    let (_, me) = send(&app, "GET", "/auth/me", Some(&cookie), None).await?;
    assert_eq!(me["user"]["location"], "Osaka");

    Ok(())
}
