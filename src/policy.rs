//! Authorization policy.
//!
//! Every role and department check in the service goes through this module:
//! the API handlers, the chatbot, search and reminder fan-out all ask the
//! same questions here instead of comparing roles inline.

use uuid::Uuid;

use crate::domain::{Announcement, AnnouncementStatus, Department, HelpTicket, Role, User};

/// The slice of a user that visibility depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: Uuid,
    pub role: Role,
    pub department: Department,
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            department: user.department,
        }
    }
}

impl Viewer {
    /// Same viewer, scoped to another department (chatbot questions may ask
    /// about a department other than the user's own).
    pub fn in_department(self, department: Department) -> Self {
        Self { department, ..self }
    }
}

/// A record scoped to `department` is visible to everyone when the scope is
/// `all`, to members of that department, and to admin/ceo accounts.
pub fn can_view(viewer: &Viewer, department: Department) -> bool {
    department.is_wildcard() || department == viewer.department || viewer.role.is_privileged()
}

/// Announcements additionally require approval for non-privileged viewers.
/// Authors keep sight of their own submissions while they are moderated.
pub fn can_view_announcement(viewer: &Viewer, announcement: &Announcement) -> bool {
    if viewer.role.is_privileged() {
        return true;
    }
    if announcement.author_id == viewer.id {
        return true;
    }
    announcement.status == AnnouncementStatus::Approved && can_view(viewer, announcement.department)
}

pub fn can_moderate(role: Role) -> bool {
    role.is_privileged()
}

pub fn can_edit_announcement(viewer: &Viewer, announcement: &Announcement) -> bool {
    announcement.author_id == viewer.id || can_moderate(viewer.role)
}

pub fn can_manage_events(role: Role) -> bool {
    role.is_privileged()
}

pub fn can_manage_documents(role: Role) -> bool {
    role.is_privileged()
}

pub fn can_send_notifications(role: Role) -> bool {
    role.is_privileged()
}

pub fn is_help_desk_staff(role: Role) -> bool {
    role.is_privileged()
}

pub fn can_view_ticket(viewer: &Viewer, ticket: &HelpTicket) -> bool {
    ticket.created_by == viewer.id || is_help_desk_staff(viewer.role)
}
