//! Entity -> response DTO conversions

use club_core::entities::{Application, Blog, Bug, Event, Member, Registration, User};
use club_core::value_objects::Snowflake;

use super::responses::{
    ApplicationResponse, BlogResponse, BugResponse, CurrentUserResponse, EventResponse,
    MemberResponse, RegistrationResponse, ReviewResponse, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
            member_id: user.member_id.map(|id| id.to_string()),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            subject: user.subject.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
            permissions: user
                .role
                .permissions()
                .list()
                .iter()
                .map(ToString::to_string)
                .collect(),
            member_id: user.member_id.map(|id| id.to_string()),
            created_at: user.created_at,
        }
    }
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            role: member.role.as_str().to_string(),
            domain: member.domain.as_str().to_string(),
            year: member.year,
            email: member.email.clone(),
            phone: member.phone.clone(),
            status: member.status.as_str().to_string(),
            user_id: member.user_id.map(|id| id.to_string()),
            created_at: member.created_at,
        }
    }
}

impl From<&Application> for ApplicationResponse {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.to_string(),
            user_id: application.user_id.to_string(),
            applicant_name: application.applicant_name.clone(),
            email: application.email.clone(),
            desired_role: application.desired_role.as_str().to_string(),
            domain: application.domain.as_str().to_string(),
            branch: application.branch.clone(),
            year: application.year,
            status: application.status.as_str().to_string(),
            review: application.review.as_ref().map(|r| ReviewResponse {
                reviewer_id: r.reviewer_id.to_string(),
                reviewed_at: r.reviewed_at,
                notes: r.notes.clone(),
            }),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

/// Build a blog response, marking the viewer's upvote when known
pub fn blog_response(blog: &Blog, viewer: Option<Snowflake>) -> BlogResponse {
    BlogResponse {
        id: blog.id.to_string(),
        title: blog.title.clone(),
        slug: blog.slug.clone(),
        content: blog.content.clone(),
        summary: blog.summary.clone(),
        author_id: blog.author_id.to_string(),
        tags: blog.tags.clone(),
        status: blog.status.as_str().to_string(),
        upvotes: blog.upvote_count() as i64,
        upvoted: viewer.map(|id| blog.has_upvoted(id)),
        created_at: blog.created_at,
        updated_at: blog.updated_at,
    }
}

impl From<&Bug> for BugResponse {
    fn from(bug: &Bug) -> Self {
        Self {
            id: bug.id.to_string(),
            title: bug.title.clone(),
            description: bug.description.clone(),
            area: bug.area.clone(),
            priority: bug.priority.as_str().to_string(),
            status: bug.status.as_str().to_string(),
            reporter_id: bug.reporter_id.to_string(),
            assignee_id: bug.assignee_id.map(|id| id.to_string()),
            created_at: bug.created_at,
            updated_at: bug.updated_at,
        }
    }
}

/// Build an event response, marking the viewer's registration when known
pub fn event_response(event: &Event, viewer: Option<Snowflake>) -> EventResponse {
    EventResponse {
        id: event.id.to_string(),
        title: event.title.clone(),
        description: event.description.clone(),
        location: event.location.clone(),
        starts_at: event.starts_at,
        ends_at: event.ends_at,
        capacity: event.capacity,
        created_by: event.created_by.to_string(),
        registered_count: event.registration_count() as i64,
        registered: viewer.map(|id| event.is_registered(id)),
        created_at: event.created_at,
        updated_at: event.updated_at,
    }
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            user_id: registration.user_id.to_string(),
            registered_at: registration.registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::value_objects::Role;

    #[test]
    fn test_current_user_includes_permissions() {
        let mut user = User::new(
            Snowflake::new(1),
            "idp-1".to_string(),
            "lead@university.edu".to_string(),
            "Lead".to_string(),
            None,
        );
        user.set_role(Role::Lead);

        let response = CurrentUserResponse::from(&user);
        assert_eq!(response.role, "LEAD");
        assert!(response
            .permissions
            .iter()
            .any(|p| p == "REVIEW_APPLICATIONS"));
    }

    #[test]
    fn test_blog_response_viewer_flag() {
        let mut blog = Blog::new(
            Snowflake::new(2),
            "Title".to_string(),
            "Body".to_string(),
            None,
            Snowflake::new(1),
            vec![],
        );
        blog.upvotes.push(Snowflake::new(9));

        let anonymous = blog_response(&blog, None);
        assert!(anonymous.upvoted.is_none());
        assert_eq!(anonymous.upvotes, 1);

        let voter = blog_response(&blog, Some(Snowflake::new(9)));
        assert_eq!(voter.upvoted, Some(true));
    }
}
