use axum::{Json, body::Bytes};
use tracing::debug;

use classroom_types::api::LoginRequest;
use classroom_types::models::{Role, User};

/// Class every synthesized teacher and student belongs to.
const DEFAULT_CLASS: &str = "L3";

/// POST /api/auth/login: stub login. No password, no session; the role is
/// picked from the email alone. A missing or unreadable body yields a student.
pub async fn login(body: Bytes) -> Json<User> {
    let req: LoginRequest = serde_json::from_slice(&body).unwrap_or_default();
    let user = synthesize_user(&req.email);
    debug!("Login stub issued {} as {:?}", user.id, user.role);
    Json(user)
}

/// Deterministic email → user mapping. The email is lower-cased first, so
/// matching is case-insensitive.
pub fn synthesize_user(email: &str) -> User {
    let email = email.to_lowercase();

    if email.contains("admin") {
        User {
            id: "admin-1".into(),
            email,
            role: Role::Admin,
            classes: vec![],
        }
    } else if email.contains("prof") || email.contains("teacher") {
        User {
            id: "teacher-1".into(),
            email,
            role: Role::Teacher,
            classes: vec![DEFAULT_CLASS.into()],
        }
    } else {
        User {
            id: "student-1".into(),
            email,
            role: Role::Student,
            classes: vec![DEFAULT_CLASS.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_match_is_case_insensitive() {
        let user = synthesize_user("ADMIN@x");
        assert_eq!(user.id, "admin-1");
        assert_eq!(user.email, "admin@x");
        assert_eq!(user.role, Role::Admin);
        assert!(user.classes.is_empty());
    }

    #[test]
    fn prof_and_teacher_are_teachers() {
        for email in ["prof.jane@x", "Teacher.Bob@x"] {
            let user = synthesize_user(email);
            assert_eq!(user.id, "teacher-1");
            assert_eq!(user.role, Role::Teacher);
            assert_eq!(user.classes, vec!["L3".to_string()]);
        }
    }

    #[test]
    fn admin_wins_over_teacher() {
        assert_eq!(synthesize_user("teacher-admin@x").role, Role::Admin);
    }

    #[test]
    fn everyone_else_is_a_student() {
        let user = synthesize_user("alice@x");
        assert_eq!(user.id, "student-1");
        assert_eq!(user.role, Role::Student);

        let anonymous = synthesize_user("");
        assert_eq!(anonymous.email, "");
        assert_eq!(anonymous.role, Role::Student);
    }
}
