//! `login`, `logout` and `whoami`.

use serde_json::json;

use crate::context::Context;
use crate::output::render_user;
use crate::Result;

/// Checks the credentials against the user directory and saves the session.
pub async fn login(ctx: &mut Context, username: &str, password: &str) -> Result<()> {
    let service = ctx.login_service()?;
    let user = service.login(username, password).await?;
    let resolution = ctx.enter(user.clone());
    ctx.output().emit(
        &json!({ "user": user, "access": resolution }),
        || render_user(&user, &resolution),
    )
}

/// Clears the session slots.
pub fn logout(ctx: &Context) -> Result<()> {
    ctx.sessions().clear()?;
    tracing::info!(dir = %ctx.sessions().dir().display(), "cleared session");
    ctx.output()
        .emit(&json!({ "logged_out": true }), || "Logged out\n".to_string())
}

/// Shows the restored user and what they may open.
pub fn whoami(ctx: &mut Context) -> Result<()> {
    let resolution = ctx.require_user()?;
    let Some(user) = ctx.state().user().cloned() else {
        return Err(crate::Error::NotLoggedIn);
    };
    ctx.output().emit(
        &json!({ "user": user, "access": resolution }),
        || render_user(&user, &resolution),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::logged_in;
    use floorflow_core::types::UserInfo;
    use tempfile::TempDir;

    #[test]
    fn test_logout_clears_slots() {
        let tmp = TempDir::new().unwrap();
        let ctx = logged_in(&tmp, "");
        ctx.sessions()
            .save("a1", "pw", &UserInfo::default())
            .unwrap();

        logout(&ctx).unwrap();
        assert!(ctx.sessions().load().unwrap().is_none());
    }

    #[test]
    fn test_whoami_needs_a_session() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = logged_in(&tmp, "");
        let err = whoami(&mut ctx).unwrap_err();
        assert!(matches!(err, crate::Error::NotLoggedIn));
    }

    #[test]
    fn test_whoami_with_session() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = logged_in(&tmp, "");
        let user = UserInfo {
            user_name: "Ravi".to_string(),
            user_id: "r1".to_string(),
            role: "user".to_string(),
            page_show: "Vendors".to_string(),
        };
        ctx.sessions().save("r1", "pw", &user).unwrap();

        whoami(&mut ctx).unwrap();
        assert_eq!(ctx.state().user(), Some(&user));
    }

    #[tokio::test]
    async fn test_login_without_endpoints_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = logged_in(&tmp, "");
        let err = login(&mut ctx, "a1", "pw").await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Core(floorflow_core::Error::Config { .. })
        ));
    }
}
