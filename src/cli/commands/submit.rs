//! submit command - Submit a unit of work to the coordinator

use anyhow::{bail, Result};

use crate::cli::context::{Context, Session};
use crate::core::config::PRIORITY_RANGE;
use crate::core::types::{SubmitWorkRequest, WorkItem};
use crate::transport::Operation;
use crate::ui::format::{color_boundary, color_status, or_placeholder};
use crate::ui::output;

/// Build the submission, filling priority and boundary from configuration.
pub(super) fn build_request(
    session: &Session,
    title: String,
    description: Option<String>,
    priority: Option<i64>,
    boundary: Option<String>,
    target: Option<String>,
) -> Result<SubmitWorkRequest> {
    if title.trim().is_empty() {
        bail!("title must not be empty");
    }

    let priority = priority.unwrap_or_else(|| session.config.default_priority());
    if !PRIORITY_RANGE.contains(&priority) {
        bail!(
            "priority must be between {} and {}, got {}",
            PRIORITY_RANGE.start(),
            PRIORITY_RANGE.end(),
            priority
        );
    }

    let boundary = boundary.or_else(|| session.config.default_boundary().map(str::to_string));

    Ok(SubmitWorkRequest {
        title,
        description,
        priority,
        boundary,
        target,
    })
}

/// Submit a unit of work.
pub async fn submit(
    ctx: &Context,
    session: &mut Session,
    title: String,
    description: Option<String>,
    priority: Option<i64>,
    boundary: Option<String>,
    target: Option<String>,
) -> Result<()> {
    let request = build_request(session, title, description, priority, boundary, target)?;
    let item: WorkItem = session.call(Operation::SubmitWork, &request).await?;

    if ctx.quiet && !session.is_json() {
        output::print(&item.id);
        return Ok(());
    }

    let rendered = session.render(&item, |item| {
        let priority = item.priority.unwrap_or(request.priority);
        format!(
            "Submitted work item {}\n{}",
            item.id,
            output::format_pairs(&[
                ("status", color_status(&item.status)),
                ("priority", priority.to_string()),
                (
                    "boundary",
                    item.boundary
                        .as_deref()
                        .map(color_boundary)
                        .unwrap_or_else(|| or_placeholder(None)),
                ),
            ])
        )
    })?;
    output::print(rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigLayer;

    fn session(priority: Option<i64>, boundary: Option<&str>) -> Session {
        Session::for_test(ConfigLayer {
            default_priority: priority,
            default_boundary: boundary.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn defaults_come_from_configuration() {
        let session = session(Some(7), Some("staging"));
        let request =
            build_request(&session, "Build".into(), None, None, None, None).unwrap();
        assert_eq!(request.priority, 7);
        assert_eq!(request.boundary.as_deref(), Some("staging"));
    }

    #[test]
    fn flags_win_over_configuration() {
        let session = session(Some(7), Some("staging"));
        let request = build_request(
            &session,
            "Build".into(),
            Some("details".into()),
            Some(2),
            Some("production".into()),
            Some("gpu-box".into()),
        )
        .unwrap();
        assert_eq!(request.priority, 2);
        assert_eq!(request.boundary.as_deref(), Some("production"));
        assert_eq!(request.target.as_deref(), Some("gpu-box"));
    }

    #[test]
    fn built_in_priority_without_configuration() {
        let session = session(None, None);
        let request =
            build_request(&session, "Build".into(), None, None, None, None).unwrap();
        assert_eq!(request.priority, 5);
        assert_eq!(request.boundary, None);
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        let session = session(None, None);
        for priority in [0, 11, -3] {
            let err = build_request(&session, "Build".into(), None, Some(priority), None, None)
                .unwrap_err();
            assert!(err.to_string().contains("between 1 and 10"));
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        let session = session(None, None);
        assert!(build_request(&session, "  ".into(), None, None, None, None).is_err());
    }
}
