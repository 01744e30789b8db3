//! 單張課程卡片的 sub-view 投影。
//!
//! 找不到卡片時一律回傳 `None` (空物件)，只有 `enrollment` 回傳
//! `{ isEnrolled: false }`。缺少的巢狀欄位變成 `None`，不會報錯。

use crate::core::selectors::course_card_data;
use crate::domain::model::{CourseRecord, Entitlements, RootState};
use crate::domain::view::{
    CertificatesView, CourseCardSnapshot, CourseRunView, CourseView, EnrollmentView,
    EntitlementsView, GradesView, ProgramView, ProviderView, RelatedProgramsView,
};
use crate::utils::dates::parse_optional_date;
use chrono::{DateTime, Duration, Utc};

/// 變更期限落在此天數內才提醒
pub const EXPIRATION_WARNING_DAYS: i64 = 180;

fn with_card<T>(
    state: &RootState,
    card_id: &str,
    project: impl FnOnce(&CourseRecord) -> Option<T>,
) -> Option<T> {
    course_card_data(state, card_id).and_then(project)
}

pub fn certificates(state: &RootState, card_id: &str) -> Option<CertificatesView> {
    with_card(state, card_id, |card| {
        let certs = &card.certificates;
        Some(CertificatesView {
            available_date: certs.available_date.clone(),
            cert_download_url: certs.cert_download_url.clone(),
            honor_cert_download_url: certs.honor_cert_download_url.clone(),
            cert_preview_url: certs.cert_preview_url.clone(),
            is_downloadable: certs.is_downloadable,
            is_earned_but_unavailable: certs.is_earned && !certs.is_available,
            is_restricted: certs.is_restricted,
        })
    })
}

pub fn course(state: &RootState, card_id: &str) -> Option<CourseView> {
    with_card(state, card_id, |card| {
        Some(CourseView {
            banner_url: card.course.banner_url.clone(),
            course_number: card.course.course_number.clone(),
            title: card.course.title.clone(),
            website: card.course.website.clone(),
        })
    })
}

/// `courseRun` 為 null 時同樣是空物件
pub fn course_run(state: &RootState, card_id: &str) -> Option<CourseRunView> {
    with_card(state, card_id, |card| {
        card.course_run.as_ref().map(|run| CourseRunView {
            end_date: run.end_date.clone(),
            course_id: run.course_id.clone(),
            is_archived: run.is_archived,
            is_started: run.is_started,
            is_finished: run.is_finished,
            min_passing_grade: run.min_passing_grade,
        })
    })
}

pub fn enrollment(state: &RootState, card_id: &str) -> EnrollmentView {
    let Some(enrollment) = course_card_data(state, card_id).and_then(|c| c.enrollment.as_ref())
    else {
        return EnrollmentView::not_enrolled();
    };

    EnrollmentView {
        access_expiration_date: enrollment.access_expiration_date.clone(),
        can_upgrade: Some(enrollment.can_upgrade),
        has_started: Some(enrollment.has_started),
        has_finished: Some(enrollment.has_finished),
        is_audit: Some(enrollment.is_audit),
        is_audit_access_expired: Some(enrollment.is_audit_access_expired),
        is_email_enabled: Some(enrollment.is_email_enabled),
        is_verified: Some(enrollment.is_verified),
        last_enrolled: enrollment.last_enrollment.clone(),
        is_enrolled: enrollment.is_enrolled,
    }
}

pub fn entitlements(
    state: &RootState,
    card_id: &str,
    now: DateTime<Utc>,
) -> Option<EntitlementsView> {
    with_card(state, card_id, |card| {
        card.entitlements
            .as_ref()
            .map(|entitlements| project_entitlements(entitlements, now))
    })
}

fn project_entitlements(entitlements: &Entitlements, now: DateTime<Utc>) -> EntitlementsView {
    EntitlementsView {
        can_change: entitlements.can_change,
        can_view_course: entitlements.can_view_course,
        entitlement_sessions: entitlements.available_sessions.clone(),
        is_entitlement: entitlements.is_entitlement,
        is_expired: entitlements.is_expired,
        is_fulfilled: entitlements.is_fulfilled,
        has_sessions: entitlements
            .available_sessions
            .as_ref()
            .is_some_and(|sessions| !sessions.is_empty()),
        change_deadline: entitlements.change_deadline.clone(),
        show_expiration_warning: show_expiration_warning(
            entitlements.change_deadline.as_deref(),
            now,
        ),
    }
}

/// 期限在未來且不晚於 `now + 180 天`。無效日期永不提醒
pub fn show_expiration_warning(change_deadline: Option<&str>, now: DateTime<Utc>) -> bool {
    let cutoff = now + Duration::days(EXPIRATION_WARNING_DAYS);
    parse_optional_date(change_deadline)
        .is_some_and(|deadline| deadline > now && deadline <= cutoff)
}

pub fn grades(state: &RootState, card_id: &str) -> Option<GradesView> {
    with_card(state, card_id, |card| {
        Some(GradesView {
            is_passing: card.grades.is_passing,
        })
    })
}

pub fn provider(state: &RootState, card_id: &str) -> Option<ProviderView> {
    with_card(state, card_id, |card| {
        Some(ProviderView {
            name: card.provider.as_ref().and_then(|p| p.name.clone()),
        })
    })
}

pub fn related_programs(state: &RootState, card_id: &str) -> Option<RelatedProgramsView> {
    with_card(state, card_id, |card| {
        let list = card
            .related_programs
            .iter()
            .map(|program| ProgramView {
                banner_url: program.banner_url.clone(),
                estimated_number_of_weeks: program.estimated_number_of_weeks,
                logo_url: program.logo_url.clone(),
                number_of_courses: program.number_of_courses,
                program_type: program.program_type.clone(),
                program_url: program.program_url.clone(),
                provider: program.provider.clone(),
                title: program.title.clone(),
            })
            .collect();

        Some(RelatedProgramsView {
            list,
            length: card.related_programs.len(),
        })
    })
}

pub fn card_snapshot(state: &RootState, card_id: &str, now: DateTime<Utc>) -> CourseCardSnapshot {
    CourseCardSnapshot {
        card_id: card_id.to_string(),
        certificates: certificates(state, card_id),
        course: course(state, card_id),
        course_run: course_run(state, card_id),
        enrollment: enrollment(state, card_id),
        entitlements: entitlements(state, card_id, now),
        grades: grades(state, card_id),
        provider: provider(state, card_id),
        related_programs: related_programs(state, card_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn deadline_in(days: i64) -> String {
        (fixed_now() + Duration::days(days)).to_rfc3339()
    }

    #[test]
    fn test_expiration_warning_inside_window() {
        assert!(show_expiration_warning(Some(&deadline_in(30)), fixed_now()));
        assert!(show_expiration_warning(Some(&deadline_in(180)), fixed_now()));
    }

    #[test]
    fn test_no_expiration_warning_outside_window() {
        assert!(!show_expiration_warning(Some(&deadline_in(200)), fixed_now()));
        assert!(!show_expiration_warning(Some(&deadline_in(-1)), fixed_now()));
        assert!(!show_expiration_warning(Some(&fixed_now().to_rfc3339()), fixed_now()));
    }

    #[test]
    fn test_no_expiration_warning_for_invalid_deadline() {
        assert!(!show_expiration_warning(None, fixed_now()));
        assert!(!show_expiration_warning(Some("soon"), fixed_now()));
    }

    #[test]
    fn test_date_only_deadline() {
        assert!(show_expiration_warning(Some("2024-02-01"), fixed_now()));
    }
}
