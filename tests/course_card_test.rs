use chrono::{Duration, Utc};
use learner_dashboard::core::course_card::{
    card_snapshot, certificates, course, course_run, enrollment, entitlements, grades, provider,
    related_programs,
};
use learner_dashboard::RootState;

fn state_fixture() -> RootState {
    serde_json::from_value(serde_json::json!({
        "app": {
            "courseData": {
                "card-full": {
                    "certificates": {
                        "availableDate": "2024-06-01",
                        "certDownloadUrl": "/cert/download",
                        "certPreviewUrl": "/cert/preview",
                        "isDownloadable": true,
                        "isEarned": true,
                        "isAvailable": false,
                        "isRestricted": false
                    },
                    "course": {
                        "bannerUrl": "/banner.png",
                        "courseNumber": "CS50",
                        "title": "Intro to CS",
                        "website": "https://example.com/cs50"
                    },
                    "courseRun": {
                        "courseId": "course-v1:X+CS50+2024",
                        "isArchived": false,
                        "isStarted": true,
                        "isFinished": false,
                        "minPassingGrade": 0.7
                    },
                    "enrollment": {
                        "canUpgrade": true,
                        "hasStarted": true,
                        "isAudit": true,
                        "isEmailEnabled": true,
                        "lastEnrollment": "2024-01-15T10:00:00Z",
                        "isEnrolled": true
                    },
                    "grades": { "isPassing": true },
                    "provider": { "name": "HarvardX" },
                    "relatedPrograms": [
                        {
                            "uuid": "prog-1",
                            "title": "CS Professional",
                            "programType": "Professional Certificate",
                            "numberOfCourses": 3,
                            "estimatedNumberOfWeeks": 12,
                            "provider": "HarvardX"
                        },
                        { "uuid": "prog-2", "title": "MicroMasters" }
                    ]
                },
                "card-bare": {
                    "course": { "title": "Bare" },
                    "courseRun": null,
                    "enrollment": null
                }
            }
        }
    }))
    .unwrap()
}

fn state_with_deadline(deadline: &str) -> RootState {
    serde_json::from_value(serde_json::json!({
        "app": {
            "courseData": {
                "card-ent": {
                    "course": { "title": "Entitled" },
                    "entitlements": {
                        "canChange": true,
                        "isEntitlement": true,
                        "changeDeadline": deadline,
                        "availableSessions": [{ "courseId": "run-1" }]
                    }
                }
            }
        }
    }))
    .unwrap()
}

#[test]
fn test_missing_card_yields_empty_views() {
    let state = state_fixture();
    let now = Utc::now();

    assert!(certificates(&state, "nope").is_none());
    assert!(course(&state, "nope").is_none());
    assert!(course_run(&state, "nope").is_none());
    assert!(entitlements(&state, "nope", now).is_none());
    assert!(grades(&state, "nope").is_none());
    assert!(provider(&state, "nope").is_none());
    assert!(related_programs(&state, "nope").is_none());

    let enrollment = enrollment(&state, "nope");
    assert_eq!(
        serde_json::to_value(&enrollment).unwrap(),
        serde_json::json!({ "isEnrolled": false })
    );
}

#[test]
fn test_certificates_derive_earned_but_unavailable() {
    let state = state_fixture();
    let view = certificates(&state, "card-full").unwrap();

    assert!(view.is_earned_but_unavailable);
    assert!(view.is_downloadable);
    assert_eq!(view.cert_download_url.as_deref(), Some("/cert/download"));
    assert!(view.honor_cert_download_url.is_none());
}

#[test]
fn test_course_and_provider_pass_through() {
    let state = state_fixture();

    let view = course(&state, "card-full").unwrap();
    assert_eq!(view.title, "Intro to CS");
    assert_eq!(view.course_number.as_deref(), Some("CS50"));

    assert_eq!(
        provider(&state, "card-full").unwrap().name.as_deref(),
        Some("HarvardX")
    );
    assert!(provider(&state, "card-bare").unwrap().name.is_none());
}

#[test]
fn test_null_course_run_is_empty_but_card_exists() {
    let state = state_fixture();

    assert!(course_run(&state, "card-bare").is_none());
    assert!(course(&state, "card-bare").is_some());

    let run = course_run(&state, "card-full").unwrap();
    assert!(run.end_date.is_none());
    assert!(run.is_started);
    assert_eq!(run.min_passing_grade, Some(0.7));
}

#[test]
fn test_enrollment_renames_last_enrollment() {
    let state = state_fixture();

    let view = enrollment(&state, "card-full");
    assert!(view.is_enrolled);
    assert_eq!(view.last_enrolled.as_deref(), Some("2024-01-15T10:00:00Z"));
    assert_eq!(view.has_finished, Some(false));

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["lastEnrolled"], "2024-01-15T10:00:00Z");
    assert!(json.get("lastEnrollment").is_none());

    assert_eq!(enrollment(&state, "card-bare"), Default::default());
}

#[test]
fn test_related_programs_reduce_shape() {
    let state = state_fixture();
    let view = related_programs(&state, "card-full").unwrap();

    assert_eq!(view.length, 2);
    assert_eq!(view.list[0].title.as_deref(), Some("CS Professional"));
    assert_eq!(view.list[0].number_of_courses, Some(3));

    let json = serde_json::to_value(&view.list[0]).unwrap();
    assert!(json.get("uuid").is_none());

    let empty = related_programs(&state, "card-bare").unwrap();
    assert_eq!(empty.length, 0);
    assert!(empty.list.is_empty());
}

#[test]
fn test_entitlement_expiration_warning_windows() {
    let now = Utc::now();

    let soon = state_with_deadline(&(now + Duration::days(30)).to_rfc3339());
    let view = entitlements(&soon, "card-ent", now).unwrap();
    assert!(view.show_expiration_warning);
    assert!(view.has_sessions);
    assert!(view.can_change);

    let later = state_with_deadline(&(now + Duration::days(200)).to_rfc3339());
    assert!(!entitlements(&later, "card-ent", now).unwrap().show_expiration_warning);

    let past = state_with_deadline(&(now - Duration::days(1)).to_rfc3339());
    assert!(!entitlements(&past, "card-ent", now).unwrap().show_expiration_warning);
}

#[test]
fn test_absent_entitlements_is_empty() {
    let state = state_fixture();
    assert!(entitlements(&state, "card-full", Utc::now()).is_none());
}

#[test]
fn test_card_snapshot_bundles_views() {
    let state = state_fixture();
    let snapshot = card_snapshot(&state, "card-bare", Utc::now());

    assert_eq!(snapshot.card_id, "card-bare");
    assert_eq!(snapshot.course.as_ref().unwrap().title, "Bare");
    assert!(snapshot.course_run.is_none());
    assert!(!snapshot.enrollment.is_enrolled);
    assert!(!snapshot.grades.as_ref().unwrap().is_passing);
}

#[test]
fn test_projectors_do_not_mutate_state() {
    let state = state_fixture();
    let before = serde_json::to_value(&state).unwrap();

    let _ = card_snapshot(&state, "card-full", Utc::now());
    let _ = card_snapshot(&state, "card-bare", Utc::now());

    assert_eq!(serde_json::to_value(&state).unwrap(), before);
}
