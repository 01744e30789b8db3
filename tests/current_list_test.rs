use learner_dashboard::{current_list, CourseListQuery, DashboardError, FilterKey, RootState, SortKey};

fn course(title: &str, enrolled_at: Option<&str>, started: bool, finished: bool, verified: bool) -> serde_json::Value {
    serde_json::json!({
        "course": { "title": title },
        "enrollment": {
            "isEnrolled": true,
            "hasStarted": started,
            "hasFinished": finished,
            "isVerified": verified,
            "lastEnrollment": enrolled_at
        }
    })
}

fn catalog() -> RootState {
    serde_json::from_value(serde_json::json!({
        "app": {
            "courseData": {
                "c1": course("Beta", Some("2024-03-01T00:00:00Z"), true, true, false),
                "c2": course("alpha", Some("2024-01-01T00:00:00Z"), true, false, true),
                "c3": course("Gamma", Some("2024-02-01T00:00:00Z"), false, false, false),
                "c4": course("delta", None, true, true, true),
                "c5": {
                    "course": { "title": "Epsilon" },
                    "enrollment": null
                }
            }
        }
    }))
    .unwrap()
}

#[test]
fn test_title_sort_is_case_insensitive() {
    let state: RootState = serde_json::from_value(serde_json::json!({
        "app": {
            "courseData": {
                "a": { "course": { "title": "Beta" } },
                "b": { "course": { "title": "alpha" } },
                "c": { "course": { "title": "Gamma" } }
            }
        }
    }))
    .unwrap();

    let ascending = current_list(&state, &CourseListQuery::default()).unwrap();
    assert_eq!(ascending.titles(), vec!["alpha", "Beta", "Gamma"]);

    let descending = current_list(
        &state,
        &CourseListQuery::default().sorted_by(SortKey::Title, false),
    )
    .unwrap();
    assert_eq!(descending.titles(), vec!["Gamma", "Beta", "alpha"]);
}

#[test]
fn test_descending_is_exact_reverse_even_with_ties() {
    let state: RootState = serde_json::from_value(serde_json::json!({
        "app": {
            "courseData": {
                "a": { "course": { "title": "Shared" } },
                "b": { "course": { "title": "shared" } },
                "c": { "course": { "title": "Alone" } },
                "d": { "course": { "title": "SHARED" } }
            }
        }
    }))
    .unwrap();

    let ascending = current_list(&state, &CourseListQuery::default()).unwrap();
    assert_eq!(ascending.card_ids(), vec!["c", "a", "b", "d"]);

    let descending = current_list(
        &state,
        &CourseListQuery::default().sorted_by(SortKey::Title, false),
    )
    .unwrap();
    let mut reversed = ascending.card_ids();
    reversed.reverse();
    assert_eq!(descending.card_ids(), reversed);
}

#[test]
fn test_enrolled_sort_orders_by_last_enrollment() {
    let state = catalog();

    let query = CourseListQuery::default()
        .with_filters([FilterKey::NotEnrolled])
        .sorted_by(SortKey::Enrolled, true);
    let list = current_list(&state, &query).unwrap();
    // 沒有日期的課程排在最前
    assert_eq!(list.card_ids(), vec!["c4", "c2", "c3", "c1"]);

    let query = query.sorted_by(SortKey::Enrolled, false);
    let list = current_list(&state, &query).unwrap();
    assert_eq!(list.card_ids(), vec!["c1", "c3", "c2", "c4"]);
}

#[test]
fn test_filters_are_combined_with_and() {
    let state = catalog();

    let done = current_list(&state, &CourseListQuery::default().with_filters([FilterKey::Done])).unwrap();
    assert_eq!(done.card_ids(), vec!["c1", "c4"]);

    let done_and_upgraded = current_list(
        &state,
        &CourseListQuery::default().with_filters([FilterKey::Done, FilterKey::Upgraded]),
    )
    .unwrap();
    assert_eq!(done_and_upgraded.card_ids(), vec!["c4"]);

    let contradictory = current_list(
        &state,
        &CourseListQuery::default().with_filters([FilterKey::InProgress, FilterKey::NotStarted]),
    )
    .unwrap();
    assert!(contradictory.visible.is_empty());
    assert_eq!(contradictory.num_pages, 0);
}

#[test]
fn test_adding_filters_never_grows_the_result() {
    let state = catalog();
    let mut filters = Vec::new();
    let mut previous = current_list(&state, &CourseListQuery::default()).unwrap().visible.len();

    for filter in [FilterKey::NotEnrolled, FilterKey::InProgress, FilterKey::Upgraded, FilterKey::Done] {
        filters.push(filter);
        let query = CourseListQuery::default().with_filters(filters.clone());
        let size = current_list(&state, &query).unwrap().visible.len();
        assert!(size <= previous, "{:?} grew the result", filters);
        previous = size;
    }
}

#[test]
fn test_course_without_enrollment_only_matches_not_started() {
    let state = catalog();

    let not_started = current_list(
        &state,
        &CourseListQuery::default().with_filters([FilterKey::NotStarted]),
    )
    .unwrap();
    assert_eq!(not_started.card_ids(), vec!["c5", "c3"]);
}

#[test]
fn test_pagination_pages_concatenate_to_prefix() {
    let state = catalog();
    let all = current_list(&state, &CourseListQuery::default()).unwrap();
    assert_eq!(all.titles(), vec!["alpha", "Beta", "delta", "Epsilon", "Gamma"]);

    let page_one = current_list(&state, &CourseListQuery::default().page(1, 2)).unwrap();
    let page_two = current_list(&state, &CourseListQuery::default().page(2, 2)).unwrap();
    let page_three = current_list(&state, &CourseListQuery::default().page(3, 2)).unwrap();

    assert_eq!(page_one.num_pages, 3);
    assert!(page_one.visible.len() <= 2);

    let mut combined = page_one.card_ids();
    combined.extend(page_two.card_ids());
    assert_eq!(combined, all.card_ids()[..4].to_vec());

    assert_eq!(page_three.titles(), vec!["Gamma"]);
}

#[test]
fn test_page_past_the_end_is_empty() {
    let state = catalog();
    let list = current_list(&state, &CourseListQuery::default().page(9, 2)).unwrap();
    assert!(list.visible.is_empty());
    assert_eq!(list.num_pages, 3);
}

#[test]
fn test_invalid_page_is_rejected() {
    let state = catalog();
    let err = current_list(&state, &CourseListQuery::default().page(0, 10)).unwrap_err();
    assert!(matches!(err, DashboardError::ValidationError { .. }));
}

#[test]
fn test_done_filter_end_to_end() {
    let state: RootState = serde_json::from_value(serde_json::json!({
        "app": {
            "courseData": {
                "x": course("Zebra Studies", None, true, true, false),
                "y": course("Astronomy", None, true, true, false),
                "z": course("Music", None, true, false, false)
            }
        }
    }))
    .unwrap();

    let query = CourseListQuery::default()
        .with_filters([FilterKey::Done])
        .page(1, 10);
    let list = current_list(&state, &query).unwrap();

    assert_eq!(list.titles(), vec!["Astronomy", "Zebra Studies"]);
    assert_eq!(list.num_pages, 1);
}
