//! Behavioural tests for path resolution through the public API

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use routedefs::{Field, RouteError, RouteName, RouteParameters, check_consistency, resolve};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn params(pairs: &[(Field, &str)]) -> RouteParameters {
    pairs
        .iter()
        .fold(RouteParameters::new(), |acc, (field, value)| {
            acc.with(*field, *value)
        })
}

#[rstest]
#[case::sign_in(RouteName::SignIn, &[], "/signin")]
#[case::sign_up(RouteName::SignUp, &[], "/signup")]
#[case::repository_list(RouteName::RepositoryList, &[(Field::SpaceName, "acme")], "/acme")]
#[case::repository_view(
    RouteName::RepositoryView,
    &[(Field::RepositoryPath, "acme/repo")],
    "/acme/repo"
)]
#[case::repository_view_ref(
    RouteName::RepositoryView,
    &[(Field::RepositoryPath, "acme/repo"), (Field::GitReference, "main")],
    "/acme/repo//main"
)]
#[case::repository_view_ref_and_resource(
    RouteName::RepositoryView,
    &[
        (Field::RepositoryPath, "acme/repo"),
        (Field::GitReference, "main"),
        (Field::ResourcePath, "src/a.ts"),
    ],
    "/acme/repo//main/~/src/a.ts"
)]
#[case::file_edit(
    RouteName::FileEdit,
    &[
        (Field::RepositoryPath, "acme/repo"),
        (Field::GitReference, "main"),
        (Field::ResourcePath, "README.md"),
    ],
    "/acme/repo/edit/main/~/README.md"
)]
#[case::commit_list(
    RouteName::CommitList,
    &[(Field::RepositoryPath, "acme/repo"), (Field::CommitReference, "release/1")],
    "/acme/repo/commits/release/1"
)]
#[case::pull_request_list(
    RouteName::PullRequestList,
    &[(Field::RepositoryPath, "acme/repo")],
    "/acme/repo/pulls"
)]
#[case::pull_request_detail(
    RouteName::PullRequestDetail,
    &[(Field::RepositoryPath, "acme/repo"), (Field::PullRequestId, "42")],
    "/acme/repo/pulls/42"
)]
#[case::pull_request_detail_section(
    RouteName::PullRequestDetail,
    &[
        (Field::RepositoryPath, "acme/repo"),
        (Field::PullRequestId, "42"),
        (Field::PullRequestSection, "files-changed"),
    ],
    "/acme/repo/pulls/42/files-changed"
)]
#[case::compare(
    RouteName::Compare,
    &[(Field::RepositoryPath, "acme/repo"), (Field::DiffReferencePair, "main...dev")],
    "/acme/repo/pulls/compare/main...dev"
)]
#[case::branch_list(RouteName::BranchList, &[(Field::RepositoryPath, "acme/repo")], "/acme/repo/branches")]
#[case::settings(RouteName::Settings, &[(Field::RepositoryPath, "acme/repo")], "/acme/repo/settings")]
#[case::webhook_list(RouteName::WebhookList, &[(Field::RepositoryPath, "acme/repo")], "/acme/repo/webhooks")]
#[case::webhook_create(
    RouteName::WebhookCreate,
    &[(Field::RepositoryPath, "acme/repo")],
    "/acme/repo/webhooks/new"
)]
#[case::webhook_detail(
    RouteName::WebhookDetail,
    &[(Field::RepositoryPath, "acme/repo"), (Field::WebhookId, "9")],
    "/acme/repo/webhook/9"
)]
#[case::settings_webhook_create(
    RouteName::SettingsWebhookCreate,
    &[(Field::RepositoryPath, "acme/repo")],
    "/acme/repo/settings/webhook/new"
)]
fn test_resolves_known_paths(
    #[case] route: RouteName,
    #[case] fields: &[(Field, &str)],
    #[case] expected: &str,
) -> TestResult {
    assert_eq!(resolve(route, &params(fields))?.as_str(), expected);
    Ok(())
}

#[test]
fn test_required_only_paths_are_clean() -> TestResult {
    for route in RouteName::ALL {
        let mut required = RouteParameters::new();
        for field in route.required_fields() {
            required.set(*field, Some(format!("v{}", field.name().len())));
        }
        let path = resolve(route, &required)?;
        let path = path.as_str();

        assert!(path.starts_with('/'), "{route}: {path}");
        assert!(!path.contains("//"), "{route}: {path}");
        assert!(!path.contains(':'), "{route}: {path}");
        assert!(!path.contains('{'), "{route}: {path}");
        assert!(!path.contains("undefined"), "{route}: {path}");
    }
    Ok(())
}

#[test]
fn test_each_missing_required_field_is_reported() {
    for route in RouteName::ALL {
        for missing in route.required_fields() {
            let mut partial = RouteParameters::new();
            for field in route.fields().filter(|f| f != missing) {
                partial.set(field, Some("x".to_string()));
            }
            assert_eq!(
                resolve(route, &partial),
                Err(RouteError::MissingRequiredParameter {
                    route,
                    field: *missing,
                }),
                "{route} without {missing}"
            );
        }
    }
}

#[test]
fn test_field_vocabularies_match() {
    let report = check_consistency();
    assert!(report.is_consistent(), "{:?}", report.violations);
}

fn segment() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('a', 'z'), 1..8)
        .prop_map(|chars| chars.into_iter().collect())
}

fn nested() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|parts| parts.join("/"))
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(
        route in prop::sample::select(RouteName::ALL.to_vec()),
        values in prop::collection::vec(nested(), Field::ALL.len()),
    ) {
        let mut all = RouteParameters::new();
        for (field, value) in Field::ALL.into_iter().zip(values) {
            all.set(field, Some(value));
        }
        let first = resolve(route, &all);
        let second = resolve(route, &all);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.is_ok());
    }

    #[test]
    fn prop_repository_view_segments_are_independent(
        repository in nested(),
        git_reference in prop::option::of(nested()),
        resource in prop::option::of(nested()),
    ) {
        let mut view = RouteParameters::new().with(Field::RepositoryPath, repository.clone());
        view.set(Field::GitReference, git_reference.clone());
        view.set(Field::ResourcePath, resource.clone());

        let mut expected = format!("/{repository}");
        if let Some(git_reference) = git_reference {
            expected.push_str("//");
            expected.push_str(&git_reference);
        }
        if let Some(resource) = resource {
            expected.push_str("/~/");
            expected.push_str(&resource);
        }

        let resolved = resolve(RouteName::RepositoryView, &view);
        prop_assert_eq!(resolved.map(String::from), Ok(expected));
    }

    #[test]
    fn prop_pull_request_section_only_appends(
        repository in nested(),
        id in segment(),
        section in segment(),
    ) {
        let base = RouteParameters::new()
            .with(Field::RepositoryPath, repository)
            .with(Field::PullRequestId, id);
        let without = resolve(RouteName::PullRequestDetail, &base).map(String::from);
        let with = resolve(
            RouteName::PullRequestDetail,
            &base.clone().with(Field::PullRequestSection, section.clone()),
        )
        .map(String::from);

        prop_assert!(without.is_ok());
        prop_assert_eq!(with, without.map(|path| format!("{path}/{section}")));
    }
}
