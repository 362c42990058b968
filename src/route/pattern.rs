//! Path-pattern table consumed by the URL matcher
//!
//! Each route publishes the patterns a matcher registers to parse inbound
//! paths back into parameters. `:name` matches one segment, `:name*` matches
//! the rest of the path. Routes with optional segments publish one pattern per
//! combination of present optional fields, most specific first.
//!
//! The table is written out by hand; [`check_consistency`] keeps it honest
//! against the resolver.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

use super::{Field, PlaceholderKind, RouteName, RouteParameters, resolve};
use crate::error::{Result, RouteError};

impl RouteName {
    /// Matcher patterns for this route, most specific first
    #[must_use]
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::SignIn => &["/signin"],
            Self::SignUp => &["/signup"],
            Self::RepositoryList => &["/:spaceName"],
            Self::RepositoryView => &[
                "/:repositoryPath*//:gitReference*/~/:resourcePath*",
                "/:repositoryPath*//:gitReference*",
                "/:repositoryPath*/~/:resourcePath*",
                "/:repositoryPath*",
            ],
            Self::FileEdit => &["/:repositoryPath*/edit/:gitReference*/~/:resourcePath*"],
            Self::CommitList => &["/:repositoryPath*/commits/:commitReference*"],
            Self::PullRequestList => &["/:repositoryPath*/pulls"],
            Self::PullRequestDetail => &[
                "/:repositoryPath*/pulls/:pullRequestId/:pullRequestSection*",
                "/:repositoryPath*/pulls/:pullRequestId",
            ],
            Self::Compare => &["/:repositoryPath*/pulls/compare/:diffReferencePair*"],
            Self::BranchList => &["/:repositoryPath*/branches"],
            Self::Settings => &["/:repositoryPath*/settings"],
            Self::WebhookList => &["/:repositoryPath*/webhooks"],
            Self::WebhookCreate => &["/:repositoryPath*/webhooks/new"],
            Self::WebhookDetail => &["/:repositoryPath*/webhook/:webhookId"],
            Self::SettingsWebhookCreate => &["/:repositoryPath*/settings/webhook/new"],
        }
    }
}

/// One `/`-delimited piece of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// Text matched as-is; empty for the `//` separator
    Literal(String),
    /// A parameter slot
    Placeholder(Field),
}

/// A parsed matcher pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern string
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] if the pattern does not start
    /// with `/`, names an unknown field, uses the wrong placeholder kind for a
    /// field, or places `:` anywhere but the start of a segment.
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: String| RouteError::InvalidPattern {
            pattern: source.to_string(),
            reason,
        };

        let rest = source
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with `/`".to_string()))?;

        let mut segments = Vec::new();
        for part in rest.split('/') {
            let Some(token) = part.strip_prefix(':') else {
                if part.contains(':') {
                    return Err(invalid(format!("stray `:` in segment `{part}`")));
                }
                segments.push(Segment::Literal(part.to_string()));
                continue;
            };

            let (name, kind) = token.strip_suffix('*').map_or(
                (token, PlaceholderKind::Segment),
                |name| (name, PlaceholderKind::Greedy),
            );
            let field = Field::from_name(name)
                .ok_or_else(|| invalid(format!("unknown placeholder `{name}`")))?;
            if field.placeholder_kind() != kind {
                return Err(invalid(format!(
                    "`{name}` must be written as `{}`",
                    field.placeholder()
                )));
            }
            segments.push(Segment::Placeholder(field));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern as written
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.source.as_str()
    }

    /// Segments following the leading `/`
    #[must_use]
    pub const fn segments(&self) -> &[Segment] {
        self.segments.as_slice()
    }

    /// Fields referenced by placeholders
    #[must_use]
    pub fn fields(&self) -> BTreeSet<Field> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(field) => Some(*field),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute parameter values into the pattern
    ///
    /// Returns `None` when a placeholder has no value.
    #[must_use]
    pub fn render(&self, params: &RouteParameters) -> Option<String> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(field) => path.push_str(params.get(*field)?),
            }
        }
        Some(path)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parsed patterns of one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    /// Route the patterns belong to
    pub route: RouteName,
    /// Patterns, most specific first
    pub patterns: Vec<Pattern>,
}

/// Parse the whole table
///
/// # Errors
///
/// Returns the first [`RouteError::InvalidPattern`] encountered.
pub fn table() -> Result<Vec<TableEntry>> {
    RouteName::ALL
        .into_iter()
        .map(|route| {
            let patterns = route
                .patterns()
                .iter()
                .map(|source| Pattern::parse(source))
                .collect::<Result<Vec<_>>>()?;
            Ok(TableEntry { route, patterns })
        })
        .collect()
}

/// A disagreement between the pattern table and the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A pattern failed to parse
    Unparseable {
        /// Route owning the pattern
        route: RouteName,
        /// Parse error
        error: RouteError,
    },
    /// A pattern omits a field the route requires
    MissingRequired {
        /// Route owning the pattern
        route: RouteName,
        /// The pattern
        pattern: String,
        /// Required field absent from it
        field: Field,
    },
    /// The placeholders of a route differ from the fields it reads
    FieldSetMismatch {
        /// Route concerned
        route: RouteName,
        /// Fields the resolver reads but no pattern covers
        uncovered: Vec<Field>,
        /// Fields patterns cover but the resolver never reads
        unread: Vec<Field>,
    },
    /// A pattern and the resolver disagree on the same parameters
    RenderMismatch {
        /// Route owning the pattern
        route: RouteName,
        /// The pattern
        pattern: String,
        /// Path rendered from the pattern
        expected: String,
        /// Path produced by the resolver, or its error
        actual: String,
    },
    /// Field vocabularies of resolver and table differ overall
    VocabularyMismatch {
        /// Fields only the resolver uses
        resolver_only: Vec<Field>,
        /// Fields only the table uses
        table_only: Vec<Field>,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable { route, error } => write!(f, "{route}: {error}"),
            Self::MissingRequired {
                route,
                pattern,
                field,
            } => write!(f, "{route}: pattern `{pattern}` lacks required `{field}`"),
            Self::FieldSetMismatch {
                route,
                uncovered,
                unread,
            } => write!(
                f,
                "{route}: uncovered [{}], unread [{}]",
                join_fields(uncovered),
                join_fields(unread)
            ),
            Self::RenderMismatch {
                route,
                pattern,
                expected,
                actual,
            } => write!(
                f,
                "{route}: pattern `{pattern}` renders `{expected}` but resolver gives `{actual}`"
            ),
            Self::VocabularyMismatch {
                resolver_only,
                table_only,
            } => write!(
                f,
                "field vocabulary differs: resolver only [{}], table only [{}]",
                join_fields(resolver_only),
                join_fields(table_only)
            ),
        }
    }
}

/// Outcome of [`check_consistency`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Number of patterns examined
    pub checked_patterns: usize,
    /// Everything that disagreed
    pub violations: Vec<Violation>,
}

impl ConsistencyReport {
    /// True when no violation was found
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Sample value for a field; greedy fields get a nested value so a slash
/// inside a value is exercised too.
fn sample_value(field: Field) -> String {
    match field.placeholder_kind() {
        PlaceholderKind::Segment => format!("{}-1", field.name()),
        PlaceholderKind::Greedy => format!("{}/nested", field.name()),
    }
}

/// Cross-check the pattern table against the resolver
#[must_use]
pub fn check_consistency() -> ConsistencyReport {
    check_entries(RouteName::ALL.iter().map(|route| (*route, route.patterns())))
}

fn check_entries<'a>(
    entries: impl Iterator<Item = (RouteName, &'a [&'a str])>,
) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();
    let mut resolver_fields = BTreeSet::new();
    let mut table_fields = BTreeSet::new();

    for (route, sources) in entries {
        let declared: BTreeSet<Field> = route.fields().collect();
        resolver_fields.extend(declared.iter().copied());
        let mut covered = BTreeSet::new();

        for source in sources {
            report.checked_patterns += 1;
            let pattern = match Pattern::parse(source) {
                Ok(pattern) => pattern,
                Err(error) => {
                    report.violations.push(Violation::Unparseable { route, error });
                    continue;
                }
            };
            let fields = pattern.fields();

            for field in route.required_fields() {
                if !fields.contains(field) {
                    report.violations.push(Violation::MissingRequired {
                        route,
                        pattern: pattern.to_string(),
                        field: *field,
                    });
                }
            }

            let mut params = RouteParameters::new();
            for field in &fields {
                params.set(*field, Some(sample_value(*field)));
            }
            if let Some(expected) = pattern.render(&params) {
                let actual = resolve(route, &params)
                    .map_or_else(|err| err.to_string(), String::from);
                if actual != expected {
                    report.violations.push(Violation::RenderMismatch {
                        route,
                        pattern: pattern.to_string(),
                        expected,
                        actual,
                    });
                }
            }

            covered.extend(fields);
        }

        if covered != declared {
            report.violations.push(Violation::FieldSetMismatch {
                route,
                uncovered: declared.difference(&covered).copied().collect(),
                unread: covered.difference(&declared).copied().collect(),
            });
        }
        table_fields.extend(covered);
    }

    if resolver_fields != table_fields {
        report.violations.push(Violation::VocabularyMismatch {
            resolver_only: resolver_fields.difference(&table_fields).copied().collect(),
            table_only: table_fields.difference(&resolver_fields).copied().collect(),
        });
    }

    for violation in &report.violations {
        warn!(%violation, "Pattern table inconsistency");
    }
    debug!(
        checked = report.checked_patterns,
        violations = report.violations.len(),
        "Checked pattern table"
    );
    report
}
