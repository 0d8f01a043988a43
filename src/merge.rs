//! Cross-variant merge.
//!
//! Combines the tokenized variants of one resource into a [`MergedResource`].
//!
//! ```text
//! base variant tokens ──▶ argument keys, first-seen order
//!                                  │
//! every variant's tokens ─────────▶│ capabilities per key (base first, then folder order)
//!                                  v
//!                    resolve_capability per key
//!                      ├─ Some(cap) -> ResolvedArgument (+ warning if uninhabited)
//!                      └─ failure   -> ResolutionFailure
//! ```
//!
//! Only the base variant decides which arguments exist; an argument that
//! appears in a locale variant alone is ignored. Failures are per key and never
//! drop the resource.

use crate::lattice::resolve_capability;
use crate::model::{
    Deprecation, FailureReason, MergeWarning, MergedResource, ParseIssue, PublicResource, ResolutionFailure,
    ResolvedArgument, ResourceFolder, ResourceName, TokenizedVariant, Visibility,
};
use crate::{ArgId, Capability, ChoicePolicy, Options};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Everything observed for one argument key.
struct Observed<'a> {
    /// First identity seen in the base variant; fixes the parameter name.
    id: &'a ArgId,
    capabilities: Vec<Capability>,
    mixed_identity: bool,
}

/// Merge every variant of `name`.
///
/// Returns `None` when there is no variant for the base folder.
pub fn merge_resource(
    name: &ResourceName,
    variants: &BTreeMap<ResourceFolder, TokenizedVariant>,
    public: &[PublicResource],
    options: &Options,
) -> Option<MergedResource> {
    let base_folder = options.base_folder();
    let Some(base) = variants.get(&base_folder) else {
        debug!("skipping {name}: no variant in {base_folder}");
        return None;
    };

    let (order, mut observed) = collect_base(base);
    for (folder, variant) in variants {
        if *folder == base_folder {
            continue;
        }
        for token in &variant.tokens {
            if let Some(entry) = observed.get_mut(&token.id.key()) {
                entry.mixed_identity |= entry.id.is_position() != token.id.is_position();
                entry.capabilities.push(token.capability);
            }
        }
    }

    let mut arguments = Vec::new();
    let mut failures = Vec::new();
    let mut warnings = Vec::new();
    let mut saw_choice = false;

    for key in order {
        let Some(entry) = observed.remove(&key) else {
            continue;
        };
        let uses_choice = entry.capabilities.contains(&Capability::Choice);
        saw_choice |= uses_choice;

        let reason = if entry.mixed_identity {
            Some(FailureReason::MixedIdentity)
        } else if uses_choice && options.choice_policy == ChoicePolicy::Reject {
            Some(FailureReason::ChoiceRejected)
        } else {
            None
        };
        let resolved = match reason {
            Some(reason) => Err(reason),
            None => resolve_capability(&entry.capabilities)
                .ok_or_else(|| FailureReason::Incompatible(distinct(&entry.capabilities))),
        };

        match resolved {
            Ok(capability) => {
                let argument_type = capability.argument_type();
                if argument_type.is_uninhabited() {
                    warn!("{name}: argument {key} resolves to {argument_type}");
                    warnings.push(MergeWarning::NoArgument { key: key.clone() });
                }
                arguments.push(ResolvedArgument {
                    parameter_name: entry.id.parameter_name(),
                    key,
                    argument_type,
                    capability,
                });
            }
            Err(reason) => {
                let failure = ResolutionFailure { key, reason };
                warn!("{name}: {failure}");
                failures.push(failure);
            }
        }
    }

    let deprecation = if saw_choice && options.choice_policy == ChoicePolicy::Deprecate {
        Deprecation::legacy_choice()
    } else {
        Deprecation::None
    };

    let parse_issues: Vec<ParseIssue> = variants
        .iter()
        .filter_map(|(folder, variant)| {
            let error = variant.error.as_ref()?;
            Some(ParseIssue { folder: folder.clone(), message: error.to_string() })
        })
        .collect();

    let merged = MergedResource {
        name: name.clone(),
        description: base.description.clone(),
        visibility: Visibility::of(name, public, &options.resource_type),
        arguments,
        deprecation,
        failures,
        has_contiguous_numbered_args: has_contiguous_numbered_args(base),
        parse_issues,
        warnings,
    };
    debug!(
        "merged {name}: {} argument(s), {} failure(s), {} variant(s)",
        merged.arguments.len(),
        merged.failures.len(),
        variants.len()
    );
    Some(merged)
}

/// Keys of the base variant in first-seen order, with their base capabilities.
fn collect_base(base: &TokenizedVariant) -> (Vec<String>, HashMap<String, Observed<'_>>) {
    let mut order = Vec::new();
    let mut observed: HashMap<String, Observed<'_>> = HashMap::new();
    for token in &base.tokens {
        let key = token.id.key();
        match observed.get_mut(&key) {
            Some(entry) => {
                entry.mixed_identity |= entry.id.is_position() != token.id.is_position();
                entry.capabilities.push(token.capability);
            }
            None => {
                order.push(key.clone());
                observed.insert(
                    key,
                    Observed { id: &token.id, capabilities: vec![token.capability], mixed_identity: false },
                );
            }
        }
    }
    (order, observed)
}

/// True when the distinct base identities are exactly the positions `0..n`.
fn has_contiguous_numbered_args(base: &TokenizedVariant) -> bool {
    let distinct_keys: BTreeSet<String> = base.tokens.iter().map(|t| t.id.key()).collect();
    let positions: BTreeSet<u32> = base
        .tokens
        .iter()
        .filter_map(|t| match t.id {
            ArgId::Position(position) => Some(position),
            ArgId::Name(_) => None,
        })
        .collect();
    positions.len() == distinct_keys.len() && positions.iter().enumerate().all(|(i, p)| *p as usize == i)
}

fn distinct(capabilities: &[Capability]) -> Vec<Capability> {
    let mut out = Vec::new();
    for capability in capabilities {
        if !out.contains(capability) {
            out.push(*capability);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgumentType, MessageResource, Token, tokenize_resource};

    const BASE: &str = "values";

    fn variant(tokens: Vec<Token>) -> TokenizedVariant {
        TokenizedVariant { name: ResourceName::from("test"), description: None, tokens, error: None }
    }

    fn from_text(text: &str) -> TokenizedVariant {
        tokenize_resource(&MessageResource::new("test", text))
    }

    fn merge(variants: Vec<(&str, TokenizedVariant)>) -> MergedResource {
        merge_with(variants, &Options::default())
    }

    fn merge_with(variants: Vec<(&str, TokenizedVariant)>, options: &Options) -> MergedResource {
        let variants: BTreeMap<ResourceFolder, TokenizedVariant> =
            variants.into_iter().map(|(folder, v)| (ResourceFolder::from(folder), v)).collect();
        merge_resource(&ResourceName::from("test"), &variants, &[], options).unwrap()
    }

    fn types(merged: &MergedResource) -> Vec<(&str, &str, ArgumentType)> {
        merged
            .arguments
            .iter()
            .map(|a| (a.key.as_str(), a.parameter_name.as_str(), a.argument_type))
            .collect()
    }

    #[test]
    fn missing_base_variant_skips_the_resource() {
        let variants = BTreeMap::from([(ResourceFolder::from("values-es"), from_text("Hola {name}"))]);
        assert_eq!(merge_resource(&ResourceName::from("test"), &variants, &[], &Options::default()), None);
    }

    #[test]
    fn positional_arguments_in_order() {
        let merged = merge(vec![(BASE, from_text("A {0} B {1, number} C {2, date} D {3, time}"))]);
        assert_eq!(
            types(&merged),
            vec![
                ("0", "arg0", ArgumentType::Any),
                ("1", "arg1", ArgumentType::Number),
                ("2", "arg2", ArgumentType::Date),
                ("3", "arg3", ArgumentType::Time),
            ]
        );
        assert!(merged.has_contiguous_numbered_args);
        assert!(merged.is_clean());
    }

    #[test]
    fn plural_count_reused_in_branches() {
        let merged = merge(vec![(BASE, from_text("{count, plural, zero {Z {count}} one {Y {count}} other {X {count}}}"))]);
        assert_eq!(types(&merged), vec![("count", "count", ArgumentType::Integer)]);
        assert_eq!(merged.arguments[0].capability, Capability::Plural);
        assert!(!merged.has_contiguous_numbered_args);
    }

    #[test]
    fn plural_and_ordinal_settle_on_plural_in_either_order() {
        for text in ["{n, plural, other {{n, ordinal}}}", "{n, ordinal} {n, plural, other {x}}"] {
            let merged = merge(vec![(BASE, from_text(text))]);
            assert_eq!(merged.arguments[0].capability, Capability::Plural, "{text}");
            assert_eq!(merged.arguments[0].argument_type, ArgumentType::Integer, "{text}");
        }
    }

    #[test]
    fn spellout_across_variants_settles_on_number() {
        let merged = merge(vec![(BASE, from_text("{0, spellout}")), ("values-de", from_text("{0, number}"))]);
        assert_eq!(merged.arguments[0].capability, Capability::Number);
    }

    #[test]
    fn date_and_time_across_variants_combine() {
        let merged = merge(vec![(BASE, from_text("{0, date}")), ("values-es", from_text("{0, time}"))]);
        assert_eq!(types(&merged), vec![("0", "arg0", ArgumentType::DateTime)]);
        assert!(merged.failures.is_empty());
    }

    #[test]
    fn date_and_time_in_one_variant_combine() {
        let merged = merge(vec![(
            BASE,
            variant(vec![Token::positional(0, Capability::Date), Token::positional(0, Capability::Time)]),
        )]);
        assert_eq!(types(&merged), vec![("0", "arg0", ArgumentType::DateTime)]);
        assert_eq!(merged.deprecation, Deprecation::None);
    }

    #[test]
    fn incompatible_argument_fails_alone() {
        let merged = merge(vec![
            (BASE, from_text("{0, date} {1, number}")),
            ("values-fr", from_text("{0, plural, other {x}} {1}")),
        ]);
        assert_eq!(merged.failed_keys(), vec!["0"]);
        assert_eq!(
            merged.failures[0].reason,
            FailureReason::Incompatible(vec![Capability::Date, Capability::Plural])
        );
        assert_eq!(merged.failures[0].to_string(), "Incompatible argument types for: 0");
        assert_eq!(types(&merged), vec![("1", "arg1", ArgumentType::Number)]);
    }

    #[test]
    fn zone_only_pattern_is_not_date_or_time() {
        let merged = merge(vec![(BASE, from_text("{0, time, zzzz}"))]);
        assert_eq!(merged.arguments[0].capability, Capability::Zone);
        assert_eq!(merged.arguments[0].argument_type, ArgumentType::ZonedDateTime);
    }

    #[test]
    fn locale_only_arguments_are_ignored() {
        let merged = merge(vec![(BASE, from_text("Hi {name}")), ("values-de", from_text("Hallo {name} {title}"))]);
        assert_eq!(types(&merged), vec![("name", "name", ArgumentType::Any)]);
    }

    #[test]
    fn first_seen_order_is_kept() {
        let merged = merge(vec![(BASE, from_text("{b} {a} {b, number} {c}"))]);
        let keys: Vec<&str> = merged.arguments.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(merged.arguments[0].argument_type, ArgumentType::Number);
    }

    #[test]
    fn parse_errors_are_reported_per_folder() {
        let merged = merge(vec![(BASE, from_text("Hello {name}")), ("values-it", from_text("Ciao {name"))]);
        assert_eq!(types(&merged), vec![("name", "name", ArgumentType::Any)]);
        assert_eq!(merged.parse_issues.len(), 1);
        assert_eq!(merged.parse_issues[0].folder, ResourceFolder::from("values-it"));
        assert_eq!(merged.parse_issues[0].message, "Unmatched '{' braces in message \"Ciao {name\"");
    }

    #[test]
    fn broken_base_variant_yields_no_arguments() {
        let merged = merge(vec![(BASE, from_text("Test {{test}}")), ("values-es", from_text("{test}"))]);
        assert!(merged.arguments.is_empty());
        assert_eq!(merged.parse_issues[0].message, "Bad argument syntax: [at pattern index 6] \"{test}}\"");
        assert!(!merged.is_clean());
    }

    #[test]
    fn uninhabited_argument_is_kept_with_a_warning() {
        let merged = merge(vec![(BASE, from_text("{0, date, 'today'}"))]);
        assert_eq!(types(&merged), vec![("0", "arg0", ArgumentType::Nothing)]);
        assert_eq!(merged.warnings, vec![MergeWarning::NoArgument { key: "0".to_string() }]);
    }

    #[test]
    fn choice_policy() {
        let text = "{n, choice, 0#none|1#one} {when, date}";

        let merged = merge(vec![(BASE, from_text(text))]);
        assert!(merged.deprecation.is_deprecated());
        assert_eq!(merged.arguments[0].argument_type, ArgumentType::Number);

        let allow = Options { choice_policy: ChoicePolicy::Allow, ..Options::default() };
        let merged = merge_with(vec![(BASE, from_text(text))], &allow);
        assert_eq!(merged.deprecation, Deprecation::None);
        assert_eq!(merged.arguments.len(), 2);

        let reject = Options { choice_policy: ChoicePolicy::Reject, ..Options::default() };
        let merged = merge_with(vec![(BASE, from_text(text))], &reject);
        assert_eq!(merged.failures, vec![ResolutionFailure { key: "n".to_string(), reason: FailureReason::ChoiceRejected }]);
        assert_eq!(types(&merged), vec![("when", "when", ArgumentType::Date)]);
    }

    #[test]
    fn mixed_identity_is_a_failure() {
        let merged = merge(vec![
            (BASE, variant(vec![Token::positional(0, Capability::Number)])),
            ("values-es", variant(vec![Token::named("0", Capability::Number)])),
        ]);
        assert_eq!(merged.failures[0].reason, FailureReason::MixedIdentity);
        assert!(merged.arguments.is_empty());
    }

    #[test]
    fn contiguity() {
        assert!(merge(vec![(BASE, from_text("no arguments"))]).has_contiguous_numbered_args);
        assert!(merge(vec![(BASE, from_text("{1} {0} {1}"))]).has_contiguous_numbered_args);
        assert!(!merge(vec![(BASE, from_text("{0} {2}"))]).has_contiguous_numbered_args);
        assert!(!merge(vec![(BASE, from_text("{0} {name}"))]).has_contiguous_numbered_args);
    }

    #[test]
    fn custom_base_folder() {
        let options = Options { base_folder: "values-en".to_string(), ..Options::default() };
        let merged = merge_with(vec![("values-en", from_text("{who}")), ("values", from_text("{other}"))], &options);
        assert_eq!(types(&merged), vec![("who", "who", ArgumentType::Any)]);
    }

    #[test]
    fn description_comes_from_the_base_variant() {
        let base = tokenize_resource(&MessageResource::new("test", "Hi").with_description("Greeting"));
        let merged = merge(vec![(BASE, base)]);
        assert_eq!(merged.description.as_deref(), Some("Greeting"));
        assert_eq!(merged.visibility, Visibility::Public);
    }
}
