use crate::model::{MergedResource, MessageResource, PublicResource, ResourceFolder, TokenizedVariant};
use crate::pipeline::{self, ProcessOutput};
use crate::tokenizer::{self, PatternError};
use crate::{Options, Token};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Tokenize one message pattern.
///
/// # Example
/// ```
/// use phrasetype::{Capability, Token, tokenize};
///
/// let tokens = tokenize("{count, plural, one {# file} other {# files}} in {folder}").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Token::named("count", Capability::Plural), Token::named("folder", Capability::None)]
/// );
/// ```
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    tokenizer::scan(pattern)
}

/// Tokenize one folder's text for a resource.
///
/// A parse error is kept on the returned variant, never propagated.
pub fn tokenize_resource(resource: &MessageResource) -> TokenizedVariant {
    match tokenizer::scan(&resource.text) {
        Ok(tokens) => {
            debug!("tokenized {}: {} token(s)", resource.name, tokens.len());
            TokenizedVariant::parsed(resource, tokens)
        }
        Err(err) => {
            warn!("{}: {err}", resource.name);
            TokenizedVariant::failed(resource, err)
        }
    }
}

/// Tokenize and merge every resource in `inputs`, sorted by resource name.
///
/// `inputs` maps each folder to the resources read from it. Resources with no
/// variant in the base folder are skipped.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use phrasetype::{ArgumentType, MessageResource, Options, ResourceFolder, process};
///
/// let inputs = BTreeMap::from([
///     (ResourceFolder::from("values"), vec![MessageResource::new("when", "{0, date}")]),
///     (ResourceFolder::from("values-es"), vec![MessageResource::new("when", "{0, time}")]),
/// ]);
/// let merged = process(&inputs, &[], &Options::default());
/// assert_eq!(merged[0].arguments[0].argument_type, ArgumentType::DateTime);
/// ```
pub fn process(
    inputs: &BTreeMap<ResourceFolder, Vec<MessageResource>>,
    public: &[PublicResource],
    options: &Options,
) -> Vec<MergedResource> {
    pipeline::run(inputs, public, options).resources
}

/// Like [`process`], also returning timings and counts.
pub fn process_verbose(
    inputs: &BTreeMap<ResourceFolder, Vec<MessageResource>>,
    public: &[PublicResource],
    options: &Options,
) -> ProcessOutput {
    pipeline::run(inputs, public, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, Visibility};

    #[test]
    fn tokenize_resource_keeps_errors_on_the_variant() {
        let variant = tokenize_resource(&MessageResource::new("broken", "Test {{test}}").with_description("d"));
        assert!(variant.tokens.is_empty());
        assert_eq!(variant.description.as_deref(), Some("d"));
        assert!(matches!(variant.error, Some(PatternError::BadArgumentSyntax { .. })));
    }

    #[test]
    fn tokenize_resource_collects_tokens() {
        let variant = tokenize_resource(&MessageResource::new("ok", "{0, number}"));
        assert_eq!(variant.tokens, vec![Token::positional(0, Capability::Number)]);
        assert_eq!(variant.error, None);
    }

    #[test]
    fn process_verbose_matches_process() {
        let inputs = BTreeMap::from([(
            ResourceFolder::from("values"),
            vec![MessageResource::new("a", "{x}"), MessageResource::new("b", "{y, number}")],
        )]);
        let public = [PublicResource::Named { name: "b".to_string(), resource_type: "string".to_string() }];

        let plain = process(&inputs, &public, &Options::default());
        let verbose = process_verbose(&inputs, &public, &Options::default());

        assert_eq!(plain, verbose.resources);
        assert_eq!(verbose.metrics.resources, 2);
        assert!(verbose.metrics.merge <= verbose.metrics.total);
        assert_eq!(plain[0].visibility, Visibility::Private);
        assert_eq!(plain[1].visibility, Visibility::Public);
    }
}
