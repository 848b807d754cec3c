//! the two entry points
//!
//! - [wrap_compiled_template] runs once the compiled template is final. Every top level
//!   section is walked and tokens become `Fn::Sub` expressions.
//! - [resolve_service_description] runs before offline execution. Only the `functions`,
//!   `custom`, `resources` and `provider` sections are walked and tokens are resolved to
//!   literal values where possible.
//!
//! Both passes mutate the given root in place and return it.
use crate::config::Options;
use crate::diagnostics::{Diagnostics, DiagnosticsSink, SKIPPING_REGION_REPLACE};
use crate::policy::{ResolutionMap, Resolve, SubstitutionPolicy, Wrap};
use crate::value::Value;
use crate::walk::{PathLabel, TreeWalker};

/// Sections of a service description that are resolved
pub const SERVICE_SECTIONS: [&str; 4] = ["functions", "custom", "resources", "provider"];

/// Rewrite tokens in a compiled template into substitution expressions
pub fn wrap_compiled_template<'v>(
    template: &'v mut Value,
    options: &Options,
    sink: &mut dyn DiagnosticsSink,
) -> &'v mut Value {
    let mut walker = start(options, sink);
    let mut policy = Wrap::new(walker.matcher());

    walk_sections(&mut walker, template, &mut policy, |_| true);
    template
}

/// Resolve tokens in a service description to literal values
pub fn resolve_service_description<'v>(
    service: &'v mut Value,
    options: &Options,
    resolution: &ResolutionMap,
    sink: &mut dyn DiagnosticsSink,
) -> &'v mut Value {
    let mut walker = start(options, sink);
    let mut policy = Resolve::new(walker.matcher(), resolution);

    walk_sections(&mut walker, service, &mut policy, |section| {
        SERVICE_SECTIONS.contains(&section)
    });
    service
}

fn start<'a>(options: &'a Options, sink: &'a mut dyn DiagnosticsSink) -> TreeWalker<'a> {
    let mut walker = TreeWalker::new(options, Diagnostics::new(options, sink));

    let diagnostics = walker.diagnostics();
    diagnostics.header();
    if options.skip_region_replace {
        diagnostics.notice(SKIPPING_REGION_REPLACE);
    }

    walker
}

fn walk_sections(
    walker: &mut TreeWalker<'_>,
    root: &mut Value,
    policy: &mut dyn SubstitutionPolicy,
    include: impl Fn(&str) -> bool,
) {
    let Value::Object(sections) = root else {
        tracing::debug!("root is not an object, nothing to do");
        return;
    };

    for (identifier, section) in sections.iter_mut() {
        if !include(identifier.as_str()) {
            tracing::trace!(%identifier, "section skipped");
            continue;
        }

        walker.walk(section, &PathLabel::root(identifier.as_str()), policy);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::OFFLINE_ACCOUNT_ID;
    use crate::token::TokenMatcher;
    use crate::yaml_document;
    use pretty_assertions::assert_eq;

    fn quiet() -> Options {
        Options {
            color: false,
            ..Options::default()
        }
    }

    fn wrap(mut template: Value, options: &Options) -> Value {
        wrap_compiled_template(&mut template, options, &mut |_: &str| {});
        template
    }

    fn resolve(mut service: Value, options: &Options) -> Value {
        let resolution = ResolutionMap::for_service_description(&service, OFFLINE_ACCOUNT_ID);
        resolve_service_description(&mut service, options, &resolution, &mut |_: &str| {});
        service
    }

    #[test]
    fn strings_without_tokens_are_unchanged() {
        let template = yaml_document! {r##"
Resources:
  Queue:
    Type: AWS::SQS::Queue
    Properties:
      QueueName: plain-name
      DelaySeconds: 5
      Tags: [a, b]
"##};

        assert_eq!(wrap(template.clone(), &quiet()), template);

        let service = yaml_document!("provider:\n  region: eu-west-1\ncustom:\n  name: plain");
        assert_eq!(resolve(service.clone(), &quiet()), service);
    }

    #[test]
    fn wrap_template() {
        let template = yaml_document! {r##"
Resources:
  Bucket:
    Properties:
      BucketName: "#{AWS::AccountId}-uploads"
      Arns:
        - "arn:aws:s3:::#{AWS::Region}-one"
        - Fn::Sub: "arn:aws:sqs:#{AWS::Region}:#{AWS::AccountId}:q"
"##};

        assert_eq!(
            wrap(template, &quiet()),
            yaml_document! {r##"
Resources:
  Bucket:
    Properties:
      BucketName:
        Fn::Sub: "${AWS::AccountId}-uploads"
      Arns:
        - Fn::Sub: "arn:aws:s3:::${AWS::Region}-one"
        - Fn::Sub: "arn:aws:sqs:${AWS::Region}:${AWS::AccountId}:q"
"##}
        );
    }

    #[test]
    fn wrap_is_idempotent() {
        let template = yaml_document!("Outputs:\n  Region:\n    Value: '#{AWS::Region}'");
        let once = wrap(template, &quiet());
        let twice = wrap(once.clone(), &quiet());

        assert_eq!(once, twice);
    }

    #[test]
    fn numbers_survive_the_pass() {
        let template = crate::document::parse(
            r##"{"Resources": {"Big": 18446744073709551615, "Name": "#{AWS::Region}"}}"##,
            crate::document::Format::Json,
        )
        .unwrap();

        let wrapped = wrap(template, &quiet());

        assert_eq!(
            wrapped.get_path("Resources.Big"),
            Some(&Value::UnsignedInteger(u64::MAX))
        );
        assert_eq!(
            serde_json::to_string(&wrapped).unwrap(),
            r#"{"Resources":{"Big":18446744073709551615,"Name":{"Fn::Sub":"${AWS::Region}"}}}"#
        );
    }

    #[test]
    fn top_level_scalars_are_left_alone() {
        let template = yaml_document!("Description: '#{AWS::Region}'\nResources: {}");

        assert_eq!(wrap(template.clone(), &quiet()), template);
    }

    #[test]
    fn resolve_only_known_sections() {
        let service = yaml_document! {r##"
service: "#{AWS::Region}"
provider:
  region: us-west-2
  environment:
    ACCOUNT: "#{AWS::AccountId}"
functions:
  hello:
    handler: handler.hello
    environment:
      QUEUE: "https://sqs.#{AWS::Region}.amazonaws.com/#{AWS::AccountId}/q"
custom:
  other: "#{AWS::StackName}"
package:
  name: "#{AWS::Region}"
"##};

        assert_eq!(
            resolve(service, &quiet()),
            yaml_document! {r##"
service: "#{AWS::Region}"
provider:
  region: us-west-2
  environment:
    ACCOUNT: "123456789012"
functions:
  hello:
    handler: handler.hello
    environment:
      QUEUE: "https://sqs.us-west-2.amazonaws.com/123456789012/q"
custom:
  other: "#{AWS::StackName}"
package:
  name: "#{AWS::Region}"
"##}
        );
    }

    #[test]
    fn region_promotion_matches_explicit_token() {
        let options = Options {
            skip_region_replace: false,
            ..quiet()
        };

        let promoted = wrap(
            yaml_document!("Resources:\n  Topic:\n    Name: topic-us-east-1"),
            &options,
        );
        let explicit = wrap(
            yaml_document!("Resources:\n  Topic:\n    Name: 'topic-#{AWS::Region}'"),
            &quiet(),
        );

        assert_eq!(promoted, explicit);
    }

    #[test]
    fn region_promotion_in_service_resolves_to_provider_region() {
        let options = Options {
            skip_region_replace: false,
            ..quiet()
        };
        let service = yaml_document! {r##"
provider:
  region: eu-west-2
custom:
  url: https://us-east-1.example.com
"##};

        let resolved = resolve(service, &options);

        assert_eq!(
            resolved.get_path("custom.url"),
            Some(&Value::from("https://eu-west-2.example.com"))
        );
    }

    #[test]
    fn restricted_mode_ignores_references() {
        let options = Options {
            allow_references: false,
            ..quiet()
        };
        let template = yaml_document!("Resources:\n  A:\n    Name: '#{custom.foo}'");

        assert_eq!(wrap(template.clone(), &options), template);
        assert!(!TokenMatcher::new(false).is_match("#{custom.foo}"));
    }

    #[test]
    fn debug_output() {
        let options = Options {
            debug: true,
            ..quiet()
        };
        let mut template = yaml_document!("Resources:\n  Bucket:\n    Name: '#{AWS::Region}'");
        let mut lines = Vec::<String>::new();
        let mut sink = |line: &str| lines.push(line.to_owned());

        wrap_compiled_template(&mut template, &options, &mut sink);

        assert_eq!(
            lines,
            vec![
                "AWS Pseudo Parameters",
                "Skipping automatic replacement of regions with account region!",
                "AWS Pseudo Parameter: Resources::Bucket::Name Replaced AWS::Region with ${AWS::Region}",
            ]
        );
    }
}
