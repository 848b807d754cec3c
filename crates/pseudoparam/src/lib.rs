//! # pseudoparam - pseudo parameter placeholders
//!
//! Rewrites `#{...}` placeholders that reference platform pseudo parameters (region,
//! account id, ...) in configuration trees.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `pseudoparam` works internally.
//!
//! ### Tokens
//!
//! A token is a placeholder inside a string:
//!
//! ```yaml
//! BucketName: "uploads-#{AWS::AccountId}-#{AWS::Region}"
//! ```
//!
//! By default any name between `#{` and `}` is a token. With `allowReferences: false` only
//! names of the form `AWS::<Identifier>` are. See [token::TokenMatcher].
//!
//! ### Loading
//!
//! JSON and YAML documents are converted into a [value::Value] tree (see
//! [document::load_file]). Objects keep their key order, which is also the order in which
//! they are walked and written back out.
//!
//! ### Walking
//!
//! [walk::TreeWalker] visits every entry of a tree depth first. For each string entry:
//!
//! - with region replacement enabled (`skipRegionReplace: false`) the first literal region
//!   name (`us-east-1`, see [regions]) is turned into `#{AWS::Region}`
//! - if the string now contains a token it is passed to a [policy::SubstitutionPolicy]
//!   together with its key, and the entry is replaced with the result
//!
//! Nested objects and arrays are walked in place. Numbers, booleans, null and tagged YAML
//! values are never touched.
//!
//! ### Policies
//!
//! | **pass**                                 | **policy**         | **input**          | **output**                               |
//! |------------------------------------------|--------------------|--------------------|------------------------------------------|
//! | [pass::wrap_compiled_template]           | [policy::Wrap]     | `a-#{AWS::Region}` | `{ "Fn::Sub": "a-${AWS::Region}" }`      |
//! | [pass::wrap_compiled_template] (`Fn::Sub` key) | [policy::Wrap] | `a-#{AWS::Region}` | `a-${AWS::Region}`                  |
//! | [pass::resolve_service_description]      | [policy::Resolve]  | `a-#{AWS::Region}` | `a-eu-west-1`                            |
//!
//! The resolve pass only knows `AWS::Region` (from `provider.region`) and `AWS::AccountId`
//! (see [policy::ResolutionMap]). Unknown tokens stay as they are.
//!
//! Since `${...}` never matches the token pattern, running a pass twice changes nothing.
//!
//! ### Options
//!
//! [config::Options] are read from `custom.pseudoParameters` of the service description.
//! With `debug` set every replacement is reported through a [diagnostics::DiagnosticsSink].
//!
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod pass;
pub mod policy;
pub mod regions;
pub mod token;
pub mod value;
pub mod walk;
