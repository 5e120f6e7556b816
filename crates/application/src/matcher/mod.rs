//! Matcher language
//!
//! Placeholders recognised inside expected documents.
//!
//! # Syntax
//!
//! | token | meaning |
//! |---|---|
//! | `@string@` | any string |
//! | `@integer@` | any number without a fractional part |
//! | `@number@` | any number |
//! | `@boolean@` | `true` or `false` |
//! | `@uuid@` | a string in canonical `8-4-4-4-12` hex form |
//! | `@*@` | any value; as the only element of an array, any array |
//!
//! Prefix a token with `\` to match its literal text: `\@integer@` matches the
//! string `"@integer@"` only. Each extra leading backslash is kept, so
//! `\\@integer@` matches `"\@integer@"`.
//!
//! # Usage
//!
//! ```
//! use apitest_application::matcher::{classify, Leaf, MatcherKind, ValueType};
//!
//! let leaf = classify("@integer@").unwrap();
//! assert!(matches!(leaf, Leaf::Matcher(ref t) if t.kind == MatcherKind::Type(ValueType::Integer)));
//!
//! let leaf = classify(r"\@integer@").unwrap();
//! assert_eq!(leaf, Leaf::Literal("@integer@".into()));
//!
//! assert!(classify("@date@").is_err());
//! ```

pub mod parser;
pub mod token;

pub use parser::{array_wildcard, classify, is_matcher_syntax, Leaf, MatcherSyntaxError};
pub use token::{MatcherKind, MatcherToken, ScalarMode, ValueType};
