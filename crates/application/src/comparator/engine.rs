//! Expected-driven structural comparison.

use apitest_domain::{Document, DocumentPath, MismatchTrail, Object, describe_array_len};

use crate::matcher::{Leaf, MatcherKind, MatcherSyntaxError, MatcherToken, ScalarMode, array_wildcard, classify};

/// Walks an expected and an actual document in lockstep.
///
/// Objects are compared as subsets: every expected key must be present,
/// extra actual keys are ignored. Arrays are positional unless the expected
/// array is `["@*@"]`. After a mismatch the walk continues with the next
/// sibling, so the trail lists every difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    scalar_mode: ScalarMode,
}

impl Comparator {
    /// Creates a comparator for typed (JSON) documents.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scalar_mode: ScalarMode::Typed,
        }
    }

    /// Sets how actual scalar leaves are typed (builder pattern).
    #[must_use]
    pub const fn with_scalar_mode(mut self, scalar_mode: ScalarMode) -> Self {
        self.scalar_mode = scalar_mode;
        self
    }

    /// The configured scalar mode.
    #[must_use]
    pub const fn scalar_mode(&self) -> ScalarMode {
        self.scalar_mode
    }

    /// Compares `actual` against `expected`.
    ///
    /// Returns an empty trail on success.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherSyntaxError`] as soon as the expected document uses
    /// matcher syntax with an unknown type.
    pub fn compare(&self, expected: &Document, actual: &Document) -> Result<MismatchTrail, MatcherSyntaxError> {
        let mut trail = MismatchTrail::new();
        let mut path = DocumentPath::root();
        self.walk(expected, actual, &mut path, &mut trail)?;
        Ok(trail)
    }

    fn walk(
        &self,
        expected: &Document,
        actual: &Document,
        path: &mut DocumentPath,
        trail: &mut MismatchTrail,
    ) -> Result<(), MatcherSyntaxError> {
        match expected {
            Document::String(raw) => match classify(raw)? {
                Leaf::Matcher(token) => self.apply_matcher(&token, actual, path, trail),
                Leaf::Literal(text) => {
                    if actual.as_str() != Some(text.as_ref()) {
                        trail.record(path, Document::string(text).describe(), describe_actual(expected, actual));
                    }
                }
            },
            Document::Null => {
                if !matches!(actual, Document::Null) {
                    trail.record(path, "null", describe_actual(expected, actual));
                }
            }
            Document::Bool(value) => {
                if !matches!(actual, Document::Bool(b) if b == value) {
                    trail.record(path, expected.describe(), describe_actual(expected, actual));
                }
            }
            Document::Number(value) => {
                if !matches!(actual, Document::Number(n) if n == value) {
                    trail.record(path, expected.describe(), describe_actual(expected, actual));
                }
            }
            Document::Object(expected_map) => match actual {
                Document::Object(actual_map) => {
                    self.walk_object(expected_map, actual_map, path, trail)?;
                }
                _ => {
                    validate(expected)?;
                    trail.record(path, "object", actual.describe_with_kind());
                }
            },
            Document::Array(expected_items) => match actual {
                Document::Array(actual_items) => {
                    self.walk_array(expected_items, actual_items, path, trail)?;
                }
                _ => {
                    validate(expected)?;
                    trail.record(path, describe_array_len(expected_items.len()), actual.describe_with_kind());
                }
            },
        }
        Ok(())
    }

    fn apply_matcher(&self, token: &MatcherToken, actual: &Document, path: &DocumentPath, trail: &mut MismatchTrail) {
        match token.kind {
            MatcherKind::AnyValue | MatcherKind::ArrayWildcard => {}
            MatcherKind::Type(value_type) => {
                if !value_type.accepts(actual, self.scalar_mode) {
                    trail.record(path, token.describe(), actual.describe_with_kind());
                }
            }
        }
    }

    fn walk_object(
        &self,
        expected: &Object,
        actual: &Object,
        path: &mut DocumentPath,
        trail: &mut MismatchTrail,
    ) -> Result<(), MatcherSyntaxError> {
        for (key, expected_value) in expected {
            path.push_key(key.as_str());
            let result = match actual.get(key) {
                Some(actual_value) => self.walk(expected_value, actual_value, path, trail),
                None => describe_expected(expected_value)
                    .map(|description| trail.record(path, description, "missing key")),
            };
            path.pop();
            result?;
        }
        Ok(())
    }

    fn walk_array(
        &self,
        expected: &[Document],
        actual: &[Document],
        path: &mut DocumentPath,
        trail: &mut MismatchTrail,
    ) -> Result<(), MatcherSyntaxError> {
        if array_wildcard(expected).is_some() {
            return Ok(());
        }
        if expected.len() != actual.len() {
            expected.iter().try_for_each(validate)?;
            trail.record(path, describe_array_len(expected.len()), describe_array_len(actual.len()));
            return Ok(());
        }
        for (index, (expected_item, actual_item)) in expected.iter().zip(actual).enumerate() {
            path.push_index(index);
            let result = self.walk(expected_item, actual_item, path, trail);
            path.pop();
            result?;
        }
        Ok(())
    }
}

/// Same-kind values render bare; a kind change is spelled out (`number 3`).
fn describe_actual(expected: &Document, actual: &Document) -> String {
    if expected.kind() == actual.kind() {
        actual.describe()
    } else {
        actual.describe_with_kind()
    }
}

/// Describes what the fixture expects at a node the actual document lacks.
/// Matchers are validated here too, so a typo is never hidden by a missing key.
fn describe_expected(expected: &Document) -> Result<String, MatcherSyntaxError> {
    match expected {
        Document::String(raw) => Ok(match classify(raw)? {
            Leaf::Matcher(token) => token.describe(),
            Leaf::Literal(text) => Document::string(text).describe(),
        }),
        Document::Array(items) if array_wildcard(items).is_some() => Ok("any array".to_string()),
        other => {
            validate(other)?;
            Ok(other.describe())
        }
    }
}

/// Checks every matcher in an expected subtree the walk does not descend
/// into, so a typo there still surfaces as a fixture error.
fn validate(expected: &Document) -> Result<(), MatcherSyntaxError> {
    match expected {
        Document::String(raw) => classify(raw).map(|_| ()),
        Document::Object(map) => map.values().try_for_each(validate),
        Document::Array(items) => items.iter().try_for_each(validate),
        Document::Null | Document::Bool(_) | Document::Number(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apitest_domain::{Mismatch, Number};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compare(expected: serde_json::Value, actual: serde_json::Value) -> MismatchTrail {
        Comparator::new()
            .compare(&Document::from(expected), &Document::from(actual))
            .expect("fixture should be valid")
    }

    fn entries(trail: &MismatchTrail) -> Vec<String> {
        trail.iter().map(Mismatch::to_string).collect()
    }

    #[test]
    fn test_reflexive_for_plain_documents() {
        let doc = json!({
            "message": "Hello ApiTestCase World!",
            "unicode": "€ ¥ 💰",
            "items": [1, 2.5, -3, null, true, {"nested": ["a", "b"]}],
            "empty": {},
            "none": []
        });
        assert!(compare(doc.clone(), doc).is_empty());
    }

    #[test]
    fn test_extra_actual_keys_are_tolerated() {
        assert!(compare(json!({"a": 1}), json!({"a": 1, "b": 2})).is_empty());
    }

    #[test]
    fn test_missing_key_is_reported() {
        let trail = compare(json!({"a": 1, "b": 2}), json!({"a": 1}));
        assert_eq!(entries(&trail), vec!["b: expected 2, got missing key"]);
    }

    #[test]
    fn test_missing_key_describes_matcher() {
        let trail = compare(json!({"id": "@uuid@", "tags": ["@*@"]}), json!({}));
        assert_eq!(
            entries(&trail),
            vec!["id: expected uuid, got missing key", "tags: expected any array, got missing key"]
        );
    }

    #[test]
    fn test_type_matcher() {
        assert!(compare(json!({"id": "@integer@"}), json!({"id": 42})).is_empty());

        let trail = compare(json!({"id": "@integer@"}), json!({"id": "42"}));
        assert_eq!(entries(&trail), vec![r#"id: expected integer, got string "42""#]);
    }

    #[test]
    fn test_every_type_matcher() {
        let expected = json!({
            "s": "@string@",
            "i": "@integer@",
            "n": "@number@",
            "b": "@boolean@",
            "u": "@uuid@"
        });
        let actual = json!({
            "s": "text",
            "i": -7,
            "n": 0.25,
            "b": false,
            "u": "550e8400-e29b-41d4-a716-446655440000"
        });
        assert!(compare(expected.clone(), actual).is_empty());

        let wrong = json!({"s": 1, "i": 1.5, "n": "1", "b": "true", "u": "not-a-uuid"});
        assert_eq!(
            entries(&compare(expected, wrong)),
            vec![
                "s: expected string, got number 1",
                "i: expected integer, got number 1.5",
                r#"n: expected number, got string "1""#,
                r#"b: expected boolean, got string "true""#,
                r#"u: expected uuid, got string "not-a-uuid""#,
            ]
        );
    }

    #[test]
    fn test_any_value_matches_everything() {
        for actual in [json!(null), json!(1), json!("x"), json!([1]), json!({"k": "v"})] {
            assert!(compare(json!({"v": "@*@"}), json!({"v": actual})).is_empty());
        }
    }

    #[test]
    fn test_any_value_still_requires_key() {
        let trail = compare(json!({"v": "@*@"}), json!({}));
        assert_eq!(entries(&trail), vec!["v: expected any value, got missing key"]);
    }

    #[test]
    fn test_array_wildcard() {
        assert!(compare(json!({"items": ["@*@"]}), json!({"items": []})).is_empty());
        assert!(compare(json!({"items": ["@*@"]}), json!({"items": [1, 2, 3]})).is_empty());
        assert!(compare(json!({"items": ["@*@"]}), json!({"items": [{"a": 1}, "b"]})).is_empty());

        let trail = compare(json!({"items": ["@*@"]}), json!({"items": "nope"}));
        assert_eq!(entries(&trail), vec![r#"items: expected array of 1 element, got string "nope""#]);
    }

    #[test]
    fn test_wildcard_among_other_elements_is_positional() {
        assert!(compare(json!(["@*@", 2]), json!([{"x": 1}, 2])).is_empty());
        let trail = compare(json!(["@*@", 2]), json!([1]));
        assert_eq!(entries(&trail), vec!["$: expected array of 2 elements, got array of 1 element"]);
    }

    #[test]
    fn test_escaped_matcher_is_literal() {
        let expected = json!({"v": "\\@integer@"});
        assert!(compare(expected.clone(), json!({"v": "@integer@"})).is_empty());

        let trail = compare(expected, json!({"v": 5}));
        assert_eq!(entries(&trail), vec![r#"v: expected "@integer@", got number 5"#]);
    }

    #[test]
    fn test_all_mismatches_are_collected() {
        let trail = compare(json!({"a": "@integer@", "b": "x"}), json!({"a": "y", "b": "z"}));
        assert_eq!(
            entries(&trail),
            vec![r#"a: expected integer, got string "y""#, r#"b: expected "x", got "z""#]
        );
    }

    #[test]
    fn test_numeric_equivalence() {
        assert!(compare(json!(3), json!(3.0)).is_empty());
        assert!(compare(json!({"price": 3.0}), json!({"price": 3})).is_empty());
        assert_eq!(entries(&compare(json!(3), json!(3.5))), vec!["$: expected 3, got 3.5"]);
    }

    #[test]
    fn test_strings_compare_exactly() {
        assert_eq!(entries(&compare(json!("Hello"), json!("hello"))), vec![r#"$: expected "Hello", got "hello""#]);
        assert_eq!(entries(&compare(json!("a b"), json!("a  b"))).len(), 1);
    }

    #[test]
    fn test_kind_mismatch_stops_descent() {
        let trail = compare(json!({"user": {"id": 1, "name": "x"}}), json!({"user": [1, 2]}));
        assert_eq!(entries(&trail), vec!["user: expected object, got array of 2 elements"]);
    }

    #[test]
    fn test_length_mismatch_reported_once() {
        let trail = compare(json!({"tags": ["a", "b", "c"]}), json!({"tags": ["x"]}));
        assert_eq!(
            entries(&trail),
            vec!["tags: expected array of 3 elements, got array of 1 element"]
        );
    }

    #[test]
    fn test_nested_paths() {
        let trail = compare(
            json!({"products": [{"id": "@integer@", "name": "Mug"}, {"id": "@integer@", "name": "Cup"}]}),
            json!({"products": [{"id": 1, "name": "Mug"}, {"id": "two", "name": "Plate"}]}),
        );
        assert_eq!(
            entries(&trail),
            vec![
                r#"products[1].id: expected integer, got string "two""#,
                r#"products[1].name: expected "Cup", got "Plate""#,
            ]
        );
    }

    #[test]
    fn test_null_and_bool() {
        assert!(compare(json!({"a": null, "b": true}), json!({"a": null, "b": true})).is_empty());
        assert_eq!(
            entries(&compare(json!({"a": null, "b": true}), json!({"a": 0, "b": false}))),
            vec!["a: expected null, got number 0", "b: expected true, got false"]
        );
    }

    #[test]
    fn test_matcher_tokens_in_actual_are_plain_strings() {
        let trail = compare(json!({"v": "@string@"}), json!({"v": "@integer@"}));
        assert!(trail.is_empty());
        let trail = compare(json!({"v": 1}), json!({"v": "@*@"}));
        assert_eq!(entries(&trail), vec![r#"v: expected 1, got string "@*@""#]);
    }

    #[test]
    fn test_unknown_matcher_is_fatal() {
        let err = Comparator::new()
            .compare(&Document::from(json!({"a": "x", "b": "@date@"})), &Document::from(json!({"a": "y"})))
            .unwrap_err();
        assert_eq!(err.raw, "@date@");
    }

    #[test]
    fn test_unknown_matcher_is_fatal_in_skipped_subtrees() {
        let expected = Document::from(json!({"a": {"b": "@date@"}}));
        for actual in [json!({}), json!({"a": 1}), json!({"a": {"b": "x"}})] {
            let err = Comparator::new()
                .compare(&expected, &Document::from(actual.clone()))
                .unwrap_err();
            assert_eq!(err.raw, "@date@", "{actual}");
        }

        let expected = Document::from(json!({"items": [{"id": "@intger@"}, 2]}));
        for actual in [json!({}), json!({"items": "none"}), json!({"items": [1]})] {
            let err = Comparator::new()
                .compare(&expected, &Document::from(actual.clone()))
                .unwrap_err();
            assert_eq!(err.raw, "@intger@", "{actual}");
        }
    }

    #[test]
    fn test_escaped_matcher_in_skipped_subtree_is_valid() {
        let trail = compare(json!({"a": {"b": r"\@date@"}}), json!({}));
        assert_eq!(entries(&trail), vec!["a: expected object, got missing key"]);
    }

    #[test]
    fn test_large_integer_does_not_equal_nearby_float() {
        let expected = Document::Number(Number::PosInt(9_007_199_254_740_993));
        let actual = Document::Number(Number::Float(9_007_199_254_740_992.0));
        let trail = Comparator::new().compare(&expected, &actual).unwrap();
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_text_mode_accepts_parsed_scalars() {
        let expected = Document::from(json!({"id": "@integer@", "price": "@number@", "active": "@boolean@"}));
        let actual = Document::from(json!({"id": "42", "price": "9.99", "active": "true"}));

        assert_eq!(Comparator::new().compare(&expected, &actual).map(|t| t.len()), Ok(3));
        let text = Comparator::new().with_scalar_mode(ScalarMode::Text);
        assert_eq!(text.scalar_mode(), ScalarMode::Text);
        assert!(text.compare(&expected, &actual).map(|t| t.is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_root_path_for_top_level_mismatch() {
        let trail = Comparator::new()
            .compare(&Document::Number(Number::PosInt(1)), &Document::Null)
            .unwrap();
        assert_eq!(entries(&trail), vec!["$: expected 1, got null"]);
    }
}
