//! Structural path expressions.
//!
//! A path is a list of steps evaluated from the document root. Syntax:
//!
//! ```text
//! project/build/plugins/plugin[artifactId~'maven-confluence-plugin']
//! project/dependencies/dependency[groupId~'com.k15t.spark'][last()]
//! //plugin[executions/execution/id~'npm-install']
//! project/build/plugins/plugin/executions/#comment[text()~'spark-scaffold:executions']
//! ```
//!
//! | form                  | meaning                                             |
//! |-----------------------|-----------------------------------------------------|
//! | `a/b`                 | child step                                          |
//! | `a//b`, `//b`         | descendant step                                     |
//! | `*`, `#comment`       | any element, comment node                           |
//! | `[@attr~'v']`         | attribute value contains `v`                        |
//! | `[text()~'v']`        | direct text (comment body for comments) contains `v`|
//! | `[rel/path]`          | has a descendant matching `rel/path`                |
//! | `[rel/path~'v']`      | ... whose text contains `v`                         |
//! | `[preceded-by(name)]` | previous sibling element is `name`                  |
//! | `[last()]`            | last element among its siblings                     |

use std::fmt;
use std::str::FromStr;

use crate::patch::error::PatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    /// Element with this local name (case-sensitive).
    Element(String),
    AnyElement,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    AttrContains { name: String, needle: String },
    TextContains(String),
    Has(StructuralPath),
    PrecededBy(String),
    LastChild,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    pub test: NodeTest,
    pub predicates: Vec<Predicate>,
}

/// A parsed path. Build one with [`StructuralPath::parse`] or the builder
/// methods; predicate methods apply to the most recently added step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuralPath {
    steps: Vec<Step>,
}

impl StructuralPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(src: &str) -> Result<Self, PatchError> {
        Parser::new(src).parse()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    // ── builder ────────────────────────────────────────────────────────────

    pub fn child(self, name: &str) -> Self {
        self.step(Axis::Child, NodeTest::Element(name.to_string()))
    }

    pub fn descendant(self, name: &str) -> Self {
        self.step(Axis::Descendant, NodeTest::Element(name.to_string()))
    }

    pub fn child_any(self) -> Self {
        self.step(Axis::Child, NodeTest::AnyElement)
    }

    pub fn comment(self) -> Self {
        self.step(Axis::Child, NodeTest::Comment)
    }

    pub fn text_contains(self, needle: &str) -> Self {
        self.with(Predicate::TextContains(needle.to_string()))
    }

    pub fn attr_contains(self, name: &str, needle: &str) -> Self {
        self.with(Predicate::AttrContains {
            name: name.to_string(),
            needle: needle.to_string(),
        })
    }

    pub fn has(self, rel: StructuralPath) -> Self {
        self.with(Predicate::Has(rel))
    }

    pub fn preceded_by(self, name: &str) -> Self {
        self.with(Predicate::PrecededBy(name.to_string()))
    }

    pub fn last_child(self) -> Self {
        self.with(Predicate::LastChild)
    }

    /// Append a path's steps after this one's.
    pub fn join(mut self, rest: &StructuralPath) -> Self {
        self.steps.extend(rest.steps.iter().cloned());
        self
    }

    fn step(mut self, axis: Axis, test: NodeTest) -> Self {
        self.steps.push(Step {
            axis,
            test,
            predicates: Vec::new(),
        });
        self
    }

    fn with(mut self, predicate: Predicate) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.predicates.push(predicate);
        }
        self
    }
}

impl FromStr for StructuralPath {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step.axis {
                Axis::Descendant => f.write_str("//")?,
                Axis::Child if i > 0 => f.write_str("/")?,
                Axis::Child => {}
            }
            match &step.test {
                NodeTest::Element(name) => f.write_str(name)?,
                NodeTest::AnyElement => f.write_str("*")?,
                NodeTest::Comment => f.write_str("#comment")?,
            }
            for predicate in &step.predicates {
                match predicate {
                    Predicate::AttrContains { name, needle } => {
                        write!(f, "[@{name}~{}]", quote(needle))?
                    }
                    Predicate::TextContains(needle) => write!(f, "[text()~{}]", quote(needle))?,
                    Predicate::Has(rel) => write!(f, "[{rel}]")?,
                    Predicate::PrecededBy(name) => write!(f, "[preceded-by({name})]")?,
                    Predicate::LastChild => f.write_str("[last()]")?,
                }
            }
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.contains('\'') {
        format!("\"{s}\"")
    } else {
        format!("'{s}'")
    }
}

// ── parser ────────────────────────────────────────────────────────────────────

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn parse(mut self) -> Result<StructuralPath, PatchError> {
        self.skip_ws();
        let path = self.path(true)?;
        self.skip_ws();
        if self.pos < self.src.len() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(path)
    }

    fn path(&mut self, absolute: bool) -> Result<StructuralPath, PatchError> {
        let mut steps = Vec::new();
        let mut axis = Axis::Child;
        if self.eat("//") {
            axis = Axis::Descendant;
        } else if absolute {
            self.eat("/");
        }

        loop {
            let test = self.node_test()?;
            let mut predicates = Vec::new();
            while self.eat("[") {
                predicates.push(self.predicate()?);
                self.skip_ws();
                self.expect("]")?;
            }
            steps.push(Step {
                axis,
                test,
                predicates,
            });

            if self.eat("//") {
                axis = Axis::Descendant;
            } else if self.eat("/") {
                axis = Axis::Child;
            } else {
                break;
            }
        }

        Ok(StructuralPath { steps })
    }

    fn node_test(&mut self) -> Result<NodeTest, PatchError> {
        if self.eat("*") {
            Ok(NodeTest::AnyElement)
        } else if self.eat("#comment") {
            Ok(NodeTest::Comment)
        } else {
            self.name().map(NodeTest::Element)
        }
    }

    fn predicate(&mut self) -> Result<Predicate, PatchError> {
        self.skip_ws();
        if self.eat("last()") {
            return Ok(Predicate::LastChild);
        }
        if self.eat("preceded-by(") {
            self.skip_ws();
            let name = self.name()?;
            self.skip_ws();
            self.expect(")")?;
            return Ok(Predicate::PrecededBy(name));
        }
        if self.eat("text()") {
            self.tilde()?;
            return Ok(Predicate::TextContains(self.string()?));
        }
        if self.eat("@") {
            let name = self.name()?;
            self.tilde()?;
            let needle = self.string()?;
            return Ok(Predicate::AttrContains { name, needle });
        }

        let mut rel = self.path(false)?;
        self.skip_ws();
        if self.eat("~") {
            let needle = self.string()?;
            rel = rel.text_contains(&needle);
        }
        Ok(Predicate::Has(rel))
    }

    fn name(&mut self) -> Result<String, PatchError> {
        let rest = &self.src[self.pos..];
        let mut len = 0;
        for (i, c) in rest.char_indices() {
            let ok = if i == 0 {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
            };
            if !ok {
                break;
            }
            len = i + c.len_utf8();
        }
        if len == 0 {
            return Err(self.error("expected an element name"));
        }
        self.pos += len;
        Ok(rest[..len].to_string())
    }

    fn string(&mut self) -> Result<String, PatchError> {
        self.skip_ws();
        let quote = match self.src[self.pos..].chars().next() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted string")),
        };
        let body_start = self.pos + 1;
        let Some(len) = self.src[body_start..].find(quote) else {
            return Err(self.error("unterminated string"));
        };
        self.pos = body_start + len + 1;
        Ok(self.src[body_start..body_start + len].to_string())
    }

    fn tilde(&mut self) -> Result<(), PatchError> {
        self.skip_ws();
        self.expect("~")
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.src[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), PatchError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{token}'")))
        }
    }

    fn skip_ws(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, reason: &str) -> PatchError {
        PatchError::InvalidPath {
            path: self.src.to_string(),
            position: self.pos,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_child_steps() {
        let path = StructuralPath::parse("project/dependencies/dependency").unwrap();
        assert_eq!(path.steps().len(), 3);
        assert!(path.steps().iter().all(|s| s.axis == Axis::Child));
        assert_eq!(path.steps()[2].test, NodeTest::Element("dependency".into()));
    }

    #[test]
    fn leading_slash_is_optional() {
        assert_eq!(
            StructuralPath::parse("/project/build").unwrap(),
            StructuralPath::parse("project/build").unwrap()
        );
    }

    #[test]
    fn parses_descendant_and_comment() {
        let path = StructuralPath::parse("//executions/#comment[text()~'marker']").unwrap();
        assert_eq!(path.steps()[0].axis, Axis::Descendant);
        assert_eq!(path.steps()[1].test, NodeTest::Comment);
        assert_eq!(
            path.steps()[1].predicates,
            vec![Predicate::TextContains("marker".into())]
        );
    }

    #[test]
    fn child_text_predicate_is_sugar_for_has() {
        let sugar = StructuralPath::parse("dependency[groupId~'com.k15t']").unwrap();
        let built = StructuralPath::new()
            .child("dependency")
            .has(StructuralPath::new().child("groupId").text_contains("com.k15t"));
        assert_eq!(sugar, built);
    }

    #[test]
    fn parses_every_predicate_form() {
        let path = StructuralPath::parse(
            "a[@id~\"x'y\"][preceded-by(b)][last()][c/d][text() ~ 'z']",
        )
        .unwrap();
        let preds = &path.steps()[0].predicates;
        assert_eq!(preds.len(), 5);
        assert_eq!(
            preds[0],
            Predicate::AttrContains {
                name: "id".into(),
                needle: "x'y".into()
            }
        );
        assert_eq!(preds[1], Predicate::PrecededBy("b".into()));
        assert_eq!(preds[2], Predicate::LastChild);
        assert!(matches!(&preds[3], Predicate::Has(p) if p.steps().len() == 2));
        assert_eq!(preds[4], Predicate::TextContains("z".into()));
    }

    #[test]
    fn dotted_names_are_allowed() {
        let path = StructuralPath::parse("systemPropertyVariables/spark.dev.dir").unwrap();
        assert_eq!(path.steps()[1].test, NodeTest::Element("spark.dev.dir".into()));
    }

    #[test]
    fn wildcard_builder_matches_parsed_star() {
        let built = StructuralPath::new().child("atlassian-plugin").child_any();
        assert_eq!(built, StructuralPath::parse("atlassian-plugin/*").unwrap());
    }

    #[test]
    fn display_round_trips() {
        for src in [
            "project/build/plugins/plugin[artifactId[text()~'maven-jira-plugin']]",
            "//execution[last()][preceded-by(execution)]",
            "a/*/#comment[text()~'m']",
            "a[@key~'k']//b",
        ] {
            let path = StructuralPath::parse(src).unwrap();
            assert_eq!(StructuralPath::parse(&path.to_string()).unwrap(), path, "{src}");
        }
    }

    #[test]
    fn reports_error_position() {
        let err = StructuralPath::parse("project/[x]").unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath { position: 8, .. }), "{err:?}");

        assert!(StructuralPath::parse("a[b~'open").is_err());
        assert!(StructuralPath::parse("a[b").is_err());
        assert!(StructuralPath::parse("a b").is_err());
    }
}
