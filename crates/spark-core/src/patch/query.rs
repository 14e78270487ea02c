//! Evaluating structural paths against a document.

use roxmltree::Node;

use crate::patch::{
    document::{Document, Match, text_content},
    path::{Axis, NodeTest, Predicate, Step, StructuralPath},
};

/// Every node reached by `path`, ordered by start offset, each once.
pub fn resolve<'d, 'input>(doc: &'d Document<'input>, path: &StructuralPath) -> Vec<Match<'d, 'input>> {
    evaluate(doc.root(), path.steps())
        .into_iter()
        .map(Match::new)
        .collect()
}

fn evaluate<'a, 'input>(context: Node<'a, 'input>, steps: &[Step]) -> Vec<Node<'a, 'input>> {
    let mut current = vec![context];

    for step in steps {
        let mut next = Vec::new();
        for node in &current {
            match step.axis {
                Axis::Child => next.extend(node.children().filter(|n| matches_step(*n, step))),
                Axis::Descendant => next.extend(
                    node.descendants()
                        .skip(1)
                        .filter(|n| matches_step(*n, step)),
                ),
            }
        }
        // Descendant steps from nested contexts reach the same node twice.
        next.sort_by_key(|n| n.range().start);
        next.dedup();

        current = next;
        if current.is_empty() {
            break;
        }
    }

    current
}

fn matches_step(node: Node<'_, '_>, step: &Step) -> bool {
    let test = match &step.test {
        NodeTest::Element(name) => node.is_element() && node.tag_name().name() == name,
        NodeTest::AnyElement => node.is_element(),
        NodeTest::Comment => node.is_comment(),
    };
    test && step.predicates.iter().all(|p| holds(node, p))
}

fn holds(node: Node<'_, '_>, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::AttrContains { name, needle } => node
            .attributes()
            .any(|a| a.name() == name && a.value().contains(needle.as_str())),
        Predicate::TextContains(needle) => text_content(node).contains(needle.as_str()),
        Predicate::Has(rel) => !evaluate(node, rel.steps()).is_empty(),
        Predicate::PrecededBy(name) => node
            .prev_sibling_element()
            .is_some_and(|p| p.tag_name().name() == name),
        Predicate::LastChild => node.next_sibling_element().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
  <dependencies>
    <dependency><groupId>org.a</groupId><artifactId>one</artifactId></dependency>
    <dependency><groupId>org.b</groupId><artifactId>two</artifactId></dependency>
    <!-- between -->
    <dependency><groupId>org.a</groupId><artifactId>three</artifactId></dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin key="x-plugin"><artifactId>maven-confluence-plugin</artifactId>
        <configuration><nested><dependency/></nested></configuration>
      </plugin>
    </plugins>
  </build>
</project>"#;

    fn artifacts(doc: &Document<'_>, path: &str) -> Vec<String> {
        let path = StructuralPath::parse(path).unwrap();
        doc.resolve(&path)
            .iter()
            .map(|m| {
                m.node()
                    .children()
                    .find(|c| c.has_tag_name("artifactId"))
                    .and_then(|c| c.text())
                    .unwrap_or("-")
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn siblings_come_back_in_document_order() {
        let doc = Document::parse(XML).unwrap();
        assert_eq!(
            artifacts(&doc, "project/dependencies/dependency"),
            vec!["one", "two", "three"]
        );
        let path = StructuralPath::parse("project/dependencies/dependency").unwrap();
        let last = doc.last(&path).unwrap();
        assert!(doc.raw()[last.range()].contains("three"));
    }

    #[test]
    fn namespaces_are_ignored_for_names() {
        let doc = Document::parse(XML).unwrap();
        assert!(doc.exists(&StructuralPath::parse("project/build/plugins/plugin").unwrap()));
    }

    #[test]
    fn child_predicate_filters_by_text() {
        let doc = Document::parse(XML).unwrap();
        assert_eq!(
            artifacts(&doc, "project/dependencies/dependency[groupId~'org.a']"),
            vec!["one", "three"]
        );
    }

    #[test]
    fn descendant_axis_finds_nested_elements_once() {
        let doc = Document::parse(XML).unwrap();
        let all = StructuralPath::parse("//dependency").unwrap();
        assert_eq!(doc.resolve(&all).len(), 4);

        let twice = StructuralPath::parse("//*//dependency").unwrap();
        let matches = doc.resolve(&twice);
        assert_eq!(matches.len(), 4);
        assert!(matches.windows(2).all(|w| w[0].offset() < w[1].offset()));
    }

    #[test]
    fn attribute_and_last_predicates() {
        let doc = Document::parse(XML).unwrap();
        assert!(doc.exists(&StructuralPath::parse("//plugin[@key~'x-']").unwrap()));
        assert!(!doc.exists(&StructuralPath::parse("//plugin[@key~'y-']").unwrap()));
        assert_eq!(
            artifacts(&doc, "project/dependencies/dependency[last()]"),
            vec!["three"]
        );
    }

    #[test]
    fn preceded_by_skips_comments() {
        let doc = Document::parse(XML).unwrap();
        assert_eq!(
            artifacts(&doc, "project/dependencies/dependency[preceded-by(dependency)]"),
            vec!["two", "three"]
        );
        assert_eq!(
            artifacts(&doc, "project/*[preceded-by(dependencies)]"),
            vec!["-"]
        );
    }

    #[test]
    fn comment_nodes_match_on_body() {
        let doc = Document::parse(XML).unwrap();
        let path = StructuralPath::parse("project/dependencies/#comment[text()~'between']").unwrap();
        let m = doc.first(&path).unwrap();
        assert_eq!(&doc.raw()[m.range()], "<!-- between -->");
    }

    #[test]
    fn missing_paths_resolve_to_nothing() {
        let doc = Document::parse(XML).unwrap();
        assert!(doc.resolve(&StructuralPath::parse("project/repositories/repository").unwrap()).is_empty());
        assert!(doc.resolve(&StructuralPath::parse("build").unwrap()).is_empty());
    }
}
