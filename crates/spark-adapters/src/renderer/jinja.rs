//! Strict minijinja renderer with the variant helpers.
//!
//! Templates see every field of [`RenderContext`] as a variable and four
//! helpers that read `variant` from that context:
//!
//! ```jinja
//! {% if is_admin_or_space() %}<xwork key="{{ key }}-actions">...</xwork>{% endif %}
//! ```
//!
//! Undefined variables and unknown helpers are errors, never empty strings.

use std::str::FromStr;

use minijinja::{AutoEscape, Environment, Error, ErrorKind, State, UndefinedBehavior};
use tracing::{debug, instrument};

use spark_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, Variant},
    error::SparkResult,
};

/// Renderer owning its own environment; nothing is shared between instances.
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Strict environment with the variant helpers registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let mut renderer = Self { env };
        renderer.register_variant_helpers();
        renderer
    }

    /// Install the variant helpers. Calling this again replaces them with
    /// identical functions, so it is safe to repeat.
    pub fn register_variant_helpers(&mut self) -> &mut Self {
        self.env.add_function("is_admin", is_admin);
        self.env.add_function("is_dialog", is_dialog);
        self.env.add_function("is_space", is_space);
        self.env.add_function("is_admin_or_space", is_admin_or_space);
        self
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for JinjaRenderer {
    #[instrument(skip(self, source, context), fields(key = %context.key))]
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> SparkResult<String> {
        let rendered = self
            .env
            .render_named_str(name, source, context)
            .map_err(|e| map_render_error(name, &e))?;
        debug!(bytes = rendered.len(), "rendered template");
        Ok(rendered)
    }
}

fn current_variant(state: &State) -> Result<Variant, Error> {
    let value = state.lookup("variant").ok_or_else(|| {
        Error::new(
            ErrorKind::UndefinedError,
            "variant helpers need 'variant' in the context",
        )
    })?;
    let raw = value.as_str().unwrap_or_default();
    Variant::from_str(raw).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

fn is_admin(state: &State) -> Result<bool, Error> {
    current_variant(state).map(|v| v.is_admin())
}

fn is_dialog(state: &State) -> Result<bool, Error> {
    current_variant(state).map(|v| v.is_dialog())
}

fn is_space(state: &State) -> Result<bool, Error> {
    current_variant(state).map(|v| v.is_space())
}

fn is_admin_or_space(state: &State) -> Result<bool, Error> {
    current_variant(state).map(|v| v.is_admin_or_space())
}

fn map_render_error(template: &str, e: &Error) -> ApplicationError {
    let mut detail = e
        .detail()
        .map(str::to_owned)
        .unwrap_or_else(|| e.kind().to_string());
    if let Some(line) = e.line() {
        detail = format!("{detail} (line {line})");
    }

    match e.kind() {
        ErrorKind::UndefinedError
        | ErrorKind::UnknownFunction
        | ErrorKind::UnknownFilter
        | ErrorKind::UnknownTest => ApplicationError::UnboundVariable {
            template: template.to_string(),
            detail,
        },
        _ => ApplicationError::RenderingFailed {
            template: template.to_string(),
            reason: detail,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::{
        domain::{BuildFacts, Framework, HostApplication, ModuleKey, ScaffoldAnswers},
        error::SparkError,
    };

    fn context(variant: Variant) -> RenderContext {
        let facts = BuildFacts {
            packaging: "atlassian-plugin".into(),
            group_id: "com.example".into(),
            artifact_id: "my-plugin".into(),
            host: HostApplication::Confluence,
            host_plugin: "maven-confluence-plugin".into(),
        };
        let answers = ScaffoldAnswers {
            key: ModuleKey::parse("my-app").unwrap(),
            name: "My & App".into(),
            variant,
            framework: Framework::React,
        };
        RenderContext::new(answers, &facts, "2.4.0".into())
    }

    const GATED: &str = "<web-item key=\"{{ key }}-link\"/>\n{% if is_admin_or_space() %}<xwork key=\"{{ key }}-actions\"/>\n{% endif %}";

    #[test]
    fn gated_block_follows_variant() {
        let renderer = JinjaRenderer::new();

        let dialog = renderer.render("gated", GATED, &context(Variant::Dialog)).unwrap();
        assert_eq!(dialog, "<web-item key=\"my-app-link\"/>\n");

        let admin = renderer.render("gated", GATED, &context(Variant::Admin)).unwrap();
        assert!(admin.contains("<xwork key=\"my-app-actions\"/>"));
    }

    #[test]
    fn exactly_one_variant_helper_holds() {
        let renderer = JinjaRenderer::new();
        let source = "{{ is_admin() }} {{ is_dialog() }} {{ is_space() }}";

        for variant in Variant::ALL {
            let out = renderer.render("flags", source, &context(variant)).unwrap();
            assert_eq!(out.matches("true").count(), 1, "{variant}: {out}");
        }
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = JinjaRenderer::new()
            .render("module.xml.tmpl", "{{ nope }}", &context(Variant::Admin))
            .unwrap_err();
        assert!(matches!(
            err,
            SparkError::Application(ApplicationError::UnboundVariable { ref template, .. })
                if template == "module.xml.tmpl"
        ));
    }

    #[test]
    fn undefined_variable_in_condition_is_an_error() {
        let err = JinjaRenderer::new()
            .render("t", "{% if nope %}x{% endif %}", &context(Variant::Admin))
            .unwrap_err();
        assert!(matches!(
            err,
            SparkError::Application(ApplicationError::UnboundVariable { .. })
        ));
    }

    #[test]
    fn unknown_helper_is_an_error() {
        let err = JinjaRenderer::new()
            .render("t", "{% if is_project() %}x{% endif %}", &context(Variant::Admin))
            .unwrap_err();
        assert!(matches!(
            err,
            SparkError::Application(ApplicationError::UnboundVariable { .. })
        ));
    }

    #[test]
    fn syntax_error_is_a_rendering_failure() {
        let err = JinjaRenderer::new()
            .render("t", "{% if %}", &context(Variant::Admin))
            .unwrap_err();
        assert!(matches!(
            err,
            SparkError::Application(ApplicationError::RenderingFailed { .. })
        ));
    }

    #[test]
    fn output_is_not_escaped_and_keeps_trailing_newline() {
        let out = JinjaRenderer::new()
            .render("t.html", "<h1>{{ name }}</h1>\n", &context(Variant::Dialog))
            .unwrap();
        assert_eq!(out, "<h1>My & App</h1>\n");
    }

    #[test]
    fn registering_helpers_twice_is_harmless() {
        let mut renderer = JinjaRenderer::new();
        renderer.register_variant_helpers().register_variant_helpers();

        let out = renderer
            .render("t", "{{ is_space() }}", &context(Variant::Space))
            .unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn derived_names_are_available() {
        let out = JinjaRenderer::new()
            .render(
                "t",
                "{{ package }}.{{ class_name }} {{ module_dir }} {{ host }}",
                &context(Variant::Admin),
            )
            .unwrap();
        assert_eq!(
            out,
            "com.example.spark.MyAppAction src/main/frontend/my-app confluence"
        );
    }
}
